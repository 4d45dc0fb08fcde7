//! Byte and character flavors of the buffer.
//!
//! The byte buffer plugs into `std::io` through `Read`/`Write` impls on its
//! handles; the character buffer accepts `write!` through `fmt::Write`.

use std::{fmt, io};

use crate::{CircularBuffer, Consumer, Producer, Result};

/// A circular buffer of bytes.
pub type ByteBuffer = CircularBuffer<u8>;

/// A circular buffer of characters.
pub type CharBuffer = CircularBuffer<char>;

// ============================================================================
// Convenience constructors
// ============================================================================

/// Creates a 1KB blocking byte buffer.
pub fn bytes_1kb() -> ByteBuffer {
    CircularBuffer::new(1024, true)
}

/// Creates a 4KB blocking byte buffer.
pub fn bytes_4kb() -> ByteBuffer {
    CircularBuffer::new(4096, true)
}

/// Creates a 64KB blocking byte buffer.
pub fn bytes_64kb() -> ByteBuffer {
    CircularBuffer::new(65536, true)
}

/// Creates a blocking character buffer with room for 1023 characters.
pub fn chars_1k() -> CharBuffer {
    CircularBuffer::new(1024, true)
}

// ============================================================================
// std::io adapters
// ============================================================================

// A single `io::Write::write` call reports a prefix and never spans a wait,
// so an error means no bytes landed. `write_all` does the looping.
impl io::Write for Producer<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_some(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Producer::<u8>::flush(self)?)
    }
}

impl io::Write for &Producer<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_some(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Producer::<u8>::flush(self)?)
    }
}

impl io::Read for Consumer<u8> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Consumer::<u8>::read(self, buf)?)
    }
}

impl io::Read for &Consumer<u8> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Consumer::<u8>::read(self, buf)?)
    }
}

// ============================================================================
// Text helpers
// ============================================================================

impl Producer<char> {
    /// Appends the characters of `s` with the buffer's policy.
    pub fn write_text(&self, s: &str) -> Result<()> {
        let chars: Vec<char> = s.chars().collect();
        self.write(&chars)
    }
}

impl fmt::Write for Producer<char> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Write for &Producer<char> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|_| fmt::Error)
    }
}

impl Consumer<char> {
    /// Reads up to `max` characters, waiting like
    /// [`read`](Consumer::read). Returns `None` at end of stream.
    pub fn read_string(&self, max: usize) -> Result<Option<String>> {
        // one read never returns more than the ring holds
        let mut chars = vec!['\0'; max.min(self.ring_len()?)];
        let n = self.read(&mut chars)?;
        if n == 0 && max > 0 {
            return Ok(None);
        }
        Ok(Some(chars[..n].iter().collect()))
    }
}
