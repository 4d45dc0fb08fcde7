//! Read side of the buffer.

use std::sync::{Arc, MutexGuard};

use tracing::{debug, trace};

use crate::circular_buffer::Shared;
use crate::error::{Error, Result};
use crate::ring::Ring;

/// The reading handle of a [`CircularBuffer`](crate::CircularBuffer).
///
/// Reads wait while the ring is empty and the producer is still open. Once
/// the producer has closed and the ring is drained, reads report end of
/// stream: `None` from [`read_one`](Self::read_one), `0` from
/// [`read`](Self::read) and [`skip`](Self::skip).
pub struct Consumer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Consumer { shared }
    }

    fn lock_open(&self) -> Result<MutexGuard<'_, Ring<T>>> {
        let ring = self.shared.lock()?;
        if ring.read_closed {
            return Err(Error::ReadClosed);
        }
        Ok(ring)
    }
}

impl<T: Copy> Consumer<T> {
    /// Ring length, an upper bound on what a single read returns.
    pub(crate) fn ring_len(&self) -> Result<usize> {
        Ok(self.shared.lock()?.len())
    }

    /// Waits until the ring has data. Returns `None` at end of stream.
    fn wait_readable(&self) -> Result<Option<MutexGuard<'_, Ring<T>>>> {
        let mut ring = self.shared.lock()?;
        loop {
            if ring.read_closed {
                return Err(Error::ReadClosed);
            }
            if ring.available() > 0 {
                return Ok(Some(ring));
            }
            if ring.write_closed {
                return Ok(None);
            }
            ring = self.shared.readable.wait(ring)?;
        }
    }

    /// Reads the next unit, or `None` at end of stream.
    pub fn read_one(&self) -> Result<Option<T>> {
        let Some(mut ring) = self.wait_readable()? else {
            return Ok(None);
        };
        let unit = ring.pop_one();
        self.shared.writable.notify_one();
        Ok(unit)
    }

    /// Reads up to `buf.len()` units and returns how many were read.
    ///
    /// Waits only until at least one unit is available; short reads are
    /// normal. Returns `0` at end of stream or when `buf` is empty.
    pub fn read(&self, buf: &mut [T]) -> Result<usize> {
        if buf.is_empty() {
            drop(self.lock_open()?);
            return Ok(0);
        }
        let Some(mut ring) = self.wait_readable()? else {
            return Ok(0);
        };
        let n = ring.pop(buf);
        self.shared.writable.notify_one();
        Ok(n)
    }

    /// Discards up to `n` units, waiting like [`read`](Self::read). Returns
    /// the number of units skipped, `0` at end of stream.
    pub fn skip(&self, n: usize) -> Result<usize> {
        if n == 0 {
            drop(self.lock_open()?);
            return Ok(0);
        }
        let Some(mut ring) = self.wait_readable()? else {
            return Ok(0);
        };
        let skipped = ring.skip(n);
        self.shared.writable.notify_one();
        Ok(skipped)
    }

    /// Returns true if the next read would not wait: data is buffered or the
    /// producer has closed.
    pub fn ready(&self) -> Result<bool> {
        let ring = self.lock_open()?;
        Ok(ring.available() > 0 || ring.write_closed)
    }

    /// Returns the number of units readable without waiting.
    pub fn available(&self) -> Result<usize> {
        Ok(self.lock_open()?.available())
    }

    /// Marks the current position.
    ///
    /// A later [`reset`](Self::reset) rewinds to this position as long as no
    /// more than `read_ahead_limit` units have been consumed since. Reading
    /// past the limit silently forgets the mark. A new mark replaces the old
    /// one.
    ///
    /// The retained units occupy ring space, so the limit must be below
    /// `capacity - 1`.
    pub fn mark(&self, read_ahead_limit: usize) -> Result<()> {
        let mut ring = self.lock_open()?;
        let max = ring.len() - 1;
        if read_ahead_limit >= max {
            return Err(Error::InvalidMark {
                limit: read_ahead_limit,
                max,
            });
        }
        ring.set_mark(read_ahead_limit);
        trace!(read_ahead_limit, "markring: mark set");
        // moving the mark forward may release retained space
        self.shared.writable.notify_one();
        Ok(())
    }

    /// Rewinds to the last mark.
    ///
    /// If the mark was forgotten because more than its read-ahead limit was
    /// consumed, this leaves the read position unchanged and still returns
    /// `Ok`.
    pub fn reset(&self) -> Result<()> {
        let mut ring = self.lock_open()?;
        ring.rewind();
        Ok(())
    }

    /// Closes the read side.
    ///
    /// Buffered units are left in place. Any later producer operation fails
    /// with [`Error::ReadClosed`]. Closing again is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut ring = self.shared.lock()?;
        if ring.read_closed {
            return Ok(());
        }
        ring.read_closed = true;
        debug!(discarded = ring.available(), "markring: reader closed");
        self.shared.notify_all();
        Ok(())
    }
}
