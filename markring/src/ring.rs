//! Cursor bookkeeping for the circular buffer.
//!
//! The ring is split into three regions by the read, write and mark cursors:
//!
//! ```text
//!   [mark, read)     retained for reset()      marked()
//!   [read, write)    readable                  available()
//!   [write, mark-1)  writable                  space_left()
//! ```
//!
//! The slot just before `mark` is never written, so `read == write` always
//! means empty. The three sizes add up to `len - 1`.
//!
//! `Ring` does no locking; [`CircularBuffer`](crate::CircularBuffer) keeps
//! it behind a mutex.

use tracing::debug;

use crate::error::{Error, Result};

pub(crate) struct Ring<T> {
    buf: Box<[T]>,
    read: usize,
    write: usize,
    mark: usize,
    // Units the consumer may read past `mark` before the mark is dropped.
    mark_size: usize,
    pub(crate) write_closed: bool,
    pub(crate) read_closed: bool,
}

impl<T: Copy + Default> Ring<T> {
    pub(crate) fn new(len: usize) -> Self {
        assert!(len > 0, "capacity must be greater than 0");
        Ring {
            buf: vec![T::default(); len].into_boxed_slice(),
            read: 0,
            write: 0,
            mark: 0,
            mark_size: 0,
            write_closed: false,
            read_closed: false,
        }
    }
}

impl<T: Copy> Ring<T> {
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Fails if either side has closed.
    pub(crate) fn check_writable(&self) -> Result<()> {
        if self.write_closed {
            return Err(Error::WriteClosed);
        }
        if self.read_closed {
            return Err(Error::ReadClosed);
        }
        Ok(())
    }

    /// Units that can be read without waiting.
    pub(crate) fn available(&self) -> usize {
        if self.read <= self.write {
            self.write - self.read
        } else {
            self.len() - (self.read - self.write)
        }
    }

    /// Units that can be written without waiting.
    pub(crate) fn space_left(&self) -> usize {
        if self.write < self.mark {
            self.mark - self.write - 1
        } else {
            (self.len() - 1) - (self.write - self.mark)
        }
    }

    /// Units already read but retained for a rewind.
    pub(crate) fn marked(&self) -> usize {
        if self.mark <= self.read {
            self.read - self.mark
        } else {
            self.len() - (self.mark - self.read)
        }
    }

    /// Drops the mark once the consumer has read past its budget, handing
    /// the retained region back to the writer.
    fn ensure_mark(&mut self) {
        if self.marked() > self.mark_size {
            if self.mark_size > 0 {
                debug!(
                    read_ahead = self.mark_size,
                    "markring: read past mark limit, mark forgotten"
                );
            }
            self.mark = self.read;
            self.mark_size = 0;
        }
    }

    /// Copies as much of `data` as fits. Returns the number of units written.
    pub(crate) fn push(&mut self, data: &[T]) -> usize {
        let n = data.len().min(self.space_left());
        let first = n.min(self.len() - self.write);
        let w = self.write;
        self.buf[w..w + first].copy_from_slice(&data[..first]);
        self.buf[..n - first].copy_from_slice(&data[first..n]);
        self.write = (w + n) % self.len();
        n
    }

    /// Copies up to `out.len()` readable units into `out`.
    pub(crate) fn pop(&mut self, out: &mut [T]) -> usize {
        let n = out.len().min(self.available());
        let first = n.min(self.len() - self.read);
        let r = self.read;
        out[..first].copy_from_slice(&self.buf[r..r + first]);
        out[first..n].copy_from_slice(&self.buf[..n - first]);
        self.advance(n);
        n
    }

    /// Takes the next readable unit.
    pub(crate) fn pop_one(&mut self) -> Option<T> {
        if self.available() == 0 {
            return None;
        }
        let unit = self.buf[self.read];
        self.advance(1);
        Some(unit)
    }

    /// Discards up to `n` readable units.
    pub(crate) fn skip(&mut self, n: usize) -> usize {
        let n = n.min(self.available());
        self.advance(n);
        n
    }

    fn advance(&mut self, n: usize) {
        self.read = (self.read + n) % self.len();
        self.ensure_mark();
    }

    /// Sets the rewind point at the current read position. The caller
    /// checks `read_ahead` against the ring length.
    pub(crate) fn set_mark(&mut self, read_ahead: usize) {
        self.mark_size = read_ahead;
        self.mark = self.read;
    }

    /// Moves the read cursor back to the mark. A forgotten mark sits at the
    /// read cursor, so this is then a no-op.
    pub(crate) fn rewind(&mut self) {
        self.read = self.mark;
    }

    /// Drops all data and any mark. The closed latches are untouched.
    pub(crate) fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
        self.mark = 0;
        self.mark_size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(ring: &Ring<u8>) {
        assert_eq!(
            ring.available() + ring.space_left() + ring.marked(),
            ring.len() - 1,
            "read={} write={} mark={}",
            ring.read,
            ring.write,
            ring.mark
        );
    }

    #[test]
    fn test_empty() {
        let ring = Ring::<u8>::new(4);
        assert_eq!(ring.available(), 0);
        assert_eq!(ring.space_left(), 3);
        assert_eq!(ring.marked(), 0);
        assert_partition(&ring);
    }

    #[test]
    fn test_push_pop() {
        let mut ring = Ring::<u8>::new(4);
        assert_eq!(ring.push(&[1, 2, 3, 4]), 3);
        assert_eq!(ring.space_left(), 0);
        assert_partition(&ring);

        let mut out = [0u8; 4];
        assert_eq!(ring.pop(&mut out), 3);
        assert_eq!(&out[..3], &[1, 2, 3]);
        assert_eq!(ring.available(), 0);
        assert_partition(&ring);
    }

    #[test]
    fn test_wrap_around() {
        let mut ring = Ring::<u8>::new(5);
        let mut out = [0u8; 8];

        ring.push(&[1, 2, 3]);
        assert_eq!(ring.pop(&mut out[..2]), 2);

        // write cursor wraps past the end
        assert_eq!(ring.push(&[4, 5, 6]), 3);
        assert_eq!(ring.write, 1);
        assert_partition(&ring);

        assert_eq!(ring.pop(&mut out), 4);
        assert_eq!(&out[..4], &[3, 4, 5, 6]);
        assert_eq!(ring.read, 1);
        assert_partition(&ring);
    }

    #[test]
    fn test_pop_one_and_skip() {
        let mut ring = Ring::<u8>::new(8);
        ring.push(&[10, 20, 30, 40]);
        assert_eq!(ring.pop_one(), Some(10));
        assert_eq!(ring.skip(2), 2);
        assert_eq!(ring.pop_one(), Some(40));
        assert_eq!(ring.pop_one(), None);
        assert_eq!(ring.skip(5), 0);
    }

    #[test]
    fn test_mark_retains_space() {
        let mut ring = Ring::<u8>::new(6);
        ring.push(&[1, 2, 3, 4, 5]);
        ring.set_mark(3);

        let mut out = [0u8; 3];
        ring.pop(&mut out);
        assert_eq!(ring.marked(), 3);
        // retained units are not writable yet
        assert_eq!(ring.space_left(), 0);
        assert_partition(&ring);

        ring.rewind();
        assert_eq!(ring.available(), 5);
        assert_eq!(ring.marked(), 0);
        assert_eq!(ring.pop_one(), Some(1));
    }

    #[test]
    fn test_mark_forgotten_past_limit() {
        let mut ring = Ring::<u8>::new(6);
        ring.push(&[1, 2, 3, 4, 5]);
        ring.set_mark(2);

        assert_eq!(ring.skip(2), 2);
        assert_eq!(ring.marked(), 2);

        assert_eq!(ring.pop_one(), Some(3));
        assert_eq!(ring.marked(), 0);
        assert_eq!(ring.mark_size, 0);
        assert_eq!(ring.space_left(), 3);
        assert_partition(&ring);

        ring.rewind();
        assert_eq!(ring.pop_one(), Some(4));
    }

    #[test]
    fn test_mark_across_wrap() {
        let mut ring = Ring::<u8>::new(4);
        ring.push(&[1, 2, 3]);
        ring.skip(3);
        ring.push(&[4, 5, 6]);
        ring.set_mark(2);

        let mut out = [0u8; 2];
        ring.pop(&mut out);
        assert_eq!(out, [4, 5]);
        assert_eq!(ring.marked(), 2);
        assert_partition(&ring);

        ring.rewind();
        ring.pop(&mut out);
        assert_eq!(out, [4, 5]);
    }

    #[test]
    fn test_partition_holds_over_mixed_operations() {
        let mut ring = Ring::<u8>::new(7);
        let mut out = [0u8; 7];
        let mut next = 0u8;
        let mut expect = 0u8;

        for step in 0..200usize {
            let chunk: Vec<u8> = (0..(step % 5))
                .map(|_| {
                    next = next.wrapping_add(1);
                    next
                })
                .collect();
            let n = ring.push(&chunk);
            // unwritten units are offered again next round
            next = next.wrapping_sub((chunk.len() - n) as u8);
            assert_partition(&ring);

            if step % 11 == 0 {
                ring.set_mark(step % 6);
            }
            let got = ring.pop(&mut out[..(step % 4)]);
            for &v in &out[..got] {
                expect = expect.wrapping_add(1);
                assert_eq!(v, expect);
            }
            assert!(ring.marked() <= ring.mark_size);
            assert_partition(&ring);
        }
    }

    #[test]
    fn test_capacity_one() {
        let mut ring = Ring::<u8>::new(1);
        assert_eq!(ring.space_left(), 0);
        assert_eq!(ring.push(&[1]), 0);
        assert_eq!(ring.available(), 0);
        assert_partition(&ring);
    }

    #[test]
    fn test_clear() {
        let mut ring = Ring::<u8>::new(4);
        ring.push(&[1, 2]);
        ring.set_mark(1);
        ring.pop_one();
        ring.write_closed = true;

        ring.clear();
        assert_eq!(ring.available(), 0);
        assert_eq!(ring.marked(), 0);
        assert_eq!(ring.space_left(), 3);
        assert!(ring.write_closed);
    }
}
