//! Write side of the buffer.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::circular_buffer::Shared;
use crate::config::Policy;
use crate::error::{Error, Result};

/// The writing handle of a [`CircularBuffer`](crate::CircularBuffer).
///
/// Units land in the ring in call order. What happens when the ring is full
/// depends on the buffer's [`Policy`].
pub struct Producer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Producer<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Producer { shared }
    }

    /// Returns the backpressure policy of the underlying buffer.
    pub fn policy(&self) -> Policy {
        self.shared.policy
    }
}

impl<T: Copy> Producer<T> {
    /// Appends one unit.
    ///
    /// With [`Policy::Blocking`] this waits while the ring is full. With
    /// [`Policy::Overflow`] a full ring fails with [`Error::Overflow`].
    pub fn write_one(&self, unit: T) -> Result<()> {
        self.write(std::slice::from_ref(&unit))
    }

    /// Appends every unit of `data`.
    ///
    /// With [`Policy::Blocking`] the units are copied in as space frees up,
    /// possibly across several waits, until all of them are written.
    ///
    /// With [`Policy::Overflow`] the write is all or nothing: if `data` does
    /// not fit right now, nothing is written and [`Error::Overflow`] is
    /// returned.
    ///
    /// Fails with [`Error::ReadClosed`] once the consumer has closed, even
    /// after part of `data` has been written.
    pub fn write(&self, data: &[T]) -> Result<()> {
        let mut ring = self.shared.lock()?;
        let mut written = 0;

        loop {
            ring.check_writable()?;
            self.check_fits(ring.space_left(), data.len())?;

            let n = ring.push(&data[written..]);
            if n > 0 {
                written += n;
                self.shared.readable.notify_one();
            }
            if written == data.len() {
                return Ok(());
            }

            trace!(
                written,
                remaining = data.len() - written,
                "markring: buffer full, waiting for reader"
            );
            ring = self.shared.writable.wait(ring)?;
        }
    }

    /// Writes a prefix of `data` and returns its length.
    ///
    /// Waits only until at least one unit fits, so an error always means
    /// nothing was written. The overflow policy is all or nothing as in
    /// [`write`](Self::write).
    pub(crate) fn write_some(&self, data: &[T]) -> Result<usize> {
        let mut ring = self.shared.lock()?;
        loop {
            ring.check_writable()?;
            self.check_fits(ring.space_left(), data.len())?;

            let n = ring.push(data);
            if n > 0 {
                self.shared.readable.notify_one();
            }
            if n > 0 || data.is_empty() {
                return Ok(n);
            }

            trace!(requested = data.len(), "markring: buffer full, waiting for reader");
            ring = self.shared.writable.wait(ring)?;
        }
    }

    fn check_fits(&self, space: usize, requested: usize) -> Result<()> {
        if self.shared.policy.is_blocking() || space >= requested {
            return Ok(());
        }
        debug!(requested, space, "markring: write rejected, buffer full");
        Err(Error::Overflow { requested, space })
    }

    /// Checks that neither side has closed. Units are visible to the
    /// consumer as soon as they are written, so there is nothing to push.
    pub fn flush(&self) -> Result<()> {
        let ring = self.shared.lock()?;
        ring.check_writable()
    }

    /// Closes the write side.
    ///
    /// Units already in the ring stay readable; the consumer sees end of
    /// stream once it has drained them. Closing again is a no-op.
    ///
    /// Like [`flush`](Self::flush), fails with [`Error::ReadClosed`] if the
    /// consumer closed first. The write side then stays open.
    pub fn close(&self) -> Result<()> {
        let mut ring = self.shared.lock()?;
        if ring.write_closed {
            return Ok(());
        }
        ring.check_writable()?;
        ring.write_closed = true;
        debug!(pending = ring.available(), "markring: writer closed");
        self.shared.notify_all();
        Ok(())
    }
}
