//! Shared buffer core and the owning `CircularBuffer` type.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use tracing::debug;

use crate::config::{Config, Policy};
use crate::consumer::Consumer;
use crate::error::Result;
use crate::producer::Producer;
use crate::ring::Ring;

/// State shared by the producer and consumer handles.
pub(crate) struct Shared<T> {
    state: Mutex<Ring<T>>,
    /// Signalled when units become readable or the writer closes.
    pub(crate) readable: Condvar,
    /// Signalled when space is freed or the reader closes.
    pub(crate) writable: Condvar,
    pub(crate) policy: Policy,
}

impl<T> Shared<T> {
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Ring<T>>> {
        Ok(self.state.lock()?)
    }

    /// Wakes both sides. Used on close and clear.
    pub(crate) fn notify_all(&self) {
        self.readable.notify_all();
        self.writable.notify_all();
    }
}

/// A thread-safe bounded circular buffer with one producer and one consumer.
///
/// The buffer hands out exactly one [`Producer`] and one [`Consumer`]. Both
/// reference the same ring through an `Arc`, so either may be moved to its
/// own thread.
///
/// # Semantics
///
/// - **Write**: with [`Policy::Blocking`] waits for space; with
///   [`Policy::Overflow`] fails at once and writes nothing
/// - **Read**: waits for data, returns end of stream once the producer has
///   closed and the ring is drained
/// - **Mark/Reset**: the consumer can rewind to a mark within a declared
///   read-ahead limit
/// - **Close**: each side closes independently; data written before the
///   producer closes stays readable
///
/// # Example
///
/// ```
/// use markring::CircularBuffer;
/// use std::thread;
///
/// let buf = CircularBuffer::<u32>::new(4, true);
///
/// thread::scope(|s| {
///     s.spawn(|| {
///         for i in 0..10 {
///             buf.producer().write_one(i).unwrap();
///         }
///         buf.producer().close().unwrap();
///     });
///
///     let mut items = Vec::new();
///     while let Some(item) = buf.consumer().read_one().unwrap() {
///         items.push(item);
///     }
///     assert_eq!(items, (0..10).collect::<Vec<_>>());
/// });
/// ```
pub struct CircularBuffer<T> {
    shared: Arc<Shared<T>>,
    producer: Producer<T>,
    consumer: Consumer<T>,
}

impl<T: Copy + Default> CircularBuffer<T> {
    /// Creates a buffer holding up to `capacity - 1` units.
    ///
    /// With `blocking` set, a full ring makes writers wait; otherwise writes
    /// that do not fit fail with [`Error::Overflow`](crate::Error::Overflow).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, blocking: bool) -> Self {
        Self::build(capacity, Policy::from_blocking(blocking))
    }

    /// Creates a buffer from a [`Config`], rejecting invalid configs instead
    /// of panicking.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.capacity, config.policy))
    }

    fn build(capacity: usize, policy: Policy) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(Ring::new(capacity)),
            readable: Condvar::new(),
            writable: Condvar::new(),
            policy,
        });
        debug!(capacity, %policy, "markring: buffer created");

        CircularBuffer {
            producer: Producer::new(Arc::clone(&shared)),
            consumer: Consumer::new(Arc::clone(&shared)),
            shared,
        }
    }
}

impl<T: Copy + Default> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::build(crate::config::DEFAULT_CAPACITY, Policy::Blocking)
    }
}

impl<T: Copy> CircularBuffer<T> {
    /// Returns the producer handle. Every call returns the same handle.
    pub fn producer(&self) -> &Producer<T> {
        &self.producer
    }

    /// Returns the consumer handle. Every call returns the same handle.
    pub fn consumer(&self) -> &Consumer<T> {
        &self.consumer
    }

    /// Gives up the buffer and returns both handles by value.
    pub fn into_split(self) -> (Producer<T>, Consumer<T>) {
        (self.producer, self.consumer)
    }

    /// Returns the backpressure policy chosen at construction.
    pub fn policy(&self) -> Policy {
        self.shared.policy
    }

    /// Returns the ring length. At most `capacity() - 1` units are buffered.
    pub fn capacity(&self) -> Result<usize> {
        Ok(self.shared.lock()?.len())
    }

    /// Returns the number of units the consumer can read without waiting.
    pub fn available_to_read(&self) -> Result<usize> {
        Ok(self.shared.lock()?.available())
    }

    /// Returns the number of units the producer can write without waiting.
    pub fn available_to_write(&self) -> Result<usize> {
        Ok(self.shared.lock()?.space_left())
    }

    /// Returns the number of already read units retained for a reset.
    pub fn marked_len(&self) -> Result<usize> {
        Ok(self.shared.lock()?.marked())
    }

    /// Discards all buffered data and any mark.
    ///
    /// This does not change the closed state of either side.
    pub fn clear(&self) -> Result<()> {
        let mut ring = self.shared.lock()?;
        ring.clear();
        debug!("markring: buffer cleared");
        self.shared.notify_all();
        Ok(())
    }
}
