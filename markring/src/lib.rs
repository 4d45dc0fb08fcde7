//! Bounded producer/consumer ring buffer with mark/reset.
//!
//! A [`CircularBuffer<T>`] connects exactly one writer thread to exactly one
//! reader thread through a fixed-size ring. It hands out two capability
//! handles:
//!
//! - [`Producer<T>`]: appends units, then closes
//! - [`Consumer<T>`]: reads, skips, marks and rewinds, then closes
//!
//! # Backpressure
//!
//! The [`Policy`] is fixed at construction:
//!
//! - [`Policy::Blocking`]: a producer waits until the consumer frees space
//! - [`Policy::Overflow`]: a write that does not fit fails with
//!   [`Error::Overflow`] and writes nothing
//!
//! ```
//! use markring::{CircularBuffer, Error};
//!
//! let buf = CircularBuffer::<u8>::new(4, false);
//! buf.producer().write(&[1, 2, 3]).unwrap(); // one slot stays free
//! assert!(matches!(buf.producer().write_one(4), Err(Error::Overflow { .. })));
//! assert_eq!(buf.available_to_read().unwrap(), 3);
//! ```
//!
//! # Mark and Reset
//!
//! The consumer can mark a position and rewind to it, as long as it has not
//! read more than the declared read-ahead limit since. Retained units keep
//! their ring space until the mark is dropped.
//!
//! ```
//! use markring::CircularBuffer;
//!
//! let buf = CircularBuffer::<char>::new(16, true);
//! buf.producer().write_text("peek").unwrap();
//!
//! buf.consumer().mark(2).unwrap();
//! assert_eq!(buf.consumer().read_one().unwrap(), Some('p'));
//! buf.consumer().reset().unwrap();
//! assert_eq!(buf.consumer().read_one().unwrap(), Some('p'));
//! ```
//!
//! # Closing
//!
//! Each side closes on its own:
//!
//! - `Producer::close()`: buffered data stays readable, then reads report
//!   end of stream
//! - `Consumer::close()`: any later producer operation fails with
//!   [`Error::ReadClosed`]
//!
//! # Bytes and Characters
//!
//! The [`bytes`] module adds [`ByteBuffer`] with `std::io::Read`/`Write` on
//! its handles and [`CharBuffer`] with `std::fmt::Write`.

pub mod bytes;
mod circular_buffer;
mod config;
mod consumer;
mod error;
mod producer;
mod ring;

pub use bytes::{ByteBuffer, CharBuffer};
pub use circular_buffer::CircularBuffer;
pub use config::{Config, DEFAULT_CAPACITY, Policy};
pub use consumer::Consumer;
pub use error::{Error, Result};
pub use producer::Producer;
