//! Error types for ring buffer operations.

use std::io;

/// Result type alias for markring.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for markring operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The producer handle has been closed.
    #[error("markring: writer closed")]
    WriteClosed,

    /// The consumer handle has been closed (the sink is gone).
    #[error("markring: reader closed")]
    ReadClosed,

    /// The write does not fit and the buffer does not block. Nothing was
    /// written; the caller may retry once the consumer has drained data.
    #[error("markring: overflow: cannot write {requested} units, {space} free")]
    Overflow { requested: usize, space: usize },

    /// The requested read-ahead limit cannot be retained by the ring.
    #[error("markring: invalid mark: read-ahead limit {limit} must be below {max}")]
    InvalidMark { limit: usize, max: usize },

    /// A wait was aborted because another thread panicked while holding
    /// the buffer lock.
    #[error("markring: wait interrupted")]
    Interrupted,

    /// Invalid configuration.
    #[error("markring: invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true if the error is caused by either side having closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::WriteClosed | Error::ReadClosed)
    }

    /// Returns true if the error is a flow-control signal rather than a
    /// failure.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Overflow { .. })
    }
}

impl<G> From<std::sync::PoisonError<G>> for Error {
    fn from(_: std::sync::PoisonError<G>) -> Self {
        Error::Interrupted
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        // io::ErrorKind::Interrupted is retried by std helpers, so a poisoned
        // lock maps to Other.
        let kind = match e {
            Error::WriteClosed => io::ErrorKind::NotConnected,
            Error::ReadClosed => io::ErrorKind::BrokenPipe,
            Error::Overflow { .. } => io::ErrorKind::WouldBlock,
            Error::InvalidMark { .. } | Error::InvalidConfig(_) => io::ErrorKind::InvalidInput,
            Error::Interrupted => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}
