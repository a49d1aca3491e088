use alloc::{collections::TryReserveError, string::String};

use thiserror::Error;

use crate::{source::SourceError, tokenizer::TokenizeError};

/// Failure to make room for another byte or another record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// The allocator refused to grow a buffer.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    /// The queue is bounded and already holds `capacity` records.
    #[error("record queue overflow: {capacity} records already queued")]
    QueueOverflow {
        /// The configured maximum number of queued records.
        capacity: usize,
    },
}

/// Errors surfaced by [`CsvSession`](crate::CsvSession).
///
/// End-of-stream is not an error; it is reported as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte source failed.
    #[error("read failed: {0}")]
    Read(#[from] SourceError),
    /// A record or the record queue could not grow.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// The tokenizer rejected its input.
    #[error("tokenizer rejected input: {0}")]
    Malformed(String),
    /// The session already reported an error and cannot be pulled again.
    #[error("session already failed")]
    SessionFailed,
}

impl From<TokenizeError> for Error {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::Capacity(err) => Self::Capacity(err),
            TokenizeError::Malformed(reason) => Self::Malformed(reason),
        }
    }
}
