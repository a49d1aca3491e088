//! The narrow seam between the pull adapter and whatever tokenizes CSV.
//!
//! A [`Tokenizer`] is push-style: it is handed raw bytes and reports what it
//! found through a [`RecordSink`], synchronously, before `feed` returns. It
//! may report zero, one or many fields and records per call, and it carries
//! partial fields across calls itself.
//!
//! Keeping the seam this small means the accumulator and queue can be driven
//! by synthetic events in tests, and a host can bring its own tokenizer.

mod csv;

use alloc::string::String;

pub use csv::{CsvCoreTokenizer, CsvDialect};
use thiserror::Error;

use crate::error::CapacityError;

/// Why a record ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEnd {
    /// A record terminator in the input.
    Terminator,
    /// The input ended without a trailing terminator.
    EndOfInput,
}

/// Receiver of tokenizer events.
pub trait RecordSink {
    /// A complete field. Fields of one record arrive in order.
    fn on_field(&mut self, field: &[u8]) -> Result<(), CapacityError>;

    /// The record whose fields were just reported is complete.
    fn on_record(&mut self, end: RecordEnd) -> Result<(), CapacityError>;
}

/// Why a tokenizer stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The sink could not make room for what was reported.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// The input is not valid for this tokenizer.
    #[error("{0}")]
    Malformed(String),
}

/// Incremental tokenizer driven one chunk at a time.
pub trait Tokenizer {
    /// Tokenize `input`, reporting every field and record that completes
    /// within it.
    fn feed<S: RecordSink + ?Sized>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizeError>;

    /// Signal end-of-input, flushing a trailing unterminated record.
    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), TokenizeError>;
}
