//! Pull-based CSV record reader over an incremental, callback-driven
//! tokenizer.
//!
//! Bytes are read from a [`ByteSource`] one chunk at a time and pushed
//! through a [`Tokenizer`]. Field events are reassembled into records whose
//! fields are joined by a reserved separator byte, completed records wait in
//! a queue, and [`CsvSession::next_record`] hands them out one per call.
//!
//! ```rust
//! use csvpull::{CsvCoreTokenizer, CsvSession, SessionOptions, SliceSource};
//!
//! let options = SessionOptions {
//!     separator: b'|',
//!     ..Default::default()
//! };
//! let mut session =
//!     CsvSession::new(SliceSource::new(b"a,b\n\"c,d\",e\n"), CsvCoreTokenizer::default(), options)?;
//!
//! assert_eq!(session.next_record()?.unwrap().payload(), b"a|b");
//! assert_eq!(session.next_record()?.unwrap().payload(), b"c,d|e");
//! assert!(session.next_record()?.is_none());
//! # Ok::<(), csvpull::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod accumulator;
mod chunk_utils;
mod error;
mod input_parser;
mod options;
mod queue;
mod record;
mod session;
mod source;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use accumulator::RecordAccumulator;
pub use chunk_utils::{ChunkedSource, produce_chunks};
pub use error::{CapacityError, Error};
pub use input_parser::{CsvInputParser, InputParser};
pub use options::{
    DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_CAPACITY, DEFAULT_RECORD_CAPACITY, DEFAULT_SEPARATOR,
    SessionOptions,
};
pub use queue::RecordQueue;
pub use record::{EmittedRecord, Record};
pub use session::{CsvSession, Records, SessionState};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{ByteSource, SliceSource, SourceError};
pub use tokenizer::{
    CsvCoreTokenizer, CsvDialect, RecordEnd, RecordSink, TokenizeError, Tokenizer,
};
