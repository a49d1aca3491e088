//! The pull adapter: one record per call over bursty, chunked parsing.
//!
//! ```text
//!   AwaitPull ──queue non-empty──▶ Emit ──▶ AwaitPull
//!   AwaitPull ──queue empty──▶ Reading ──record queued──▶ Emit ──▶ AwaitPull
//!                              Reading ──end of input, queue empty──▶ Done
//!                              Reading ──read or tokenizer error──▶ Failed
//! ```
//!
//! Records already queued when an error is raised are still handed out; the
//! error is returned by the pull that finds the queue empty.
//!
//! `Reading` and `Emit` only exist inside a call; between calls the session
//! is in one of the three [`SessionState`]s.
//!
//! A single chunk may complete no record (it ended inside a quoted field),
//! one, or thousands. The completed records wait in the accumulator's queue,
//! and reads are only issued once that queue has been drained.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    Error,
    accumulator::RecordAccumulator,
    options::SessionOptions,
    queue::RecordQueue,
    record::{EmittedRecord, Record},
    source::ByteSource,
    tokenizer::{CsvCoreTokenizer, Tokenizer},
};

/// Where a session stands between pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next pull; more input may follow.
    AwaitPull,
    /// The source is exhausted. Queued records are still handed out.
    Done,
    /// An error was reported. Further pulls fail with
    /// [`Error::SessionFailed`].
    ///
    /// A session that hit an error mid-chunk stays in its previous state
    /// until the records completed before the error have been pulled.
    Failed,
}

/// Per-source state: tokenizer, read buffer, record queue and the slot for
/// the record most recently lent out.
#[derive(Debug)]
pub struct CsvSession<S, T = CsvCoreTokenizer> {
    source: S,
    tokenizer: T,
    read_buffer: Box<[u8]>,
    accumulator: RecordAccumulator,
    emitted: Option<Record>,
    terminator: [u8; 1],
    state: SessionState,
    failure: Option<Error>,
}

impl<S: ByteSource, T: Tokenizer> CsvSession<S, T> {
    /// Set up a session over `source`.
    ///
    /// The read buffer and queue are allocated here, once, and reused for
    /// the life of the session.
    pub fn new(source: S, tokenizer: T, options: SessionOptions) -> Result<Self, Error> {
        let chunk_size = options.chunk_size.max(1);
        let mut read_buffer = Vec::new();
        read_buffer
            .try_reserve_exact(chunk_size)
            .map_err(crate::CapacityError::from)?;
        read_buffer.resize(chunk_size, 0);

        let queue = RecordQueue::new(options.initial_queue_capacity, options.max_queued_records);
        tracing::debug!(
            chunk_size,
            separator = options.separator,
            terminator = options.terminator,
            "opened csv session"
        );
        Ok(Self {
            source,
            tokenizer,
            read_buffer: read_buffer.into_boxed_slice(),
            accumulator: RecordAccumulator::new(
                options.separator,
                options.initial_record_capacity,
                queue,
            ),
            emitted: None,
            terminator: [options.terminator],
            state: SessionState::AwaitPull,
            failure: None,
        })
    }

    /// Pull the next record.
    ///
    /// Returns `Ok(None)` once the input is exhausted. The returned record
    /// borrows the session; its buffer is released at the top of the next
    /// pull (or when the session is closed).
    pub fn next_record(&mut self) -> Result<Option<EmittedRecord<'_>>, Error> {
        self.emitted = None;
        let Some(record) = self.pull()? else {
            return Ok(None);
        };
        let record = self.emitted.insert(record);
        Ok(Some(EmittedRecord {
            payload: record.as_bytes(),
            terminator: &self.terminator,
            separator: self.accumulator.separator(),
        }))
    }

    /// Pull the next record, handing its buffer over to the caller.
    pub fn next_owned(&mut self) -> Result<Option<Record>, Error> {
        self.emitted = None;
        self.pull()
    }

    /// Iterate owned records. The iterator ends after the first error.
    pub fn into_records(self) -> Records<S, T> {
        Records {
            session: self,
            finished: false,
        }
    }

    /// Current state between pulls.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Terminator reported with each record.
    #[must_use]
    pub fn terminator(&self) -> &[u8] {
        &self.terminator
    }

    /// Byte joining the fields of each payload.
    #[must_use]
    pub fn separator(&self) -> u8 {
        self.accumulator.separator()
    }

    /// Completed records waiting to be pulled.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.accumulator.queued()
    }

    /// The source being read.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Release everything the session owns, including records that were
    /// parsed but never pulled. Returns how many of those were discarded.
    pub fn close(mut self) -> usize {
        self.emitted = None;
        let discarded = self.accumulator.discard();
        tracing::debug!(discarded, state = ?self.state, "closed csv session");
        discarded
    }

    /// Queued records always go out first. An error raised while feeding is
    /// held back until the records completed before it have been pulled.
    fn pull(&mut self) -> Result<Option<Record>, Error> {
        loop {
            if let Some(record) = self.accumulator.pop_front() {
                return Ok(Some(record));
            }
            if let Some(err) = self.failure.take() {
                self.state = SessionState::Failed;
                return Err(err);
            }
            match self.state {
                SessionState::Failed => return Err(Error::SessionFailed),
                SessionState::Done => return Ok(None),
                SessionState::AwaitPull => {}
            }
            if let Err(err) = self.read_and_feed() {
                tracing::warn!(
                    error = %err,
                    queued = self.accumulator.queued(),
                    "csv session failed"
                );
                self.failure = Some(err);
            }
        }
    }

    /// One turn of the parse-feed loop: read a chunk and tokenize exactly
    /// the bytes read.
    fn read_and_feed(&mut self) -> Result<(), Error> {
        let n = self.source.read(&mut self.read_buffer)?;
        if n == 0 {
            tracing::debug!("end of input");
            self.state = SessionState::Done;
            self.tokenizer.finish(&mut self.accumulator)?;
            return Ok(());
        }

        let Some(chunk) = self.read_buffer.get(..n) else {
            return Err(Error::Read(crate::SourceError::new(
                crate::SourceError::UNKNOWN_CODE,
                "source reported more bytes than requested",
            )));
        };
        self.tokenizer.feed(chunk, &mut self.accumulator)?;
        tracing::trace!(
            bytes = n,
            queued = self.accumulator.queued(),
            "fed chunk"
        );
        Ok(())
    }
}

/// Owning iterator over a session's records.
#[derive(Debug)]
pub struct Records<S, T = CsvCoreTokenizer> {
    session: CsvSession<S, T>,
    finished: bool,
}

impl<S, T> Records<S, T> {
    /// Give the session back, e.g. to inspect its state or close it.
    pub fn into_session(self) -> CsvSession<S, T> {
        self.session
    }
}

impl<S: ByteSource, T: Tokenizer> Iterator for Records<S, T> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.session.next_owned() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
