use alloc::{string::String, vec::Vec};

use crate::{
    ByteSource, CapacityError, CsvSession, Error, RecordEnd, RecordSink, SessionOptions,
    SourceError, TokenizeError, Tokenizer,
};

/// ASCII unit separator, used as both separator and terminator in tests.
pub(crate) const SEP: u8 = 0x1F;

pub(crate) fn options(chunk_size: usize) -> SessionOptions {
    SessionOptions {
        separator: SEP,
        terminator: SEP,
        chunk_size,
        ..Default::default()
    }
}

pub(crate) fn join(fields: &[&[u8]]) -> Vec<u8> {
    fields.join(&SEP)
}

/// Drain a session, copying out every payload.
pub(crate) fn collect_payloads<S: ByteSource, T: Tokenizer>(
    session: &mut CsvSession<S, T>,
) -> Result<Vec<Vec<u8>>, Error> {
    let mut out = Vec::new();
    while let Some(record) = session.next_record()? {
        out.push(record.payload().to_vec());
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Field(Vec<u8>),
    Record(RecordEnd),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Vec<Event>,
}

impl RecordingSink {
    pub(crate) fn take(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }
}

impl RecordSink for RecordingSink {
    fn on_field(&mut self, field: &[u8]) -> Result<(), CapacityError> {
        self.events.push(Event::Field(field.to_vec()));
        Ok(())
    }

    fn on_record(&mut self, end: RecordEnd) -> Result<(), CapacityError> {
        self.events.push(Event::Record(end));
        Ok(())
    }
}

pub(crate) fn field(bytes: &[u8]) -> Event {
    Event::Field(bytes.to_vec())
}

/// Wraps a source and counts the reads issued against it.
#[derive(Debug)]
pub(crate) struct CountingSource<S> {
    pub(crate) inner: S,
    pub(crate) reads: usize,
}

impl<S> CountingSource<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner, reads: 0 }
    }
}

impl<S: ByteSource> ByteSource for CountingSource<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        self.reads += 1;
        self.inner.read(buf)
    }
}

/// Tokenizer that rejects any input.
#[derive(Debug)]
pub(crate) struct RejectingTokenizer(pub(crate) &'static str);

impl Tokenizer for RejectingTokenizer {
    fn feed<S: RecordSink + ?Sized>(
        &mut self,
        _input: &[u8],
        _sink: &mut S,
    ) -> Result<(), TokenizeError> {
        Err(TokenizeError::Malformed(String::from(self.0)))
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, _sink: &mut S) -> Result<(), TokenizeError> {
        Ok(())
    }
}
