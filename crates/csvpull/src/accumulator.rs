use core::mem;

use crate::{
    error::CapacityError,
    queue::RecordQueue,
    record::Record,
    tokenizer::{RecordEnd, RecordSink},
};

/// Reassembles tokenizer field events into records and queues the
/// completed ones.
///
/// Accumulation is session scoped: a record whose fields straddle several
/// chunks keeps growing here until its end is reported.
#[derive(Debug)]
pub struct RecordAccumulator {
    current: Record,
    queue: RecordQueue,
    separator: u8,
    initial_capacity: usize,
}

impl RecordAccumulator {
    /// An accumulator joining fields with `separator` and queueing into `queue`.
    #[must_use]
    pub fn new(separator: u8, initial_capacity: usize, queue: RecordQueue) -> Self {
        Self {
            current: Record::new(),
            queue,
            separator,
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Append one field to the record being built.
    pub fn append_field(&mut self, field: &[u8]) -> Result<(), CapacityError> {
        self.current
            .push_field(field, self.separator, self.initial_capacity)
    }

    /// Queue the current record and start a fresh, unallocated one.
    pub fn finish_record(&mut self) -> Result<(), CapacityError> {
        let record = mem::take(&mut self.current);
        self.queue.push_back(record)
    }

    /// Take the oldest completed record.
    pub fn pop_front(&mut self) -> Option<Record> {
        self.queue.pop_front()
    }

    /// Number of completed records waiting to be pulled.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// The record currently being built.
    #[must_use]
    pub fn pending(&self) -> &Record {
        &self.current
    }

    /// Byte placed between fields.
    #[must_use]
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Drop the queued records and the partial one; returns how many
    /// completed records were discarded.
    pub fn discard(&mut self) -> usize {
        self.current = Record::new();
        self.queue.clear()
    }
}

impl RecordSink for RecordAccumulator {
    fn on_field(&mut self, field: &[u8]) -> Result<(), CapacityError> {
        self.append_field(field)
    }

    fn on_record(&mut self, end: RecordEnd) -> Result<(), CapacityError> {
        if end == RecordEnd::EndOfInput {
            tracing::trace!(
                len = self.current.len(),
                "flushing record without trailing terminator"
            );
        }
        self.finish_record()
    }
}
