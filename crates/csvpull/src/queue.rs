use alloc::vec::Vec;
use core::mem;

use crate::{error::CapacityError, record::Record};

/// Circular FIFO of completed records.
///
/// One slot is always left vacant so that `begin == end` means empty. A full
/// queue doubles its capacity on the next push; with a `max_len` configured,
/// pushing past that bound is reported instead.
///
/// Push and pop move the record descriptor only; the payload bytes are never
/// copied.
#[derive(Debug)]
pub struct RecordQueue {
    slots: Vec<Record>,
    begin: usize,
    end: usize,
    max_len: Option<usize>,
}

impl RecordQueue {
    /// A queue holding `capacity` records before it grows, never more than
    /// `max_len` if one is given.
    #[must_use]
    pub fn new(capacity: usize, max_len: Option<usize>) -> Self {
        let max_len = max_len.map(|max| max.max(1));
        let capacity = match max_len {
            Some(max) => capacity.clamp(1, max),
            None => capacity.max(1),
        };
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.resize_with(capacity + 1, Record::new);
        Self {
            slots,
            begin: 0,
            end: 0,
            max_len,
        }
    }

    /// Append a record, growing the queue if it is full.
    pub fn push_back(&mut self, record: Record) -> Result<(), CapacityError> {
        if self.len() == self.capacity() {
            self.grow()?;
        }
        self.slots[self.end] = record;
        self.end = (self.end + 1) % self.slots.len();
        Ok(())
    }

    /// Remove the oldest record.
    pub fn pop_front(&mut self) -> Option<Record> {
        if self.is_empty() {
            return None;
        }
        let record = mem::take(&mut self.slots[self.begin]);
        self.begin = (self.begin + 1) % self.slots.len();
        Some(record)
    }

    /// Whether no record is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Number of queued records.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.end + self.slots.len() - self.begin) % self.slots.len()
    }

    /// Records the queue holds before it has to grow.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Drop every queued record, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let mut dropped = 0;
        while self.pop_front().is_some() {
            dropped += 1;
        }
        self.begin = 0;
        self.end = 0;
        dropped
    }

    fn grow(&mut self) -> Result<(), CapacityError> {
        let capacity = self.capacity();
        let mut new_capacity = capacity.saturating_mul(2);
        if let Some(max) = self.max_len {
            if capacity >= max {
                return Err(CapacityError::QueueOverflow { capacity });
            }
            new_capacity = new_capacity.min(max);
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(new_capacity + 1)?;
        while let Some(record) = self.pop_front() {
            slots.push(record);
        }
        let len = slots.len();
        slots.resize_with(new_capacity + 1, Record::new);

        tracing::trace!(from = capacity, to = new_capacity, "grew record queue");
        self.slots = slots;
        self.begin = 0;
        self.end = len;
        Ok(())
    }
}
