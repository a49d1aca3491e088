use alloc::vec::Vec;
use core::fmt;

use bstr::ByteSlice;

use crate::error::CapacityError;

/// One complete row: its fields joined by the session separator byte.
///
/// A record with zero capacity has never been allocated; the buffer is
/// created lazily by the first field appended to it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Record {
    bytes: Vec<u8>,
    fields: usize,
}

impl Record {
    /// An unallocated, empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            fields: 0,
        }
    }

    /// The payload: fields joined by the separator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes allocated for the payload.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Whether a buffer has been allocated for this record.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.bytes.capacity() != 0
    }

    /// Number of fields appended so far.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Split the payload back into fields.
    ///
    /// A record with no fields yields a single empty slice, exactly like a
    /// record holding one empty field.
    pub fn fields(&self, separator: u8) -> impl Iterator<Item = &[u8]> {
        self.bytes.split(move |b| *b == separator)
    }

    /// Take the payload buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Append one field, preceded by `separator` unless it is the first.
    pub(crate) fn push_field(
        &mut self,
        field: &[u8],
        separator: u8,
        initial_capacity: usize,
    ) -> Result<(), CapacityError> {
        if !self.is_allocated() {
            self.bytes.try_reserve_exact(initial_capacity.max(1))?;
        }
        if self.fields > 0 {
            self.append(&[separator])?;
        }
        self.append(field)?;
        self.fields += 1;
        Ok(())
    }

    /// Growth doubles `max(capacity, incoming)`, which keeps reallocations
    /// logarithmic in the final record size.
    fn append(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        if self.bytes.len() + bytes.len() > self.bytes.capacity() {
            let new_capacity = 2 * self.bytes.capacity().max(bytes.len());
            self.bytes
                .try_reserve_exact(new_capacity - self.bytes.len())?;
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("bytes", &self.bytes.as_bstr())
            .field("fields", &self.fields)
            .finish()
    }
}

/// A record lent out by [`CsvSession::next_record`](crate::CsvSession::next_record).
///
/// The borrow ends at the next pull; the session releases the buffer then.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EmittedRecord<'a> {
    pub(crate) payload: &'a [u8],
    pub(crate) terminator: &'a [u8],
    pub(crate) separator: u8,
}

impl<'a> EmittedRecord<'a> {
    /// Fields joined by the separator, without the terminator.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The out-of-band terminator reported with every record of the session.
    #[must_use]
    pub fn terminator(&self) -> &'a [u8] {
        self.terminator
    }

    /// Length of [`terminator`](Self::terminator).
    #[must_use]
    pub fn terminator_len(&self) -> usize {
        self.terminator.len()
    }

    /// Split the payload back into fields.
    pub fn fields(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        let separator = self.separator;
        self.payload.split(move |b| *b == separator)
    }
}

impl fmt::Debug for EmittedRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmittedRecord")
            .field("payload", &self.payload.as_bstr())
            .field("terminator", &self.terminator.as_bstr())
            .finish()
    }
}
