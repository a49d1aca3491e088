use alloc::{vec, vec::Vec};
use core::fmt;

use csv_core::{ReadFieldResult, Reader, ReaderBuilder};

use super::{RecordEnd, RecordSink, TokenizeError, Tokenizer};
use crate::error::CapacityError;

const INITIAL_FIELD_CAPACITY: usize = 64;

/// Quoting and delimiting rules handed to `csv-core`.
///
/// # Default
///
/// RFC 4180: comma delimited, `"` quoted with doubled quotes as escapes, no
/// comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsvDialect {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote byte.
    pub quote: u8,
    /// Escape byte inside quoted fields, in addition to (or instead of)
    /// doubled quotes.
    pub escape: Option<u8>,
    /// Whether a doubled quote inside a quoted field is a literal quote.
    pub double_quote: bool,
    /// When `false`, quote bytes are ordinary field content.
    pub quoting: bool,
    /// Lines starting with this byte are skipped.
    pub comment: Option<u8>,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
            double_quote: true,
            quoting: true,
            comment: None,
        }
    }
}

impl CsvDialect {
    fn build(&self) -> Reader {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote)
            .quoting(self.quoting)
            .comment(self.comment)
            .build()
    }
}

/// [`Tokenizer`] backed by the `csv-core` state machine.
///
/// `csv-core` writes unescaped field bytes into a caller buffer and may stop
/// mid-field when a chunk runs out. The partial field is kept in `field`
/// until its end is seen, so sinks only ever receive whole fields.
pub struct CsvCoreTokenizer {
    reader: Reader,
    field: Vec<u8>,
    field_len: usize,
}

impl CsvCoreTokenizer {
    /// A tokenizer for `dialect`.
    #[must_use]
    pub fn new(dialect: CsvDialect) -> Self {
        Self {
            reader: dialect.build(),
            field: vec![0; INITIAL_FIELD_CAPACITY],
            field_len: 0,
        }
    }

    /// Run csv-core over `input`, reporting fields as they complete.
    ///
    /// csv-core reads an empty slice as EOF, so a mid-stream feed must stop
    /// as soon as its chunk is used up. Only `finish` hands it `&[]`.
    fn drive<S: RecordSink + ?Sized>(
        &mut self,
        mut input: &[u8],
        sink: &mut S,
        end: RecordEnd,
    ) -> Result<(), TokenizeError> {
        let at_eof = end == RecordEnd::EndOfInput;
        loop {
            let (result, nin, nout) = self
                .reader
                .read_field(input, &mut self.field[self.field_len..]);
            input = &input[nin..];
            self.field_len += nout;
            match result {
                ReadFieldResult::InputEmpty | ReadFieldResult::End => return Ok(()),
                ReadFieldResult::OutputFull => self.grow_field()?,
                ReadFieldResult::Field { record_end } => {
                    sink.on_field(&self.field[..self.field_len])?;
                    self.field_len = 0;
                    if record_end {
                        sink.on_record(end)?;
                    }
                }
            }
            if input.is_empty() && !at_eof {
                return Ok(());
            }
        }
    }

    fn grow_field(&mut self) -> Result<(), CapacityError> {
        let len = self.field.len();
        self.field.try_reserve_exact(len)?;
        self.field.resize(len * 2, 0);
        Ok(())
    }
}

impl Default for CsvCoreTokenizer {
    fn default() -> Self {
        Self::new(CsvDialect::default())
    }
}

impl fmt::Debug for CsvCoreTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvCoreTokenizer")
            .field("pending_field_len", &self.field_len)
            .finish_non_exhaustive()
    }
}

impl Tokenizer for CsvCoreTokenizer {
    fn feed<S: RecordSink + ?Sized>(
        &mut self,
        input: &[u8],
        sink: &mut S,
    ) -> Result<(), TokenizeError> {
        if input.is_empty() {
            return Ok(());
        }
        self.drive(input, sink, RecordEnd::Terminator)
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), TokenizeError> {
        self.drive(&[], sink, RecordEnd::EndOfInput)
    }
}
