use crate::{
    Error,
    options::SessionOptions,
    session::CsvSession,
    source::ByteSource,
    tokenizer::{CsvCoreTokenizer, CsvDialect},
};

/// What a host registers to have sources handed to it.
///
/// The host asks [`can_take`](InputParser::can_take) first and only then
/// hands the source over with
/// [`take_control_of`](InputParser::take_control_of).
pub trait InputParser<S: ByteSource> {
    /// The session handed back for a source.
    type Session;

    /// Name the parser is registered under.
    fn name(&self) -> &'static str;

    /// `false` (not an error) for a missing or closed source.
    fn can_take(&self, source: Option<&S>) -> bool {
        source.is_some_and(ByteSource::is_open)
    }

    /// Build a session for `source`.
    ///
    /// An invalid handle is not a failure: there is simply nothing to take
    /// over, and `Ok(None)` is returned.
    fn take_control_of(&self, source: Option<S>) -> Result<Option<Self::Session>, Error>;
}

/// The `"csv"` input parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvInputParser {
    /// Settings for every session this parser opens.
    pub options: SessionOptions,
    /// Quoting and delimiting rules for the tokenizer.
    pub dialect: CsvDialect,
}

impl CsvInputParser {
    /// Registration name.
    pub const NAME: &'static str = "csv";

    /// A parser opening sessions with `options` and `dialect`.
    #[must_use]
    pub fn new(options: SessionOptions, dialect: CsvDialect) -> Self {
        Self { options, dialect }
    }
}

impl<S: ByteSource> InputParser<S> for CsvInputParser {
    type Session = CsvSession<S>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn take_control_of(&self, source: Option<S>) -> Result<Option<Self::Session>, Error> {
        let Some(source) = source.filter(ByteSource::is_open) else {
            tracing::debug!("no open source to take over");
            return Ok(None);
        };
        CsvSession::new(source, CsvCoreTokenizer::new(self.dialect), self.options).map(Some)
    }
}
