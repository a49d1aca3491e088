/// `"\31"`: the byte hosts conventionally configure as their field separator
/// when consuming records from this adapter.
pub const DEFAULT_SEPARATOR: u8 = 0o31;
/// One mebibyte per read.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
/// Bytes reserved for a record when its first field arrives.
pub const DEFAULT_RECORD_CAPACITY: usize = 100;
/// Records queued before the queue first grows.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Per-session configuration of the pull adapter.
///
/// The separator and terminator are session state rather than process-wide
/// constants, so concurrent sessions may use different bytes.
///
/// # Examples
///
/// ```rust
/// use csvpull::SessionOptions;
///
/// let options = SessionOptions {
///     separator: 0x1F,
///     terminator: 0x1F,
///     chunk_size: 64 * 1024,
///     ..Default::default()
/// };
/// assert_eq!(options.initial_record_capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Byte inserted between the fields of a record payload.
    ///
    /// The host must split fields on this same byte; the adapter cannot
    /// reconfigure the host for it.
    ///
    /// # Default
    ///
    /// [`DEFAULT_SEPARATOR`]
    pub separator: u8,

    /// Byte reported out of band with every record. It is never part of the
    /// payload.
    ///
    /// # Default
    ///
    /// [`DEFAULT_SEPARATOR`], so one reserved byte serves both roles.
    pub terminator: u8,

    /// Maximum number of bytes requested from the source per read. Clamped
    /// to at least 1.
    ///
    /// # Default
    ///
    /// [`DEFAULT_CHUNK_SIZE`]
    pub chunk_size: usize,

    /// Capacity allocated for a record on its first field. Clamped to at
    /// least 1.
    ///
    /// # Default
    ///
    /// [`DEFAULT_RECORD_CAPACITY`]
    pub initial_record_capacity: usize,

    /// Records the queue holds before it first grows. Clamped to at least 1.
    ///
    /// # Default
    ///
    /// [`DEFAULT_QUEUE_CAPACITY`]
    pub initial_queue_capacity: usize,

    /// Upper bound on queued records. A chunk that completes more records
    /// than this fails the session with
    /// [`CapacityError::QueueOverflow`](crate::CapacityError::QueueOverflow).
    ///
    /// # Default
    ///
    /// `None`: the queue grows as needed.
    pub max_queued_records: Option<usize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            terminator: DEFAULT_SEPARATOR,
            chunk_size: DEFAULT_CHUNK_SIZE,
            initial_record_capacity: DEFAULT_RECORD_CAPACITY,
            initial_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_queued_records: None,
        }
    }
}
