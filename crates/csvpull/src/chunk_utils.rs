use alloc::{collections::VecDeque, vec::Vec};

use crate::source::{ByteSource, SourceError};

/// Split `payload` into approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    if payload.is_empty() {
        return Vec::new();
    }
    payload.chunks(payload.len().div_ceil(parts)).collect()
}

/// Source that replays pre-split chunks, one read per chunk at most.
///
/// A read never spans two chunks, so the split points are exactly where the
/// session sees chunk boundaries (given a large enough read buffer). Empty
/// chunks are skipped, since an empty read means end-of-input.
#[derive(Debug, Clone)]
pub struct ChunkedSource<'a> {
    chunks: VecDeque<&'a [u8]>,
    error: Option<SourceError>,
    open: bool,
}

impl<'a> ChunkedSource<'a> {
    /// Replay `chunks` in order, then report end-of-input.
    pub fn new(chunks: impl IntoIterator<Item = &'a [u8]>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
            error: None,
            open: true,
        }
    }

    /// Fail with `error` once the chunks run out, instead of reporting
    /// end-of-input.
    #[must_use]
    pub fn failing_with(mut self, error: SourceError) -> Self {
        self.error = Some(error);
        self
    }

    /// A source whose handle is already closed.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            chunks: VecDeque::new(),
            error: Some(SourceError::closed()),
            open: false,
        }
    }
}

impl<'a> ByteSource for ChunkedSource<'a> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        while let Some(front) = self.chunks.front_mut() {
            let chunk: &'a [u8] = *front;
            if chunk.is_empty() {
                self.chunks.pop_front();
                continue;
            }
            let n = buf.len().min(chunk.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            *front = &chunk[n..];
            return Ok(n);
        }
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(0),
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
