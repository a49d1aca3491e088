//! Byte sources the pull adapter reads chunks from.

use alloc::{boxed::Box, string::String};

use thiserror::Error;

/// A failed read, carrying the source's error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct SourceError {
    /// Source-specific code, the OS error number for I/O sources.
    pub code: i32,
    /// Human-readable description.
    pub message: String,
}

impl SourceError {
    /// Code used when the source has no numeric code of its own.
    pub const UNKNOWN_CODE: i32 = -1;
    /// `EBADF`: the handle is closed.
    pub const CLOSED_CODE: i32 = 9;

    /// An error with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The error reported by a closed source.
    #[must_use]
    pub fn closed() -> Self {
        Self::new(Self::CLOSED_CODE, "source is closed")
    }
}

/// Blocking source of raw bytes.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes. `Ok(0)` means end-of-input.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;

    /// Whether the underlying handle is valid and open.
    fn is_open(&self) -> bool {
        true
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

/// In-memory source over a byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// A source yielding `data` then end-of-input.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let n = buf.len().min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}

#[cfg(feature = "std")]
mod io {
    use std::{
        io::{self, Read},
        string::ToString,
    };

    use super::{ByteSource, SourceError};

    /// Source over any [`std::io::Read`], such as a file or stdin.
    ///
    /// Once [`close`](IoSource::close)d the source reports itself as not open
    /// and every read fails with [`SourceError::CLOSED_CODE`].
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: Option<R>,
    }

    impl<R: Read> IoSource<R> {
        /// Wrap an open reader.
        pub fn new(reader: R) -> Self {
            Self {
                inner: Some(reader),
            }
        }

        /// Drop the reader, returning it if it was still open.
        pub fn close(&mut self) -> Option<R> {
            self.inner.take()
        }
    }

    impl<R: Read> ByteSource for IoSource<R> {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
            let reader = self.inner.as_mut().ok_or_else(SourceError::closed)?;
            reader.read(buf).map_err(SourceError::from)
        }

        fn is_open(&self) -> bool {
            self.inner.is_some()
        }
    }

    impl From<io::Error> for SourceError {
        fn from(err: io::Error) -> Self {
            let code = err.raw_os_error().unwrap_or(SourceError::UNKNOWN_CODE);
            SourceError::new(code, err.to_string())
        }
    }
}

#[cfg(feature = "std")]
pub use io::IoSource;
