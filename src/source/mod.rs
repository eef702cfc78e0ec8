//! Pull-based byte sources feeding the lookahead window.
//!
//! - [`ByteSource`] - "next byte or end of stream"
//! - [`ReaderSource`] - Adapter for any [`std::io::Read`]
//!
//! In-memory input can be passed directly as [`Bytes`] or `&[u8]`.

use std::io::{ErrorKind, Read};

use bytes::{Buf, Bytes};

use crate::error::SegmentError;

/// Size of the staging slab used by [`ReaderSource`].
const READ_SLAB_SIZE: usize = 8 * 1024;

/// A source that yields one byte at a time.
///
/// `Ok(None)` signals end of stream. Sources are polled repeatedly; once
/// exhausted they should keep returning `Ok(None)`.
pub trait ByteSource {
    /// Returns the next byte, or `None` at end of stream.
    fn next_byte(&mut self) -> Result<Option<u8>, SegmentError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<Option<u8>, SegmentError> {
        (**self).next_byte()
    }
}

impl ByteSource for Bytes {
    fn next_byte(&mut self) -> Result<Option<u8>, SegmentError> {
        if self.has_remaining() {
            Ok(Some(self.get_u8()))
        } else {
            Ok(None)
        }
    }
}

impl ByteSource for &[u8] {
    fn next_byte(&mut self) -> Result<Option<u8>, SegmentError> {
        match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }
}

/// Adapts a [`std::io::Read`] into a [`ByteSource`].
///
/// Reads are staged through an 8 KiB slab so the reader is not hit once per
/// byte. Interrupted reads are retried.
///
/// # Example
///
/// ```
/// use segtag::{ByteSource, ReaderSource};
/// use std::io::Cursor;
///
/// let mut source = ReaderSource::new(Cursor::new(b"ab".to_vec()));
/// assert_eq!(source.next_byte()?, Some(b'a'));
/// assert_eq!(source.next_byte()?, Some(b'b'));
/// assert_eq!(source.next_byte()?, None);
/// # Ok::<(), segtag::SegmentError>(())
/// ```
pub struct ReaderSource<R> {
    reader: R,
    slab: Box<[u8]>,
    pos: usize,
    len: usize,
    finished: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            slab: vec![0u8; READ_SLAB_SIZE].into_boxed_slice(),
            pos: 0,
            len: 0,
            finished: false,
        }
    }

    /// Returns the wrapped reader, dropping any staged bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> Result<(), SegmentError> {
        loop {
            match self.reader.read(&mut self.slab) {
                Ok(0) => {
                    self.finished = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, SegmentError> {
        if self.pos == self.len {
            if self.finished {
                return Ok(None);
            }
            self.refill()?;
            if self.finished {
                return Ok(None);
            }
        }
        let byte = self.slab[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "gone"))
        }
    }

    struct InterruptOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::new(ErrorKind::Interrupted, "again"));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_bytes_source() {
        let mut source = Bytes::from_static(b"xy");
        assert_eq!(source.next_byte().unwrap(), Some(b'x'));
        assert_eq!(source.next_byte().unwrap(), Some(b'y'));
        assert_eq!(source.next_byte().unwrap(), None);
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_slice_source() {
        let data = [1u8, 2, 3];
        let mut source = &data[..];
        assert_eq!(source.next_byte().unwrap(), Some(1));
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_reader_source_spans_slabs() {
        let data: Vec<u8> = (0..20_000).map(|i| (i % 251) as u8).collect();
        let mut source = ReaderSource::new(Cursor::new(data.clone()));
        let mut out = Vec::new();
        while let Some(b) = source.next_byte().unwrap() {
            out.push(b);
        }
        assert_eq!(out, data);
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_reader_source_propagates_errors() {
        let mut source = ReaderSource::new(FailingReader);
        assert!(matches!(source.next_byte(), Err(SegmentError::Io(_))));
    }

    #[test]
    fn test_reader_source_retries_interrupted() {
        let mut source = ReaderSource::new(InterruptOnce {
            interrupted: false,
            inner: Cursor::new(vec![7u8]),
        });
        assert_eq!(source.next_byte().unwrap(), Some(7));
        assert_eq!(source.next_byte().unwrap(), None);
    }
}
