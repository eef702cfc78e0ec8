//! Fixed-capacity circular byte queue with random access.

use std::fmt;

use crate::error::SegmentError;
use crate::source::ByteSource;

/// A bounded FIFO of bytes with O(1) push, pop, and indexed peek.
///
/// Storage is allocated once; `head` and `len` move around it modulo the
/// capacity, so nothing is ever shifted or reallocated.
///
/// # Example
///
/// ```
/// use segtag::LookaheadBuffer;
///
/// let mut buf = LookaheadBuffer::new(4);
/// let mut input: &[u8] = b"abcdef";
/// assert_eq!(buf.fill(&mut input)?, 4);
/// assert_eq!(buf.at(3), b'd');
/// assert_eq!(buf.pop_front(), Some(b'a'));
/// assert_eq!(buf.fill(&mut input)?, 1);
/// assert_eq!(buf.at(3), b'e');
/// # Ok::<(), segtag::SegmentError>(())
/// ```
#[derive(Clone)]
pub struct LookaheadBuffer {
    data: Box<[u8]>,
    head: usize,
    len: usize,
}

impl LookaheadBuffer {
    /// Creates an empty buffer holding at most `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "lookahead capacity must be non-zero");
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Tops the buffer up from `source` until it is full or the source ends.
    ///
    /// Returns the number of bytes appended. This is a single bounded pass;
    /// it does not wait for a source to produce more data later. On a source
    /// error, bytes appended before the failure stay buffered.
    pub fn fill<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<usize, SegmentError> {
        let mut added = 0;
        while !self.is_full() {
            match source.next_byte()? {
                Some(byte) => {
                    self.push_back(byte);
                    added += 1;
                }
                None => break,
            }
        }
        Ok(added)
    }

    /// Appends a byte. Returns false if the buffer is full.
    pub fn push_back(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = self.wrap(self.len);
        self.data[tail] = byte;
        self.len += 1;
        true
    }

    /// Removes and returns the frontmost byte.
    pub fn pop_front(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.data[self.head];
        self.head = self.wrap(1);
        self.len -= 1;
        Some(byte)
    }

    /// Returns the frontmost byte without removing it.
    pub fn front(&self) -> Option<u8> {
        (self.len > 0).then(|| self.data[self.head])
    }

    /// Returns the byte at `offset` from the front.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.size()`.
    #[inline]
    pub fn at(&self, offset: usize) -> u8 {
        assert!(
            offset < self.len,
            "lookahead offset {} out of bounds (size {})",
            offset,
            self.len
        );
        self.data[self.wrap(offset)]
    }

    /// Reads `width` bytes starting at `pos` as an unsigned integer.
    ///
    /// Returns 0 when the range is not fully buffered, so callers must check
    /// `size()` before trusting a zero.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not in `1..=4`.
    pub fn read_uint(&self, pos: usize, width: usize, big_endian: bool) -> u32 {
        assert!(
            (1..=4).contains(&width),
            "integer width {} not in 1..=4",
            width
        );
        let Some(end) = pos.checked_add(width) else {
            return 0;
        };
        if end > self.len {
            return 0;
        }
        let mut value = 0u32;
        if big_endian {
            for i in pos..end {
                value = (value << 8) | u32::from(self.at(i));
            }
        } else {
            for i in (pos..end).rev() {
                value = (value << 8) | u32::from(self.at(i));
            }
        }
        value
    }

    /// Iterates over buffered bytes front to back.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| self.data[self.wrap(i)])
    }

    /// Drops all buffered bytes.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Returns the number of buffered bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if no more bytes fit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    #[inline]
    fn wrap(&self, offset: usize) -> usize {
        let idx = self.head + offset;
        if idx >= self.data.len() {
            idx - self.data.len()
        } else {
            idx
        }
    }
}

impl fmt::Debug for LookaheadBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookaheadBuffer")
            .field("size", &self.len)
            .field("capacity", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_to_capacity() {
        let mut buf = LookaheadBuffer::new(8);
        let data = [0xAAu8; 20];
        let mut src = &data[..];
        assert_eq!(buf.fill(&mut src).unwrap(), 8);
        assert!(buf.is_full());
        assert_eq!(src.len(), 12);

        // Full buffer pulls nothing more.
        assert_eq!(buf.fill(&mut src).unwrap(), 0);
        assert_eq!(src.len(), 12);
    }

    #[test]
    fn test_fill_stops_at_end_of_source() {
        let mut buf = LookaheadBuffer::new(8);
        let mut src: &[u8] = b"abc";
        assert_eq!(buf.fill(&mut src).unwrap(), 3);
        assert_eq!(buf.size(), 3);
        assert!(!buf.is_full());
    }

    #[test]
    fn test_wraparound() {
        let mut buf = LookaheadBuffer::new(4);
        let mut src: &[u8] = b"abcdefgh";
        buf.fill(&mut src).unwrap();
        assert_eq!(buf.pop_front(), Some(b'a'));
        assert_eq!(buf.pop_front(), Some(b'b'));
        buf.fill(&mut src).unwrap();
        assert_eq!(buf.iter().collect::<Vec<_>>(), b"cdef");
        assert_eq!(buf.at(0), b'c');
        assert_eq!(buf.at(3), b'f');
        assert_eq!(buf.front(), Some(b'c'));
    }

    #[test]
    fn test_pop_empty() {
        let mut buf = LookaheadBuffer::new(2);
        assert_eq!(buf.pop_front(), None);
        assert_eq!(buf.front(), None);
    }

    #[test]
    fn test_push_back_full() {
        let mut buf = LookaheadBuffer::new(1);
        assert!(buf.push_back(1));
        assert!(!buf.push_back(2));
        assert_eq!(buf.size(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_at_out_of_bounds_panics() {
        let mut buf = LookaheadBuffer::new(4);
        buf.push_back(1);
        buf.at(1);
    }

    #[test]
    fn test_read_uint_endianness() {
        let mut buf = LookaheadBuffer::new(8);
        let mut src: &[u8] = &[0x12, 0x34, 0x56, 0x78, 0x9A];
        buf.fill(&mut src).unwrap();
        assert_eq!(buf.read_uint(0, 4, true), 0x1234_5678);
        assert_eq!(buf.read_uint(0, 4, false), 0x7856_3412);
        assert_eq!(buf.read_uint(3, 2, true), 0x789A);
        assert_eq!(buf.read_uint(4, 1, false), 0x9A);
    }

    #[test]
    fn test_read_uint_past_end_is_zero() {
        let mut buf = LookaheadBuffer::new(8);
        let mut src: &[u8] = &[0xFF, 0xFF, 0xFF];
        buf.fill(&mut src).unwrap();
        assert_eq!(buf.read_uint(0, 4, true), 0);
        assert_eq!(buf.read_uint(2, 2, false), 0);
        assert_eq!(buf.read_uint(usize::MAX, 4, true), 0);
    }

    #[test]
    fn test_clear() {
        let mut buf = LookaheadBuffer::new(4);
        let mut src: &[u8] = b"ab";
        buf.fill(&mut src).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4);
    }
}
