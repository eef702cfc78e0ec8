//! Compact variable-width run header.
//!
//! ```text
//! byte 0:  [ n-1 : 2 bits ][ profile tag : 6 bits ]
//! byte 1..=n: length, little-endian, n = 1..=4
//! ```
//!
//! `n` is the fewest bytes that hold the length. The high bits store `n - 1`,
//! so a 4-byte length is `0b11` and never spills into the tag bits.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::SegmentError;
use crate::profile::{ContentProfile, MAX_PROFILE_TAG};

const COUNT_SHIFT: u32 = 6;

/// Longest possible encoded header.
pub const MAX_HEADER_LEN: usize = 5;

/// One classified run.
///
/// `length` is always in `1..=u32::MAX` and `profile` is never
/// [`ContentProfile::EndOfStream`]; [`RunHeader::new`] enforces both.
///
/// # Example
///
/// ```
/// use segtag::{ContentProfile, RunHeader};
///
/// let header = RunHeader::new(ContentProfile::Text, 300)?;
/// let mut wire = Vec::new();
/// assert_eq!(header.encode(&mut wire), 3);
/// assert_eq!(wire, [0x40, 0x2C, 0x01]);
///
/// let (decoded, used) = RunHeader::decode(&mut &wire[..])?;
/// assert_eq!((decoded, used), (header, 3));
/// # Ok::<(), segtag::SegmentError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunHeader {
    profile: ContentProfile,
    length: u32,
}

impl RunHeader {
    /// Creates a header, rejecting empty runs and the end-of-stream sentinel.
    pub fn new(profile: ContentProfile, length: u32) -> Result<Self, SegmentError> {
        if profile.tag().is_none() {
            return Err(SegmentError::UnknownProfile { tag: None });
        }
        if length == 0 {
            return Err(SegmentError::ZeroLength);
        }
        Ok(Self { profile, length })
    }

    /// Returns the run's profile.
    pub fn profile(&self) -> ContentProfile {
        self.profile
    }

    /// Returns the run's length in bytes.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Number of little-endian bytes needed for the length.
    fn length_bytes(&self) -> usize {
        match self.length {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => 4,
        }
    }

    /// Returns the encoded size: one tag byte plus 1 to 4 length bytes.
    pub fn encoded_len(&self) -> usize {
        1 + self.length_bytes()
    }

    /// Writes the header and returns the number of bytes written (2 to 5).
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> usize {
        let n = self.length_bytes();
        // Constructor guarantees a persisted profile.
        let tag = self.profile.tag().unwrap_or_default();
        debug_assert!(tag <= MAX_PROFILE_TAG);
        buf.put_u8(tag | (((n - 1) as u8) << COUNT_SHIFT));
        buf.put_uint_le(u64::from(self.length), n);
        1 + n
    }

    /// Reads one header and returns it with the number of bytes consumed.
    ///
    /// Unknown tags and zero lengths are format errors; a buffer that ends
    /// mid-header is [`SegmentError::Truncated`] and nothing is consumed.
    pub fn decode<B: Buf>(buf: &mut B) -> Result<(Self, usize), SegmentError> {
        if !buf.has_remaining() {
            return Err(SegmentError::Truncated {
                needed: 1,
                available: 0,
            });
        }
        let first = buf.chunk()[0];
        let n = usize::from(first >> COUNT_SHIFT) + 1;
        if buf.remaining() < 1 + n {
            return Err(SegmentError::Truncated {
                needed: 1 + n,
                available: buf.remaining(),
            });
        }
        let profile = ContentProfile::from_tag(first & MAX_PROFILE_TAG)?;

        buf.advance(1);
        let length = buf.get_uint_le(n) as u32;
        if length == 0 {
            return Err(SegmentError::ZeroLength);
        }
        Ok((Self { profile, length }, 1 + n))
    }
}

/// Encodes a header list back to back.
pub fn encode_table(headers: &[RunHeader]) -> Bytes {
    let mut buf = BytesMut::with_capacity(headers.iter().map(RunHeader::encoded_len).sum());
    for header in headers {
        header.encode(&mut buf);
    }
    buf.freeze()
}

/// Decodes a header list produced by [`encode_table`].
pub fn decode_table(mut data: Bytes) -> Result<Vec<RunHeader>, SegmentError> {
    let mut headers = Vec::new();
    while data.has_remaining() {
        match RunHeader::decode(&mut data) {
            Ok((header, _)) => headers.push(header),
            Err(e) => {
                tracing::warn!(index = headers.len(), error = %e, "corrupt run header table");
                return Err(e);
            }
        }
    }
    Ok(headers)
}
