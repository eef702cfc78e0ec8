//! The Run type - a classified span of input with its bytes.

use std::fmt;

use bytes::Bytes;

use crate::header::RunHeader;
use crate::profile::ContentProfile;

/// A classified run produced by [`Segmenter`](crate::Segmenter).
///
/// `header.length()` always equals `data.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Profile and length, ready to persist.
    pub header: RunHeader,

    /// Offset of the first byte in the input stream.
    pub offset: u64,

    /// The run's bytes.
    pub data: Bytes,
}

impl Run {
    /// Returns the run's profile.
    pub fn profile(&self) -> ContentProfile {
        self.header.profile()
    }

    /// Returns the length of the run data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the run has no data. Never true for segmenter output.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the run as a range of stream offsets.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Splits the run into (header, data).
    pub fn into_parts(self) -> (RunHeader, Bytes) {
        (self.header, self.data)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run({}, {} bytes @ {})",
            self.profile(),
            self.len(),
            self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Run {
        Run {
            header: RunHeader::new(ContentProfile::Text, 5).unwrap(),
            offset: 100,
            data: Bytes::from_static(b"hello"),
        }
    }

    #[test]
    fn test_accessors() {
        let run = sample();
        assert_eq!(run.profile(), ContentProfile::Text);
        assert_eq!(run.len(), 5);
        assert!(!run.is_empty());
        assert_eq!(run.range(), 100..105);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "Run(text, 5 bytes @ 100)");
    }

    #[test]
    fn test_into_parts() {
        let (header, data) = sample().into_parts();
        assert_eq!(header.length() as usize, data.len());
    }
}
