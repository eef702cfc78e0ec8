//! Content profiles assigned to classified runs.

use std::fmt;

use crate::error::SegmentError;

/// Largest tag value representable in a run header (low 6 bits of byte 0).
pub const MAX_PROFILE_TAG: u8 = 0x3F;

/// The classification tag for a run.
///
/// `Text`, `Binary`, and the structured formats are persisted in run headers
/// with fixed tags. `EndOfStream` is a control signal returned by
/// [`Detector::detect`](crate::Detector::detect) when nothing is buffered; it
/// never reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentProfile {
    /// Well-formed UTF-8 without control bytes.
    Text,
    /// Anything not claimed by another profile.
    Binary,
    /// An uncompressed PCM WAVE file, header included.
    StructuredAudio,
    /// No more input. Control signal only.
    EndOfStream,
}

impl ContentProfile {
    /// Every profile that can appear in a run header, in tag order.
    pub const PERSISTED: [ContentProfile; 3] = [
        ContentProfile::Text,
        ContentProfile::Binary,
        ContentProfile::StructuredAudio,
    ];

    /// Returns the wire tag, or `None` for `EndOfStream`.
    pub const fn tag(self) -> Option<u8> {
        match self {
            ContentProfile::Text => Some(0),
            ContentProfile::Binary => Some(1),
            ContentProfile::StructuredAudio => Some(2),
            ContentProfile::EndOfStream => None,
        }
    }

    /// Maps a wire tag back to its profile.
    ///
    /// Tags that are reserved but not yet assigned are rejected rather than
    /// reinterpreted.
    pub fn from_tag(tag: u8) -> Result<Self, SegmentError> {
        match tag {
            0 => Ok(ContentProfile::Text),
            1 => Ok(ContentProfile::Binary),
            2 => Ok(ContentProfile::StructuredAudio),
            _ => Err(SegmentError::UnknownProfile { tag: Some(tag) }),
        }
    }

    /// Returns true for profiles produced by a format sniffer.
    pub fn is_structured(self) -> bool {
        matches!(self, ContentProfile::StructuredAudio)
    }

    /// Returns a short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ContentProfile::Text => "text",
            ContentProfile::Binary => "binary",
            ContentProfile::StructuredAudio => "wave",
            ContentProfile::EndOfStream => "eof",
        }
    }
}

impl fmt::Display for ContentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
