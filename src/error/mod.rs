//! Error types for segtag.

use std::fmt;

/// Errors that can occur while filling the lookahead window or handling run headers.
///
/// Classification itself never fails; every window ends up as some profile.
/// These errors cover input I/O, configuration, and corrupt persisted headers.
#[derive(Debug)]
pub enum SegmentError {
    /// An I/O error occurred while reading input data.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A header carried a profile tag outside the known range, or a caller
    /// tried to persist a control-only profile.
    UnknownProfile {
        /// The offending tag (`None` for the end-of-stream sentinel).
        tag: Option<u8>,
    },

    /// A header was cut short.
    Truncated {
        /// Bytes the header needs.
        needed: usize,
        /// Bytes that were available.
        available: usize,
    },

    /// A run header with zero length was constructed or decoded.
    ZeroLength,
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::Io(e) => write!(f, "io error: {}", e),
            SegmentError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            SegmentError::UnknownProfile { tag: Some(tag) } => {
                write!(f, "unknown profile tag: {}", tag)
            }
            SegmentError::UnknownProfile { tag: None } => {
                write!(f, "end-of-stream is a control signal and has no profile tag")
            }
            SegmentError::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated run header: need {} bytes, have {}",
                    needed, available
                )
            }
            SegmentError::ZeroLength => write!(f, "run length must be non-zero"),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SegmentError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SegmentError {
    fn from(e: std::io::Error) -> Self {
        SegmentError::Io(e)
    }
}
