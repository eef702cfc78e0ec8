//! Configuration for classification behavior.
//!
//! - [`ClassifierConfig`] - Lookahead window size, text threshold, run coalescing

use crate::error::SegmentError;

/// Default lookahead window capacity (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Default minimum number of clean text bytes before a window is called text.
pub const DEFAULT_TEXT_THRESHOLD: usize = 100;

/// Default cap on a merged run produced by [`Segmenter`](crate::Segmenter) (16 MiB).
pub const DEFAULT_MAX_COALESCED_LENGTH: u32 = 16 * 1024 * 1024;

/// Configuration for the content classifier.
///
/// A window is classified as text when its clean-text prefix reaches
/// `min(buffered bytes, text_threshold)`. Short windows at the tail of the
/// stream therefore only need to be clean end to end.
///
/// The buffer capacity bounds memory use regardless of stream length; it is
/// fixed once a [`Detector`](crate::Detector) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifierConfig {
    buffer_capacity: usize,
    text_threshold: usize,
    coalesce: bool,
    max_coalesced_length: u32,
}

impl ClassifierConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if either value is zero or the threshold does not fit
    /// in the window.
    pub fn new(buffer_capacity: usize, text_threshold: usize) -> Result<Self, SegmentError> {
        if buffer_capacity == 0 {
            return Err(SegmentError::InvalidConfig {
                message: "buffer capacity must be non-zero",
            });
        }

        if text_threshold == 0 {
            return Err(SegmentError::InvalidConfig {
                message: "text threshold must be non-zero",
            });
        }

        if text_threshold > buffer_capacity {
            return Err(SegmentError::InvalidConfig {
                message: "text threshold cannot exceed buffer capacity",
            });
        }

        Ok(Self {
            buffer_capacity,
            text_threshold,
            coalesce: true,
            max_coalesced_length: DEFAULT_MAX_COALESCED_LENGTH,
        })
    }

    /// Sets the lookahead buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the text-length decision threshold.
    pub fn with_text_threshold(mut self, threshold: usize) -> Self {
        self.text_threshold = threshold;
        self
    }

    /// Enables or disables merging of adjacent same-profile runs in
    /// [`Segmenter`](crate::Segmenter).
    pub fn with_coalesce(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    /// Caps how long a merged run may grow. Single committed runs (such as a
    /// whole WAVE file) are never split to honor this.
    pub fn with_max_coalesced_length(mut self, length: u32) -> Self {
        self.max_coalesced_length = length;
        self
    }

    /// Returns the lookahead buffer capacity.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Returns the text-length decision threshold.
    pub fn text_threshold(&self) -> usize {
        self.text_threshold
    }

    /// Returns whether adjacent text or binary runs are merged.
    pub fn coalesce(&self) -> bool {
        self.coalesce
    }

    /// Returns the merged-run cap.
    pub fn max_coalesced_length(&self) -> u32 {
        self.max_coalesced_length
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.max_coalesced_length == 0 {
            return Err(SegmentError::InvalidConfig {
                message: "max coalesced length must be non-zero",
            });
        }
        Self::new(self.buffer_capacity, self.text_threshold).map(|_| ())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
            coalesce: true,
            max_coalesced_length: DEFAULT_MAX_COALESCED_LENGTH,
        }
    }
}
