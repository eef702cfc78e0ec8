//! Core classification engine - Detector with fill/detect/read API.
//!
//! The detector owns the lookahead window and decides, one run at a time,
//! what the bytes at the front of the window are:
//!
//! - `fill()` - Top the window up from a [`ByteSource`]
//! - `detect()` - Commit a profile and run length for the front of the window
//! - `read()` - Drain one byte of the committed run
//!
//! # Example
//!
//! ```
//! use segtag::{ContentProfile, Detector};
//!
//! let mut detector = Detector::default();
//! let mut input: &[u8] = b"plain ascii is text once the window is clean end to end";
//! detector.fill(&mut input)?;
//!
//! assert_eq!(detector.detect(), ContentProfile::Text);
//! let len = detector.remaining();
//! for _ in 0..len {
//!     detector.read();
//! }
//! assert!(detector.empty());
//! # Ok::<(), segtag::SegmentError>(())
//! ```

use crate::buffer::LookaheadBuffer;
use crate::config::ClassifierConfig;
use crate::error::SegmentError;
use crate::profile::ContentProfile;
use crate::sniff::SnifferRegistry;
use crate::source::ByteSource;
use crate::text::{TextValidityTracker, is_forbidden};

/// A streaming content classifier.
///
/// `Detector` holds a bounded lookahead window plus the run it has most
/// recently committed to. Callers alternate between [`detect`](Self::detect)
/// and [`read`](Self::read):
///
/// 1. `fill()` the window
/// 2. `detect()` to learn the profile; `remaining()` is the run length
/// 3. `read()` exactly that many bytes (refilling as needed)
/// 4. repeat until `empty()` after a fill
///
/// # Decision rule
///
/// The window is scanned from the front with a fresh
/// [`TextValidityTracker`], stopping at the first forbidden control byte or
/// encoding error. If the clean prefix (up to the last completed character)
/// reaches `min(window size, text_threshold)`, the prefix is a text run.
/// Otherwise each registered sniffer gets a chance to claim a structured
/// run. Failing that, a single byte is committed as binary, so text or a
/// structured format starting one byte later is found on the next call.
///
/// # Memory
///
/// Memory is fixed by [`ClassifierConfig::buffer_capacity`] no matter how long
/// the input is.
#[derive(Debug)]
pub struct Detector {
    buffer: LookaheadBuffer,
    sniffers: SnifferRegistry,
    profile: ContentProfile,
    remaining: u32,
    config: ClassifierConfig,
}

impl Detector {
    /// Creates a detector with the built-in sniffers.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; use
    /// [`ClassifierConfig::validate`] first when it comes from user input.
    ///
    /// # Example
    ///
    /// ```
    /// use segtag::{ClassifierConfig, Detector};
    ///
    /// let detector = Detector::new(ClassifierConfig::default());
    /// assert_eq!(detector.capacity(), 64 * 1024);
    /// ```
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_registry(config, SnifferRegistry::with_defaults())
    }

    /// Creates a detector with a custom sniffer registry.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn with_registry(config: ClassifierConfig, sniffers: SnifferRegistry) -> Self {
        if let Err(e) = config.validate() {
            panic!("{}", e);
        }
        Self {
            buffer: LookaheadBuffer::new(config.buffer_capacity()),
            sniffers,
            profile: ContentProfile::Binary,
            remaining: 0,
            config,
        }
    }

    /// Tops up the lookahead window. Returns the number of bytes added.
    pub fn fill<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<usize, SegmentError> {
        self.buffer.fill(source)
    }

    /// Returns true if nothing is buffered.
    #[inline]
    pub fn empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the number of buffered bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    /// Returns the window capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the buffered byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.size()`.
    #[inline]
    pub fn at(&self, offset: usize) -> u8 {
        self.buffer.at(offset)
    }

    /// Reads `width` (1 to 4) buffered bytes at `pos` as an unsigned integer.
    ///
    /// Returns 0 if the range is not fully buffered.
    pub fn read_bytes(&self, pos: usize, width: usize, big_endian: bool) -> u32 {
        self.buffer.read_uint(pos, width, big_endian)
    }

    /// Drains one byte of the committed run.
    ///
    /// Returns `None` only when the window is empty.
    ///
    /// # Panics
    ///
    /// Panics if the window is non-empty but no run is committed; call
    /// [`detect`](Self::detect) first.
    pub fn read(&mut self) -> Option<u8> {
        let byte = self.buffer.front()?;
        assert!(self.remaining > 0, "read() called with no committed run");
        self.remaining -= 1;
        self.buffer.pop_front();
        Some(byte)
    }

    /// Classifies the front of the window.
    ///
    /// While a committed run still has bytes to drain, the same profile is
    /// returned and nothing is rescanned. With nothing buffered and nothing
    /// committed, returns [`ContentProfile::EndOfStream`].
    pub fn detect(&mut self) -> ContentProfile {
        if self.remaining > 0 {
            return self.profile;
        }

        let total = self.buffer.size();
        if total == 0 {
            return ContentProfile::EndOfStream;
        }

        let text_length = self.scan_text();
        if text_length >= total.min(self.config.text_threshold()) {
            // Windows larger than 4 GiB commit in u32-sized pieces.
            return self.commit(
                ContentProfile::Text,
                u32::try_from(text_length).unwrap_or(u32::MAX),
            );
        }

        if let Some(found) = self.sniffers.sniff(&self.buffer) {
            return self.commit(found.profile, found.length);
        }

        self.commit(ContentProfile::Binary, 1)
    }

    /// Returns the length of the clean text prefix, ending at the last
    /// completed character.
    fn scan_text(&self) -> usize {
        let mut tracker = TextValidityTracker::new();
        let mut text_length = 0;
        for (i, byte) in self.buffer.iter().enumerate() {
            if is_forbidden(byte) {
                break;
            }
            tracker.update(byte);
            if tracker.err() {
                break;
            }
            if tracker.done() {
                text_length = i + 1;
            }
        }
        text_length
    }

    fn commit(&mut self, profile: ContentProfile, length: u32) -> ContentProfile {
        debug_assert!(length > 0);
        tracing::trace!(%profile, length, window = self.buffer.size(), "run committed");
        self.profile = profile;
        self.remaining = length;
        profile
    }

    /// Returns the most recently committed profile.
    pub fn profile(&self) -> ContentProfile {
        self.profile
    }

    /// Returns the bytes of the committed run not yet drained.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the configuration used by this detector.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Returns the sniffer registry.
    pub fn sniffers(&self) -> &SnifferRegistry {
        &self.sniffers
    }

    /// Forgets the rest of the committed run once input has ended short of it.
    pub(crate) fn abandon_run(&mut self) {
        debug_assert!(self.buffer.is_empty());
        self.remaining = 0;
    }

    /// Drops buffered bytes and any committed run, for reuse on a new stream.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.profile = ContentProfile::Binary;
        self.remaining = 0;
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::wave::wave_header;

    fn loaded(data: &[u8]) -> Detector {
        let mut detector = Detector::default();
        let mut src = data;
        detector.fill(&mut src).unwrap();
        detector
    }

    #[test]
    fn test_text_threshold() {
        let data = vec![b'a'; 150];
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 150);
    }

    #[test]
    fn test_forbidden_first_byte_is_binary() {
        let mut data = vec![b'a'; 300];
        data[0] = 0;
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Binary);
        assert_eq!(detector.remaining(), 1);
    }

    #[test]
    fn test_short_valid_run_is_binary() {
        let mut data = vec![b'x'; 10];
        data.extend(std::iter::repeat_n(0u8, 200));
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Binary);
        assert_eq!(detector.remaining(), 1);
    }

    #[test]
    fn test_text_stops_before_forbidden_byte() {
        let mut data = vec![b'y'; 120];
        data.push(0x01);
        data.extend_from_slice(&[b'y'; 50]);
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 120);
    }

    #[test]
    fn test_short_window_clean_end_to_end_is_text() {
        let mut detector = loaded(b"hello");
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 5);
    }

    #[test]
    fn test_incomplete_tail_character_excluded() {
        // 'é' cut after its lead byte; the window is otherwise clean.
        let mut data = vec![b'a'; 4];
        data.push(0xC3);
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Binary);

        let mut data = vec![b'a'; 150];
        data.push(0xC3);
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 150);
    }

    #[test]
    fn test_wave_commits_whole_chunk() {
        let mut data = wave_header(2, 16, 400);
        data.extend(std::iter::repeat_n(0u8, 400));
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::StructuredAudio);
        assert_eq!(detector.remaining(), 444);
    }

    #[test]
    fn test_empty_registry_falls_back_to_binary() {
        let mut data = wave_header(2, 16, 400);
        data.extend(std::iter::repeat_n(0u8, 400));
        let mut detector =
            Detector::with_registry(ClassifierConfig::default(), SnifferRegistry::empty());
        let mut src = &data[..];
        detector.fill(&mut src).unwrap();
        assert_eq!(detector.detect(), ContentProfile::Binary);
    }

    #[test]
    fn test_detect_sticky_while_draining() {
        let mut data = vec![b'q'; 150];
        data[0] = 0x02;
        let mut detector = loaded(&data);
        assert_eq!(detector.detect(), ContentProfile::Binary);
        assert_eq!(detector.read(), Some(0x02));
        // Run drained; the rest is clean text.
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 149);
        detector.read();
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 148);
    }

    #[test]
    fn test_empty_detect_is_end_of_stream() {
        let mut detector = Detector::default();
        assert_eq!(detector.detect(), ContentProfile::EndOfStream);
        assert_eq!(detector.remaining(), 0);
        assert_eq!(detector.read(), None);
    }

    #[test]
    #[should_panic(expected = "no committed run")]
    fn test_read_without_detect_panics() {
        let mut detector = loaded(b"abc");
        detector.read();
    }

    #[test]
    fn test_read_bytes() {
        let detector = loaded(b"RIFF\x10\x00\x00\x00");
        assert_eq!(detector.read_bytes(0, 4, true), 0x5249_4646);
        assert_eq!(detector.read_bytes(4, 4, false), 16);
        assert_eq!(detector.read_bytes(6, 4, false), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let config = ClassifierConfig::default().with_text_threshold(8);
        let mut detector = Detector::new(config);
        let mut data = b"abcdefgh".to_vec();
        data.extend_from_slice(&[0u8; 100]);
        let mut src = &data[..];
        detector.fill(&mut src).unwrap();
        assert_eq!(detector.detect(), ContentProfile::Text);
        assert_eq!(detector.remaining(), 8);
    }

    #[test]
    #[should_panic(expected = "invalid config")]
    fn test_invalid_config_panics() {
        Detector::new(ClassifierConfig::default().with_text_threshold(0));
    }

    #[test]
    fn test_reset() {
        let mut detector = loaded(b"some text");
        detector.detect();
        detector.reset();
        assert!(detector.empty());
        assert_eq!(detector.remaining(), 0);
    }
}
