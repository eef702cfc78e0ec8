//! Run iterator - drives a [`Detector`] over a whole source.
//!
//! [`Segmenter`] does the fill/detect/read bookkeeping and yields one
//! [`Run`] per classified span, merging adjacent text or binary runs when
//! the configuration allows it.
//!
//! # Example
//!
//! ```
//! use segtag::{ContentProfile, Detector};
//!
//! let mut data = vec![0u8; 3];
//! data.extend_from_slice(&[b'a'; 200]);
//!
//! let runs = Detector::default().segment_bytes(data)?;
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].profile(), ContentProfile::Binary);
//! assert_eq!(runs[0].len(), 3);
//! assert_eq!(runs[1].profile(), ContentProfile::Text);
//! assert_eq!(runs[1].len(), 200);
//! # Ok::<(), segtag::SegmentError>(())
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::Detector;
use crate::error::SegmentError;
use crate::header::RunHeader;
use crate::profile::ContentProfile;
use crate::run::Run;
use crate::source::ByteSource;

impl Detector {
    /// Creates a run iterator over `source`.
    pub fn segment<S: ByteSource>(self, source: S) -> Segmenter<S> {
        Segmenter::new(self, source)
    }

    /// Segments an in-memory buffer.
    pub fn segment_bytes(self, data: impl Into<Bytes>) -> Result<Vec<Run>, SegmentError> {
        self.segment(data.into()).collect()
    }
}

/// An iterator that yields classified runs from a [`ByteSource`].
///
/// The lookahead window is topped up before every classification and
/// whenever it runs dry mid-run, so runs may be far longer than the window.
/// A structured run whose declared length overruns the input is cut at the
/// end of input.
///
/// With [`ClassifierConfig::coalesce`](crate::ClassifierConfig::coalesce)
/// set, consecutive text runs and consecutive binary runs merge up to
/// [`ClassifierConfig::max_coalesced_length`](crate::ClassifierConfig::max_coalesced_length).
/// Structured runs are always emitted alone.
pub struct Segmenter<S> {
    detector: Detector,
    source: S,
    offset: u64,
    finished: bool,
}

impl<S: ByteSource> Segmenter<S> {
    /// Creates a segmenter. The detector should be fresh or [`reset`](Detector::reset).
    pub fn new(detector: Detector, source: S) -> Self {
        Self {
            detector,
            source,
            offset: 0,
            finished: false,
        }
    }

    /// Returns the stream offset of the next run.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the underlying detector.
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Returns the detector and source.
    pub fn into_parts(self) -> (Detector, S) {
        (self.detector, self.source)
    }

    fn top_up(&mut self) -> Result<(), SegmentError> {
        self.detector.fill(&mut self.source)?;
        Ok(())
    }

    /// Whether another committed run of `profile` may join `current` bytes.
    fn can_merge(&self, profile: ContentProfile, current: usize) -> bool {
        let config = self.detector.config();
        config.coalesce()
            && !profile.is_structured()
            && current as u64 + u64::from(self.detector.remaining())
                <= u64::from(config.max_coalesced_length())
    }

    /// Drains the committed run into `out`, refilling as needed.
    fn drain(&mut self, out: &mut BytesMut) -> Result<(), SegmentError> {
        // Declared lengths are untrusted; reserve at most one window.
        let declared = self.detector.remaining() as usize;
        out.reserve(declared.min(self.detector.capacity()));
        while self.detector.remaining() > 0 {
            if self.detector.empty() {
                self.top_up()?;
            }
            match self.detector.read() {
                Some(byte) => out.put_u8(byte),
                None => {
                    tracing::debug!(
                        profile = %self.detector.profile(),
                        missing = self.detector.remaining(),
                        "input ended inside a committed run"
                    );
                    self.detector.abandon_run();
                }
            }
        }
        Ok(())
    }

    fn next_run(&mut self) -> Result<Option<Run>, SegmentError> {
        let mut data = BytesMut::new();
        let mut profile = None;

        loop {
            self.top_up()?;
            let next = self.detector.detect();
            if next == ContentProfile::EndOfStream {
                break;
            }
            match profile {
                None => profile = Some(next),
                Some(current) if current == next && self.can_merge(current, data.len()) => {}
                // Leave the committed run for the next call.
                Some(_) => break,
            }
            self.drain(&mut data)?;
            if next.is_structured() || !self.detector.config().coalesce() {
                break;
            }
        }

        let Some(profile) = profile else {
            return Ok(None);
        };
        // Merging is capped by a u32 config value and each committed run is u32-sized.
        debug_assert!(u32::try_from(data.len()).is_ok());
        let length = data.len() as u32;
        let run = Run {
            header: RunHeader::new(profile, length)?,
            offset: self.offset,
            data: data.freeze(),
        };
        self.offset = run.end();
        tracing::debug!(%profile, offset = run.offset, length, "run emitted");
        Ok(Some(run))
    }
}

impl<S: ByteSource> Iterator for Segmenter<S> {
    type Item = Result<Run, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_run() {
            Ok(Some(run)) => Some(Ok(run)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
