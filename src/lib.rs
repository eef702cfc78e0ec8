//! segtag
//!
//! Streaming content-type segmentation for compressors.
//!
//! `segtag` splits a byte stream into runs and tags each run with a content
//! profile so a downstream compressor can pick a model per run:
//!
//! - text (well-formed UTF-8 without control bytes)
//! - binary
//! - structured formats, currently uncompressed PCM WAVE
//!
//! Each run's profile and length persist as a 2 to 5 byte [`RunHeader`].
//!
//! The crate intentionally:
//! - does NOT compress anything
//! - does NOT decode characters, only checks well-formedness
//! - does NOT parse containers beyond a minimal header sniff
//! - does NOT manage files, paths, or threads
//!
//! Memory is bounded by the lookahead window (64 KiB by default) for the
//! classifier itself, however long the input.
//!
//! # Low-level
//!
//! ```
//! use segtag::{ContentProfile, Detector, RunHeader};
//!
//! let mut detector = Detector::default();
//! let mut input: &[u8] = b"\x00\x01just some words";
//! let mut table = Vec::new();
//!
//! loop {
//!     detector.fill(&mut input)?;
//!     let profile = detector.detect();
//!     if profile == ContentProfile::EndOfStream {
//!         break;
//!     }
//!     RunHeader::new(profile, detector.remaining())?.encode(&mut table);
//!     while detector.remaining() > 0 {
//!         let _byte = detector.read();
//!     }
//! }
//! assert_eq!(table, [0x01, 0x01, 0x01, 0x01, 0x00, 0x0F]);
//! # Ok::<(), segtag::SegmentError>(())
//! ```
//!
//! # Iterator
//!
//! ```no_run
//! use std::fs::File;
//! use segtag::{Detector, ReaderSource, SegmentError};
//!
//! fn main() -> Result<(), SegmentError> {
//!     let file = File::open("data.bin")?;
//!     for run in Detector::default().segment(ReaderSource::new(file)) {
//!         let run = run?;
//!         println!("{}", run);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod detector;
mod error;
mod header;
mod profile;
mod run;
mod sniff;
mod source;
mod text;

//
// Public surface
//

pub use buffer::LookaheadBuffer;
pub use config::{
    ClassifierConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_COALESCED_LENGTH,
    DEFAULT_TEXT_THRESHOLD,
};
pub use detector::{Detector, Segmenter};
pub use error::SegmentError;
pub use header::{MAX_HEADER_LEN, RunHeader, decode_table, encode_table};
pub use profile::{ContentProfile, MAX_PROFILE_TAG};
pub use run::Run;
pub use sniff::{FormatSniffer, Sniffed, SnifferRegistry, WaveSniffer};
pub use source::{ByteSource, ReaderSource};
pub use text::{TextValidityTracker, is_forbidden};
