//! Structured-format sniffers.
//!
//! A sniffer looks at the front of the lookahead window and either confirms a
//! structured profile with the exact byte length of the structured unit, or
//! declines. Sniffers are tried in registration order; the first confirmation
//! wins.
//!
//! - [`FormatSniffer`] - The sniffer interface
//! - [`SnifferRegistry`] - Ordered collection consulted by the classifier
//! - [`WaveSniffer`] - PCM WAVE container

pub(crate) mod wave;

use std::fmt;

pub use wave::WaveSniffer;

use crate::buffer::LookaheadBuffer;
use crate::profile::ContentProfile;

/// A confirmed structured run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed {
    /// The structured profile to commit.
    pub profile: ContentProfile,
    /// Total run length in bytes, header included. Never zero.
    pub length: u32,
}

/// Detector for one structured format.
///
/// Implementations must only confirm when every field they rely on is
/// buffered: [`LookaheadBuffer::read_uint`] returns 0 past the window, which
/// is indistinguishable from a real zero.
pub trait FormatSniffer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Inspects the window starting at offset 0.
    fn sniff(&self, window: &LookaheadBuffer) -> Option<Sniffed>;
}

/// Ordered list of sniffers.
///
/// # Example
///
/// ```
/// use segtag::{SnifferRegistry, WaveSniffer};
///
/// let mut registry = SnifferRegistry::empty();
/// registry.register(WaveSniffer);
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["wave"]);
/// ```
pub struct SnifferRegistry {
    sniffers: Vec<Box<dyn FormatSniffer>>,
}

impl SnifferRegistry {
    /// Creates a registry with no sniffers; only text and binary are produced.
    pub fn empty() -> Self {
        Self {
            sniffers: Vec::new(),
        }
    }

    /// Creates a registry with every built-in sniffer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(WaveSniffer);
        registry
    }

    /// Appends a sniffer at the lowest priority.
    pub fn register<S: FormatSniffer + 'static>(&mut self, sniffer: S) -> &mut Self {
        self.sniffers.push(Box::new(sniffer));
        self
    }

    /// Returns the first confirmation, if any.
    pub fn sniff(&self, window: &LookaheadBuffer) -> Option<Sniffed> {
        self.sniffers.iter().find_map(|sniffer| {
            let found = sniffer.sniff(window)?;
            debug_assert!(found.length > 0, "{} confirmed an empty run", sniffer.name());
            if found.length == 0 {
                return None;
            }
            tracing::debug!(
                sniffer = sniffer.name(),
                profile = %found.profile,
                length = found.length,
                "structured format confirmed"
            );
            Some(found)
        })
    }

    /// Returns the number of registered sniffers.
    pub fn len(&self) -> usize {
        self.sniffers.len()
    }

    /// Returns true if no sniffers are registered.
    pub fn is_empty(&self) -> bool {
        self.sniffers.is_empty()
    }

    /// Iterates over sniffer names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sniffers.iter().map(|s| s.name())
    }
}

impl Default for SnifferRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SnifferRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
