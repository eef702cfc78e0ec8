//! Incremental text validity tracking.
//!
//! - [`TextValidityTracker`] - Byte-at-a-time UTF-8 well-formedness state machine
//! - [`is_forbidden`] - Control bytes that rule out text

mod utf8;

pub use utf8::{TextValidityTracker, is_forbidden};
