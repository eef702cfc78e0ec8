//! Bounded lookahead window.
//!
//! The classifier buffers unread input here so it can inspect bytes ahead of
//! the current position before committing to a profile. Memory is fixed at
//! construction, independent of stream length.

mod ring;

pub use ring::LookaheadBuffer;
