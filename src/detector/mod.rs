//! Classification engine for processing byte streams.
//!
//! - [`Detector`] - Lookahead window with `fill()`/`detect()`/`read()` API
//! - [`Segmenter`] - Iterator yielding classified runs from a source

mod engine;
mod iter;

pub use engine::Detector;
pub use iter::Segmenter;
