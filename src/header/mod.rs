//! Run headers and their on-wire codec.
//!
//! - [`RunHeader`] - A classified run: profile plus length
//! - [`encode_table`] / [`decode_table`] - Concatenated header lists

mod codec;

pub use codec::{MAX_HEADER_LEN, RunHeader, decode_table, encode_table};
