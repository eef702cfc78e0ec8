//! PCM WAVE sniffer.
//!
//! Accepts the canonical 44-byte RIFF/WAVE layout:
//!
//! ```text
//! 0  "RIFF"          12 "fmt "          36 "data"
//! 4  riff size (LE)  16 16 (LE)         40 data size (LE)
//! 8  "WAVE"          20 format = 1      44 samples...
//!                    22 channels 1|2
//!                    24 sample rate
//!                    28 byte rate
//!                    32 block align
//!                    34 bits/sample
//! ```
//!
//! Four-character codes are compared as big-endian words; numeric fields are
//! little-endian.

use super::{FormatSniffer, Sniffed};
use crate::buffer::LookaheadBuffer;
use crate::profile::ContentProfile;

const RIFF: u32 = 0x5249_4646;
const WAVE: u32 = 0x5741_5645;
const FMT: u32 = 0x666D_7420;
const DATA: u32 = 0x6461_7461;

const PCM_FMT_SIZE: u32 = 16;
const PCM_FORMAT: u32 = 1;

/// Bytes preceding the sample payload.
pub(crate) const HEADER_LEN: usize = 44;

/// Sniffer for uncompressed PCM WAVE data.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveSniffer;

impl FormatSniffer for WaveSniffer {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn sniff(&self, w: &LookaheadBuffer) -> Option<Sniffed> {
        if w.size() < HEADER_LEN {
            return None;
        }
        if w.read_uint(0, 4, true) != RIFF || w.read_uint(8, 4, true) != WAVE {
            return None;
        }
        if w.read_uint(12, 4, true) != FMT || w.read_uint(16, 4, false) != PCM_FMT_SIZE {
            return None;
        }
        if w.read_uint(20, 2, false) != PCM_FORMAT {
            return None;
        }
        let channels = w.read_uint(22, 2, false);
        let bits = w.read_uint(34, 2, false);
        if !matches!(channels, 1 | 2) || !matches!(bits, 8 | 16 | 24 | 32) {
            return None;
        }
        if w.read_uint(36, 4, true) != DATA {
            return None;
        }
        let data_size = w.read_uint(40, 4, false);
        // Header plus payload must still fit a run header length.
        let length = data_size.checked_add(HEADER_LEN as u32)?;

        Some(Sniffed {
            profile: ContentProfile::StructuredAudio,
            length,
        })
    }
}

/// Builds a canonical PCM WAVE header.
#[cfg(test)]
pub(crate) fn wave_header(channels: u16, bits: u16, data_size: u32) -> Vec<u8> {
    let mut h = Vec::with_capacity(HEADER_LEN);
    h.extend_from_slice(b"RIFF");
    h.extend_from_slice(&data_size.wrapping_add(36).to_le_bytes());
    h.extend_from_slice(b"WAVEfmt ");
    h.extend_from_slice(&16u32.to_le_bytes());
    h.extend_from_slice(&1u16.to_le_bytes());
    h.extend_from_slice(&channels.to_le_bytes());
    h.extend_from_slice(&44_100u32.to_le_bytes());
    let block_align = channels * (bits / 8);
    h.extend_from_slice(&(44_100u32 * u32::from(block_align)).to_le_bytes());
    h.extend_from_slice(&block_align.to_le_bytes());
    h.extend_from_slice(&bits.to_le_bytes());
    h.extend_from_slice(b"data");
    h.extend_from_slice(&data_size.to_le_bytes());
    h
}
