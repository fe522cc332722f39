//! Raw bit fields of a 4-byte frame header
//!
//! ```text
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//! ```
//!
//! A = sync (11 bits), B = version, C = layer, D = protection bit,
//! E = bitrate index, F = sample rate index, G = padding, H = private,
//! I = channel mode, J = mode extension, K = copyright, L = original,
//! M = emphasis.
//!
//! [`RawFields`] holds the codes exactly as they appear in the stream,
//! with no table lookups and no validation. It is what
//! [`Header::decode`](super::header::Header::decode) starts from, and it is
//! also the inspection view for patterns that fail to decode.

use serde::Serialize;

/// The 11-bit frame sync pattern (all ones)
pub const SYNC_PATTERN: u16 = 0x7FF;

/// Number of bytes in a frame header
pub const HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RawFields {
    pub sync: u16,
    pub version: u8,
    pub layer: u8,
    /// Raw protection bit: `false` means a CRC follows the header
    pub protection_bit: bool,
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    pub padding: bool,
    pub private: bool,
    pub channel_mode: u8,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: u8,
}

impl RawFields {
    /// Split a big-endian 32-bit header into its fields
    pub fn from_bits(bits: u32) -> Self {
        Self {
            sync: (bits >> 21) as u16,
            version: ((bits >> 19) & 0b11) as u8,
            layer: ((bits >> 17) & 0b11) as u8,
            protection_bit: (bits >> 16) & 0b1 != 0,
            bitrate_index: ((bits >> 12) & 0b1111) as u8,
            sample_rate_index: ((bits >> 10) & 0b11) as u8,
            padding: (bits >> 9) & 0b1 != 0,
            private: (bits >> 8) & 0b1 != 0,
            channel_mode: ((bits >> 6) & 0b11) as u8,
            mode_extension: ((bits >> 4) & 0b11) as u8,
            copyright: (bits >> 3) & 0b1 != 0,
            original: (bits >> 2) & 0b1 != 0,
            emphasis: (bits & 0b11) as u8,
        }
    }

    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self::from_bits(u32::from_be_bytes(bytes))
    }

    /// Pack the fields back into a 32-bit header. Out-of-range codes are
    /// masked to their field width.
    pub fn to_bits(&self) -> u32 {
        (u32::from(self.sync & SYNC_PATTERN) << 21)
            | (u32::from(self.version & 0b11) << 19)
            | (u32::from(self.layer & 0b11) << 17)
            | (u32::from(self.protection_bit) << 16)
            | (u32::from(self.bitrate_index & 0b1111) << 12)
            | (u32::from(self.sample_rate_index & 0b11) << 10)
            | (u32::from(self.padding) << 9)
            | (u32::from(self.private) << 8)
            | (u32::from(self.channel_mode & 0b11) << 6)
            | (u32::from(self.mode_extension & 0b11) << 4)
            | (u32::from(self.copyright) << 3)
            | (u32::from(self.original) << 2)
            | u32::from(self.emphasis & 0b11)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        self.to_bits().to_be_bytes()
    }

    pub fn sync_valid(&self) -> bool {
        self.sync == SYNC_PATTERN
    }
}
