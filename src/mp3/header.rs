//! MPEG audio frame header decoding
//!
//! MP3 frames start with a sync word (11 bits of 1s) followed by header info.
//! See [`bits`](super::bits) for the field layout. Decoding turns the raw
//! codes into a [`Header`], rejecting every reserved value with its own
//! [`DecodeError`] instead of falling back to a default.
//!
//! Unsynced input fails with [`DecodeError::NoSync`]. Callers that want to
//! look at such a pattern anyway can use [`RawFields`] directly.

use std::fmt;

use serde::Serialize;

use super::bits::{RawFields, HEADER_LEN};
use super::tables;
use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

impl MpegVersion {
    /// Version code `01` is reserved and yields `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code & 0b11 {
            0b00 => Some(MpegVersion::Mpeg25),
            0b10 => Some(MpegVersion::Mpeg2),
            0b11 => Some(MpegVersion::Mpeg1),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            MpegVersion::Mpeg25 => 0b00,
            MpegVersion::Mpeg2 => 0b10,
            MpegVersion::Mpeg1 => 0b11,
        }
    }
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpegVersion::Mpeg1 => write!(f, "MPEG 1"),
            MpegVersion::Mpeg2 => write!(f, "MPEG 2"),
            MpegVersion::Mpeg25 => write!(f, "MPEG 2.5"),
        }
    }
}

/// Audio layer. The wire code runs backwards: `11` is Layer I.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

impl Layer {
    /// Layer code `00` is reserved and yields `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code & 0b11 {
            0b01 => Some(Layer::Layer3),
            0b10 => Some(Layer::Layer2),
            0b11 => Some(Layer::Layer1),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Layer::Layer3 => 0b01,
            Layer::Layer2 => 0b10,
            Layer::Layer1 => 0b11,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Layer1 => write!(f, "Layer I"),
            Layer::Layer2 => write!(f, "Layer II"),
            Layer::Layer3 => write!(f, "Layer III"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl ChannelMode {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => ChannelMode::Stereo,
            0b01 => ChannelMode::JointStereo,
            0b10 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ChannelMode::Stereo => 0b00,
            ChannelMode::JointStereo => 0b01,
            ChannelMode::DualChannel => 0b10,
            ChannelMode::Mono => 0b11,
        }
    }

    /// Number of audio channels carried by a frame in this mode
    pub fn channels(self) -> u8 {
        match self {
            ChannelMode::Mono => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelMode::Stereo => write!(f, "Stereo"),
            ChannelMode::JointStereo => write!(f, "Joint Stereo"),
            ChannelMode::DualChannel => write!(f, "Dual Channel"),
            ChannelMode::Mono => write!(f, "Mono"),
        }
    }
}

/// Layer III joint-stereo coding flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ModeExtension {
    pub intensity_stereo: bool,
    pub ms_stereo: bool,
}

impl ModeExtension {
    pub fn from_code(code: u8) -> Self {
        Self {
            intensity_stereo: code & 0b01 != 0,
            ms_stereo: code & 0b10 != 0,
        }
    }

    pub fn code(self) -> u8 {
        u8::from(self.intensity_stereo) | (u8::from(self.ms_stereo) << 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Emphasis {
    None,
    Fifty15,
    /// Code `10`; carried through rather than rejected
    Reserved,
    CcittJ17,
}

impl Emphasis {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Emphasis::None,
            0b01 => Emphasis::Fifty15,
            0b10 => Emphasis::Reserved,
            _ => Emphasis::CcittJ17,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Emphasis::None => 0b00,
            Emphasis::Fifty15 => 0b01,
            Emphasis::Reserved => 0b10,
            Emphasis::CcittJ17 => 0b11,
        }
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emphasis::None => write!(f, "no emphasis"),
            Emphasis::Fifty15 => write!(f, "50/15 ms"),
            Emphasis::Reserved => write!(f, "reserved"),
            Emphasis::CcittJ17 => write!(f, "ITU-T J.17"),
        }
    }
}

/// A decoded frame header.
///
/// Only ever produced from a pattern whose sync bits matched, so
/// `sync_valid` is always `true` on a value returned by [`Header::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Header {
    pub sync_valid: bool,
    pub version: MpegVersion,
    pub layer: Layer,
    /// `true` when a 16-bit CRC follows the header
    pub error_protection: bool,
    /// 0 marks a free-format stream
    pub bitrate_kbps: u32,
    pub sample_rate_hz: u32,
    pub padding: bool,
    pub private: bool,
    pub channel_mode: ChannelMode,
    /// Present only for Layer III joint stereo
    pub mode_extension: Option<ModeExtension>,
    /// The 2-bit mode extension code as read, whatever the layer
    pub raw_mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: Emphasis,
}

impl Header {
    /// Decode a big-endian 32-bit frame header
    pub fn decode(bits: u32) -> Result<Self, DecodeError> {
        Self::from_raw(RawFields::from_bits(bits))
    }

    /// Decode the 4 header bytes as they appear in the stream
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Result<Self, DecodeError> {
        Self::from_raw(RawFields::from_bytes(bytes))
    }

    /// Validate and interpret already-extracted fields.
    ///
    /// Checks run in wire order: sync, version, layer, bitrate, sample rate.
    pub fn from_raw(raw: RawFields) -> Result<Self, DecodeError> {
        if !raw.sync_valid() {
            return Err(DecodeError::NoSync);
        }

        let version = MpegVersion::from_code(raw.version).ok_or(DecodeError::ReservedVersion)?;
        let layer = Layer::from_code(raw.layer).ok_or(DecodeError::ReservedLayer)?;

        let bitrate_kbps = tables::bitrate_kbps(version, layer, raw.bitrate_index)
            .ok_or(DecodeError::ReservedBitrate)?;
        let sample_rate_hz = tables::sample_rate_hz(version, raw.sample_rate_index)
            .ok_or(DecodeError::ReservedSampleRate)?;

        let channel_mode = ChannelMode::from_code(raw.channel_mode);
        let mode_extension = match (layer, channel_mode) {
            (Layer::Layer3, ChannelMode::JointStereo) => {
                Some(ModeExtension::from_code(raw.mode_extension))
            }
            _ => None,
        };

        Ok(Header {
            sync_valid: true,
            version,
            layer,
            error_protection: !raw.protection_bit,
            bitrate_kbps,
            sample_rate_hz,
            padding: raw.padding,
            private: raw.private,
            channel_mode,
            mode_extension,
            raw_mode_extension: raw.mode_extension,
            copyright: raw.copyright,
            original: raw.original,
            emphasis: Emphasis::from_code(raw.emphasis),
        })
    }

    pub fn is_free_format(&self) -> bool {
        self.bitrate_kbps == 0
    }

    pub fn channels(&self) -> u8 {
        self.channel_mode.channels()
    }

    /// PCM samples per channel encoded in one frame
    pub fn samples_per_frame(&self) -> u32 {
        match (self.version, self.layer) {
            (_, Layer::Layer1) => 384,
            (_, Layer::Layer2) => 1152,
            (MpegVersion::Mpeg1, Layer::Layer3) => 1152,
            (_, Layer::Layer3) => 576,
        }
    }

    /// Total frame length in bytes, header included. This is the distance
    /// to the next frame header.
    ///
    /// `None` for free-format frames, whose length the header does not
    /// declare.
    pub fn frame_size(&self) -> Option<u32> {
        if self.is_free_format() {
            return None;
        }

        let bitrate = self.bitrate_kbps;
        let sample_rate = self.sample_rate_hz;
        let padding = u32::from(self.padding);

        // Layer I counts in 4-byte slots, the others in single bytes
        let size = match (self.version, self.layer) {
            (_, Layer::Layer1) => (12_000 * bitrate / sample_rate + padding) * 4,
            (MpegVersion::Mpeg1, _) | (_, Layer::Layer2) => {
                144_000 * bitrate / sample_rate + padding
            }
            (_, Layer::Layer3) => 72_000 * bitrate / sample_rate + padding,
        };
        Some(size)
    }

    /// Bytes added by the padding bit: one slot, which is 4 bytes in Layer I
    pub fn padding_len(&self) -> u32 {
        match (self.padding, self.layer) {
            (false, _) => 0,
            (true, Layer::Layer1) => 4,
            (true, _) => 1,
        }
    }

    /// Playback time of one frame in seconds
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.samples_per_frame()) / f64::from(self.sample_rate_hz)
    }

    /// Layer I/II joint stereo: first subband coded in intensity stereo
    /// (4, 8, 12 or 16; subbands up to 31 are joined).
    pub fn intensity_bound(&self) -> Option<u8> {
        match (self.layer, self.channel_mode) {
            (Layer::Layer1 | Layer::Layer2, ChannelMode::JointStereo) => {
                Some(4 * (self.raw_mode_extension + 1))
            }
            _ => None,
        }
    }
}
