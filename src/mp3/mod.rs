pub mod bits;
pub mod header;
pub mod id3;
pub mod scan;
pub mod tables;

pub use bits::RawFields;
pub use header::{ChannelMode, Emphasis, Header, Layer, ModeExtension, MpegVersion};
pub use scan::{estimate, find_sync, header_at, DurationEstimate, Estimator, TruncationPolicy};

use crate::error::DecodeError;

/// Decode a big-endian 32-bit frame header
pub fn decode(bits: u32) -> Result<Header, DecodeError> {
    Header::decode(bits)
}
