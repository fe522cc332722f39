//! Error types for mp3header
//!
//! Decoding a single header and scanning a whole stream fail in different
//! ways, so each has its own error type. [`Error`] wraps both for callers
//! that go through the file-level API.

use thiserror::Error;

/// Result type alias for file-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a 32-bit pattern could not be decoded as an MPEG audio frame header.
///
/// Every reserved code has its own variant so a caller can tell
/// "this is not audio" (`NoSync`) apart from "a field holds a value the
/// standard reserves".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The 11 leading bits are not all set
    #[error("frame sync not found")]
    NoSync,

    /// Version code `01`
    #[error("reserved MPEG version")]
    ReservedVersion,

    /// Layer code `00`
    #[error("reserved layer")]
    ReservedLayer,

    /// Bitrate index `1111`
    #[error("reserved bitrate index")]
    ReservedBitrate,

    /// Sample rate index `11`
    #[error("reserved sample rate index")]
    ReservedSampleRate,
}

/// Failure while walking a byte stream frame by frame.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Not a single valid frame header was found
    #[error("no MPEG audio frames found")]
    NoFramesFound,

    /// A frame declares more bytes than the stream has left
    #[error("frame at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedStream {
        offset: usize,
        declared: u32,
        available: usize,
    },

    /// Reading the source stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for file-level operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Header decode error
    #[error("header error: {0}")]
    Decode(#[from] DecodeError),

    /// Frame scan error
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_errors_are_distinct() {
        // Callers branch on these, so no two variants may compare equal
        let all = [
            DecodeError::NoSync,
            DecodeError::ReservedVersion,
            DecodeError::ReservedLayer,
            DecodeError::ReservedBitrate,
            DecodeError::ReservedSampleRate,
        ];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }

    #[test]
    fn test_truncated_message_names_sizes() {
        let err = ScanError::TruncatedStream {
            offset: 834,
            declared: 417,
            available: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("834"));
        assert!(msg.contains("417"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_error_wraps_sources() {
        let err: Error = DecodeError::ReservedLayer.into();
        assert!(matches!(err, Error::Decode(DecodeError::ReservedLayer)));

        let err: Error = ScanError::NoFramesFound.into();
        assert_eq!(err.to_string(), "scan error: no MPEG audio frames found");
    }
}
