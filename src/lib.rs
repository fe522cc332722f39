//! mp3header - MPEG audio frame headers and MP3 duration
//!
//! Every MP3 frame starts with a 4-byte header that says which MPEG version
//! and layer it uses, its bitrate and sample rate, the channel mode, and a
//! handful of flags. This crate decodes those headers and walks a stream
//! frame by frame to work out how long it plays.
//!
//! # Quick Start
//!
//! ```
//! use mp3header::{decode, Layer, MpegVersion};
//!
//! let header = decode(0xFFFB_9064).unwrap();
//! assert_eq!(header.version, MpegVersion::Mpeg1);
//! assert_eq!(header.layer, Layer::Layer3);
//! assert_eq!(header.bitrate_kbps, 128);
//! assert_eq!(header.sample_rate_hz, 44100);
//! assert_eq!(header.frame_size(), Some(417));
//! ```
//!
//! ```no_run
//! use mp3header::Mp3Info;
//!
//! let info = Mp3Info::open("song.mp3")?;
//! println!("{} {} {}kbps", info.header.version, info.header.layer, info.bitrate_kbps());
//! println!("{:.1}s over {} frames", info.len_secs(), info.duration.frames);
//! # Ok::<(), mp3header::Error>(())
//! ```
//!
//! # Duration
//!
//! Variable-bitrate files change bitrate from frame to frame, so dividing
//! the file size by a bitrate gives the wrong answer. The
//! [`Estimator`](mp3::Estimator) adds up `samples / sample_rate` for every
//! frame it finds, resyncing byte by byte over anything that isn't a frame.
//!
//! # Modules
//!
//! - [`mp3`]: header decoding, lookup tables, the frame walker
//! - [`info`]: file-level lookup combining the first header with the duration
//! - [`report`]: output formatters (JSON, CSV)
//! - [`error`]: error types

pub mod error;
pub mod info;
pub mod mp3;
pub mod report;

pub use error::{DecodeError, Error, Result, ScanError};
pub use info::{Inspector, Mp3Info};
pub use mp3::{
    decode, estimate, ChannelMode, DurationEstimate, Emphasis, Estimator, Header, Layer,
    ModeExtension, MpegVersion, RawFields, TruncationPolicy,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is reachable from the root.
    // ==========================================================================

    #[test]
    fn test_decode_from_root() {
        let header = decode(0xFFFB_9064).expect("Should decode");
        assert_eq!(header.channel_mode, ChannelMode::JointStereo);
        assert_eq!(
            header.mode_extension,
            Some(ModeExtension {
                intensity_stereo: false,
                ms_stereo: true
            })
        );
        assert!(header.original);
    }

    #[test]
    fn test_decode_error_from_root() {
        assert_eq!(decode(0), Err(DecodeError::NoSync));
    }

    #[test]
    fn test_estimate_from_root() {
        assert!(matches!(estimate(&[]), Err(ScanError::NoFramesFound)));
    }

    #[test]
    fn test_builders_accessible() {
        let estimator = Estimator::new().with_truncation(TruncationPolicy::Fail);
        let inspector = Inspector::new().with_estimator(estimator);
        assert!(inspector.skip_id3);
        assert_eq!(inspector.estimator.truncation, TruncationPolicy::Fail);
    }

    #[test]
    fn test_raw_fields_for_unsynced_input() {
        // Patterns that fail to decode can still be looked at field by field
        let raw = RawFields::from_bits(0x1234_5678);
        assert!(!raw.sync_valid());
        assert_eq!(raw.emphasis, 0);
        assert_eq!(Emphasis::from_code(raw.emphasis), Emphasis::None);
    }
}
