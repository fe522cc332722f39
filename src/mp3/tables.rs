//! Static lookup tables from the MPEG audio standard
//!
//! Reserved slots are simply not present: bitrate rows stop at index 14 and
//! sample-rate rows at index 2, so a reserved index comes back as `None`.

use super::header::{Layer, MpegVersion};

/// Bitrates in kbps, `[MPEG1 | MPEG2/2.5][Layer I, II, III][index]`.
/// Index 0 is free format.
pub static BITRATES_KBPS: [[[u32; 15]; 3]; 2] = [
    [
        // MPEG1 Layer I
        [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448],
        // MPEG1 Layer II
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384],
        // MPEG1 Layer III
        [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320],
    ],
    [
        // MPEG2/2.5 Layer I
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
        // MPEG2/2.5 Layer II
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
        // MPEG2/2.5 Layer III
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
    ],
];

/// Sample rates in Hz, `[MPEG1, MPEG2, MPEG2.5][index]`.
pub static SAMPLE_RATES_HZ: [[u32; 3]; 3] = [
    [44100, 48000, 32000],
    [22050, 24000, 16000],
    [11025, 12000, 8000],
];

/// Look up a bitrate; `None` for the reserved index.
pub fn bitrate_kbps(version: MpegVersion, layer: Layer, index: u8) -> Option<u32> {
    let row = match version {
        MpegVersion::Mpeg1 => 0,
        MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => 1,
    };
    let column = match layer {
        Layer::Layer1 => 0,
        Layer::Layer2 => 1,
        Layer::Layer3 => 2,
    };
    BITRATES_KBPS[row][column].get(usize::from(index)).copied()
}

/// Look up a sample rate; `None` for the reserved index.
pub fn sample_rate_hz(version: MpegVersion, index: u8) -> Option<u32> {
    let row = match version {
        MpegVersion::Mpeg1 => 0,
        MpegVersion::Mpeg2 => 1,
        MpegVersion::Mpeg25 => 2,
    };
    SAMPLE_RATES_HZ[row].get(usize::from(index)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_bitrate_index_absent() {
        for version in [MpegVersion::Mpeg1, MpegVersion::Mpeg2, MpegVersion::Mpeg25] {
            for layer in [Layer::Layer1, Layer::Layer2, Layer::Layer3] {
                assert_eq!(bitrate_kbps(version, layer, 15), None);
                // Free format is a real slot, not an error
                assert_eq!(bitrate_kbps(version, layer, 0), Some(0));
            }
        }
    }

    #[test]
    fn test_reserved_sample_rate_index_absent() {
        for version in [MpegVersion::Mpeg1, MpegVersion::Mpeg2, MpegVersion::Mpeg25] {
            assert_eq!(sample_rate_hz(version, 3), None);
        }
    }

    #[test]
    fn test_mpeg2_and_25_share_bitrates() {
        for layer in [Layer::Layer1, Layer::Layer2, Layer::Layer3] {
            for index in 0..15 {
                assert_eq!(
                    bitrate_kbps(MpegVersion::Mpeg2, layer, index),
                    bitrate_kbps(MpegVersion::Mpeg25, layer, index)
                );
            }
        }
    }

    #[test]
    fn test_rows_strictly_increase() {
        // Bitrate codes are ordered; a typo in a table would usually break this
        for group in BITRATES_KBPS.iter() {
            for row in group.iter() {
                for pair in row[1..].windows(2) {
                    assert!(pair[0] < pair[1], "{:?}", row);
                }
            }
        }
    }

    #[test]
    fn test_sample_rates_by_version() {
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg1, 0), Some(44100));
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg1, 1), Some(48000));
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg1, 2), Some(32000));
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg2, 0), Some(22050));
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg25, 2), Some(8000));
    }
}
