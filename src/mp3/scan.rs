//! Duration estimation by walking frame headers
//!
//! Each frame declares its own bitrate, so the only honest duration for a
//! VBR file is the per-frame sum of `samples_per_frame / sample_rate`.
//! Dividing the file size by an average bitrate is not good enough.
//!
//! The walk decodes a header at the cursor, adds its duration, then jumps
//! ahead by the frame's size. Anything that does not decode (garbage, tag
//! data, a reserved field in a false sync) moves the cursor one byte and
//! tries again.
//!
//! Free-format frames don't declare a size. Their length is the distance to
//! the next free-format header of the same layout; the last one in a stream
//! reuses the length measured before it.

use std::io::Read;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use super::bits::HEADER_LEN;
use super::header::Header;
use crate::error::ScanError;

/// What to do with a final frame that declares more bytes than remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TruncationPolicy {
    /// Count the frame's full sample count and mark the estimate truncated
    #[default]
    CountPartial,
    /// Fail with [`ScanError::TruncatedStream`]
    Fail,
}

/// Result of one scan over a stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationEstimate {
    /// Total playback time in seconds
    pub seconds: f64,
    pub frames: u64,
    /// Byte offset of the first frame header
    pub first_frame_offset: usize,
    /// Bytes covered by frames, including a truncated last frame
    pub audio_bytes: u64,
    /// Bytes stepped over while searching for sync
    pub skipped_bytes: u64,
    pub min_bitrate_kbps: u32,
    pub max_bitrate_kbps: u32,
    /// Frame-weighted mean: every frame counts once, whatever its duration
    pub avg_bitrate_kbps: u32,
    pub is_vbr: bool,
    pub truncated: bool,
}

impl DurationEstimate {
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds)
    }
}

/// Running totals while walking frames
#[derive(Debug, Default)]
struct Totals {
    seconds: f64,
    frames: u64,
    first_frame_offset: Option<usize>,
    audio_bytes: u64,
    skipped_bytes: u64,
    bitrate_sum: u64,
    min_bitrate: u32,
    max_bitrate: u32,
    truncated: bool,
    last: Option<Header>,
}

impl Totals {
    fn add_frame(&mut self, header: &Header, offset: usize, bytes: usize) {
        if self.first_frame_offset.is_none() {
            debug!(offset, version = %header.version, layer = %header.layer, "first frame");
            self.first_frame_offset = Some(offset);
            self.min_bitrate = header.bitrate_kbps;
            self.max_bitrate = header.bitrate_kbps;
        }

        self.seconds += header.duration_secs();
        self.frames += 1;
        self.audio_bytes += bytes as u64;
        self.bitrate_sum += u64::from(header.bitrate_kbps);
        self.min_bitrate = self.min_bitrate.min(header.bitrate_kbps);
        self.max_bitrate = self.max_bitrate.max(header.bitrate_kbps);
        self.last = Some(*header);
    }

    fn finish(self) -> Result<DurationEstimate, ScanError> {
        let first_frame_offset = self.first_frame_offset.ok_or(ScanError::NoFramesFound)?;
        let avg_bitrate_kbps = (self.bitrate_sum / self.frames) as u32;

        Ok(DurationEstimate {
            seconds: self.seconds,
            frames: self.frames,
            first_frame_offset,
            audio_bytes: self.audio_bytes,
            skipped_bytes: self.skipped_bytes,
            min_bitrate_kbps: self.min_bitrate,
            max_bitrate_kbps: self.max_bitrate,
            avg_bitrate_kbps,
            is_vbr: self.min_bitrate != self.max_bitrate,
            truncated: self.truncated,
        })
    }
}

/// Frame walker configuration
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    /// Where the cursor starts
    pub start_offset: usize,
    /// Stop before this offset, e.g. at a trailing tag. `None` scans to the
    /// end of the data.
    pub end_offset: Option<usize>,
    /// Give up after this many consecutive bytes without sync.
    /// `None` searches to the end of the stream.
    pub resync_window: Option<usize>,
    pub truncation: TruncationPolicy,
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    pub fn with_end_offset(mut self, offset: usize) -> Self {
        self.end_offset = Some(offset);
        self
    }

    pub fn with_resync_window(mut self, window: usize) -> Self {
        self.resync_window = Some(window);
        self
    }

    pub fn with_truncation(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = policy;
        self
    }

    /// Walk `data` frame by frame and sum the frame durations.
    ///
    /// A frame that runs past the end of the data is only taken for a
    /// truncated last frame when it follows the previous frame directly with
    /// the same version, layer and sample rate, or when it sits right at the
    /// start offset. Otherwise it is a false sync and the search goes on.
    #[instrument(skip(self, data), fields(len = data.len(), start = self.start_offset))]
    pub fn estimate(&self, data: &[u8]) -> Result<DurationEstimate, ScanError> {
        let end = self.end_offset.map_or(data.len(), |end| end.min(data.len()));
        let data = &data[..end];

        let mut totals = Totals::default();
        let mut pos = self.start_offset;
        let mut unsynced = 0usize;
        // Unpadded length of the free-format frames seen so far
        let mut free_format_len: Option<usize> = None;

        while let Some(bytes) = header_bytes(data, pos) {
            match Header::from_bytes(bytes) {
                Ok(header) => {
                    let size = match header.frame_size() {
                        Some(size) => Some(size as usize),
                        None => free_format_size(data, pos, &header, free_format_len),
                    };
                    let available = data.len() - pos;

                    match size {
                        Some(size) if size <= available => {
                            if header.is_free_format() {
                                free_format_len = Some(size - header.padding_len() as usize);
                            }
                            totals.add_frame(&header, pos, size);
                            pos += size;
                            unsynced = 0;
                            continue;
                        }
                        Some(size) if self.continues_stream(&totals, &header, pos, unsynced) => {
                            match self.truncation {
                                TruncationPolicy::Fail => {
                                    return Err(ScanError::TruncatedStream {
                                        offset: pos,
                                        declared: size as u32,
                                        available,
                                    });
                                }
                                TruncationPolicy::CountPartial => {
                                    warn!(
                                        offset = pos,
                                        declared = size,
                                        available,
                                        "last frame truncated"
                                    );
                                    totals.add_frame(&header, pos, available);
                                    totals.truncated = true;
                                    break;
                                }
                            }
                        }
                        Some(size) => trace!(
                            offset = pos,
                            declared = size,
                            available,
                            "short frame out of sequence"
                        ),
                        None => trace!(offset = pos, "free-format frame of unknown length"),
                    }
                }
                Err(e) => trace!(offset = pos, error = %e, "no frame"),
            }

            pos += 1;
            totals.skipped_bytes += 1;
            unsynced += 1;

            if let Some(window) = self.resync_window {
                if unsynced > window {
                    debug!(offset = pos, window, "resync window exhausted");
                    break;
                }
            }
        }

        let estimate = totals.finish()?;
        debug!(
            frames = estimate.frames,
            seconds = estimate.seconds,
            vbr = estimate.is_vbr,
            "scan complete"
        );
        Ok(estimate)
    }

    fn continues_stream(
        &self,
        totals: &Totals,
        header: &Header,
        pos: usize,
        unsynced: usize,
    ) -> bool {
        match &totals.last {
            Some(prev) => unsynced == 0 && same_layout(prev, header),
            None => pos == self.start_offset,
        }
    }

    /// Buffer a reader to the end, then scan it
    pub fn estimate_reader<R: Read>(&self, reader: &mut R) -> Result<DurationEstimate, ScanError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.estimate(&data)
    }
}

/// Scan `data` with the default configuration
pub fn estimate(data: &[u8]) -> Result<DurationEstimate, ScanError> {
    Estimator::new().estimate(data)
}

/// Decode the header at exactly `pos`, if there is one
pub fn header_at(data: &[u8], pos: usize) -> Option<Header> {
    Header::from_bytes(header_bytes(data, pos)?).ok()
}

/// Find the first decodable, sized frame header at or after `start`
pub fn find_sync(data: &[u8], start: usize) -> Option<(usize, Header)> {
    let mut pos = start;
    while let Some(bytes) = header_bytes(data, pos) {
        if let Ok(header) = Header::from_bytes(bytes) {
            if header.frame_size().is_some() {
                return Some((pos, header));
            }
        }
        pos += 1;
    }
    None
}

/// Length of the free-format frame at `pos`: the distance to the next
/// free-format header with the same layout. With no such header left, fall
/// back to the unpadded length measured earlier in the stream.
fn free_format_size(
    data: &[u8],
    pos: usize,
    header: &Header,
    measured: Option<usize>,
) -> Option<usize> {
    let mut next = pos + HEADER_LEN;
    while let Some(bytes) = header_bytes(data, next) {
        if let Ok(candidate) = Header::from_bytes(bytes) {
            if candidate.is_free_format() && same_layout(header, &candidate) {
                return Some(next - pos);
            }
        }
        next += 1;
    }
    measured.map(|len| len + header.padding_len() as usize)
}

fn same_layout(a: &Header, b: &Header) -> bool {
    a.version == b.version && a.layer == b.layer && a.sample_rate_hz == b.sample_rate_hz
}

fn header_bytes(data: &[u8], pos: usize) -> Option<[u8; HEADER_LEN]> {
    let end = pos.checked_add(HEADER_LEN)?;
    let slice = data.get(pos..end)?;
    let mut bytes = [0u8; HEADER_LEN];
    bytes.copy_from_slice(slice);
    Some(bytes)
}
