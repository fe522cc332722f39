//! File-level header and duration lookup
//!
//! [`Inspector`] reads a whole file, steps over a leading ID3v2 tag, stops
//! short of a trailing ID3v1 tag, and runs the frame walker. The result pairs the first frame's header with
//! the duration of the whole stream.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::mp3::{header_at, id3, ChannelMode, DurationEstimate, Estimator, Header};

/// Header and duration of one MP3 file
#[derive(Debug, Clone, Serialize)]
pub struct Mp3Info {
    pub file_path: String,
    pub file_name: String,
    /// File size in bytes
    pub size: u64,
    /// Length of the ID3v2 tag stepped over, if any
    pub id3_len: Option<usize>,
    /// Length of the ID3v1 trailer left out of the scan, if any
    pub id3v1_len: Option<usize>,
    /// Header of the first frame
    pub header: Header,
    pub duration: DurationEstimate,
}

impl Mp3Info {
    /// Inspect a file with the default settings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Inspector::new().inspect(path)
    }

    pub fn bitrate_kbps(&self) -> u32 {
        self.header.bitrate_kbps
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.header.sample_rate_hz
    }

    pub fn channels(&self) -> u8 {
        self.header.channels()
    }

    pub fn mode(&self) -> ChannelMode {
        self.header.channel_mode
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn len_secs(&self) -> f64 {
        self.duration.seconds
    }
}

/// Reads files and produces [`Mp3Info`]
#[derive(Debug, Clone)]
pub struct Inspector {
    /// Step over an ID3v2 tag found at the start offset and leave a
    /// trailing ID3v1 tag out of the scan
    pub skip_id3: bool,
    pub estimator: Estimator,
}

impl Default for Inspector {
    fn default() -> Self {
        Self {
            skip_id3: true,
            estimator: Estimator::default(),
        }
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_id3(mut self, skip: bool) -> Self {
        self.skip_id3 = skip;
        self
    }

    pub fn with_estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn inspect<P: AsRef<Path>>(&self, path: P) -> Result<Mp3Info> {
        let path = path.as_ref();
        debug!(path = %path.display(), "inspecting");

        let data = std::fs::read(path)?;
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());

        let mut info = self.inspect_bytes(&data)?;
        info.file_path = file_path;
        info.file_name = file_name;
        Ok(info)
    }

    /// Same as [`inspect`](Self::inspect) on bytes already in memory.
    /// The path fields are left empty.
    pub fn inspect_bytes(&self, data: &[u8]) -> Result<Mp3Info> {
        let start = self.estimator.start_offset;

        let id3_len = if self.skip_id3 {
            data.get(start..)
                .and_then(id3::tag_len)
                .filter(|len| start + len < data.len())
        } else {
            None
        };
        if let Some(len) = id3_len {
            debug!(len, "skipping ID3v2 tag");
        }

        let id3v1_len = if self.skip_id3 {
            id3::v1_tag_len(data)
        } else {
            None
        };

        let mut estimator = self
            .estimator
            .clone()
            .with_start_offset(start + id3_len.unwrap_or(0));
        if let Some(len) = id3v1_len {
            debug!(len, "leaving out ID3v1 tag");
            let end = data.len() - len;
            let end_offset = estimator.end_offset.map_or(end, |e| e.min(end));
            estimator = estimator.with_end_offset(end_offset);
        }
        let duration = estimator.estimate(data)?;

        let header =
            header_at(data, duration.first_frame_offset).ok_or(ScanError::NoFramesFound)?;

        Ok(Mp3Info {
            file_path: String::new(),
            file_name: String::new(),
            size: data.len() as u64,
            id3_len,
            id3v1_len,
            header,
            duration,
        })
    }
}
