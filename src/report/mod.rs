pub mod csv;
pub mod json;

use crate::info::Mp3Info;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[Mp3Info]) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, results),
        _ => csv::write(&mut file, results),
    }
}

/// Totals over a batch of files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub files: usize,
    pub vbr: usize,
    pub truncated: usize,
    pub frames: u64,
    pub seconds: f64,
}

impl Summary {
    pub fn from_results(results: &[Mp3Info]) -> Self {
        let mut summary = Self {
            files: results.len(),
            ..Self::default()
        };

        for r in results {
            if r.duration.is_vbr {
                summary.vbr += 1;
            }
            if r.duration.truncated {
                summary.truncated += 1;
            }
            summary.frames += r.duration.frames;
            summary.seconds += r.duration.seconds;
        }

        summary
    }
}
