//! JSON report generation

use crate::info::Mp3Info;
use crate::report::Summary;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    files: &'a [Mp3Info],
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    vbr: usize,
    truncated: usize,
    frames: u64,
    seconds: f64,
}

pub fn write<W: Write>(writer: &mut W, results: &[Mp3Info]) -> io::Result<()> {
    let summary = Summary::from_results(results);

    let report = JsonReport {
        summary: JsonSummary {
            files: summary.files,
            vbr: summary.vbr,
            truncated: summary.truncated,
            frames: summary.frames,
            seconds: summary.seconds,
        },
        files: results,
    };

    let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;

    writer.write_all(json.as_bytes())?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_json_shape() {
        let results = [fixtures::info("song.mp3", &[[0xFF, 0xFB, 0x90, 0x40]; 3])];
        let mut out = Vec::new();
        write(&mut out, &results).expect("write");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["summary"]["files"], 1);
        assert_eq!(value["summary"]["frames"], 3);

        let file = &value["files"][0];
        assert_eq!(file["file_name"], "song.mp3");
        assert_eq!(file["header"]["version"], "Mpeg1");
        assert_eq!(file["header"]["layer"], "Layer3");
        assert_eq!(file["header"]["bitrate_kbps"], 128);
        assert_eq!(file["header"]["channel_mode"], "JointStereo");
        assert_eq!(file["header"]["mode_extension"]["ms_stereo"], false);
        assert_eq!(file["duration"]["frames"], 3);
    }

    #[test]
    fn test_absent_mode_extension_is_null() {
        let results = [fixtures::info("stereo.mp3", &[[0xFF, 0xFB, 0x90, 0x00]])];
        let mut out = Vec::new();
        write(&mut out, &results).expect("write");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert!(value["files"][0]["header"]["mode_extension"].is_null());
    }
}
