//! CSV report generation

use crate::info::Mp3Info;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, results: &[Mp3Info]) -> io::Result<()> {
    // Header
    writeln!(
        writer,
        "path,version,layer,bitrate_kbps,sample_rate_hz,channel_mode,frames,duration_secs,vbr,truncated"
    )?;

    // Rows
    for r in results {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{:.3},{},{}",
            escape_csv(&r.file_path),
            r.header.version,
            r.header.layer,
            r.header.bitrate_kbps,
            r.header.sample_rate_hz,
            r.header.channel_mode,
            r.duration.frames,
            r.duration.seconds,
            r.duration.is_vbr,
            r.duration.truncated
        )?;
    }

    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_csv_rows() {
        let results = [
            fixtures::info("a.mp3", &[[0xFF, 0xFB, 0x90, 0x00]; 100]),
            fixtures::info("b.mp3", &[[0xFF, 0xFB, 0x90, 0xC0], [0xFF, 0xFB, 0xE0, 0xC0]]),
        ];
        let mut out = Vec::new();
        write(&mut out, &results).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "/music/a.mp3,MPEG 1,Layer III,128,44100,Stereo,100,2.612,false,false"
        );
        assert_eq!(
            lines[2],
            "/music/b.mp3,MPEG 1,Layer III,128,44100,Mono,2,0.052,true,false"
        );
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain.mp3"), "plain.mp3");
        assert_eq!(escape_csv("a,b.mp3"), "\"a,b.mp3\"");
        assert_eq!(escape_csv("say \"hi\".mp3"), "\"say \"\"hi\"\".mp3\"");
    }
}
