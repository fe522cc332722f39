//! mp3header - show MPEG audio frame headers and durations
//!
//! # Usage
//!
//! ```bash
//! # Human-readable summary
//! mp3header song.mp3 other.mp3
//!
//! # JSON to stdout
//! mp3header --format json song.mp3
//!
//! # Report file, format picked from the extension
//! mp3header -o report.csv *.mp3
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use tracing::Level;

use mp3header::{report, Estimator, Inspector, Mp3Info, TruncationPolicy};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// Pretty-printed JSON
    Json,
    /// One row per file
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "mp3header", version)]
#[command(about = "Decode MP3 frame headers and estimate playback duration", long_about = None)]
struct Args {
    /// MP3 files to inspect
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write a report file (json or csv, by extension) instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Byte offset where the frame search starts
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Don't step over a leading ID3v2 tag
    #[arg(long)]
    no_id3_skip: bool,

    /// Stop searching after this many bytes without a frame
    #[arg(long, value_name = "BYTES")]
    resync_window: Option<usize>,

    /// Fail on a truncated final frame instead of counting it
    #[arg(long)]
    strict: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let inspector = build_inspector(&args);

    let mut results = Vec::new();
    let mut failed = 0;
    for path in &args.files {
        match inspector.inspect(path) {
            Ok(info) => results.push(info),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "error".red().bold(), path.display(), e);
            }
        }
    }

    let written = match &args.output {
        Some(path) => report::generate(path, &results),
        None => write_stdout(&args.format, &results),
    };
    if let Err(e) = written {
        eprintln!("{} failed to write output: {}", "error".red().bold(), e);
        process::exit(2);
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn build_inspector(args: &Args) -> Inspector {
    let mut estimator = Estimator::new().with_start_offset(args.offset);
    if let Some(window) = args.resync_window {
        estimator = estimator.with_resync_window(window);
    }
    if args.strict {
        estimator = estimator.with_truncation(TruncationPolicy::Fail);
    }

    Inspector::new()
        .with_skip_id3(!args.no_id3_skip)
        .with_estimator(estimator)
}

fn write_stdout(format: &OutputFormat, results: &[Mp3Info]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => results.iter().try_for_each(|info| write_text(&mut out, info)),
        OutputFormat::Json => report::json::write(&mut out, results),
        OutputFormat::Csv => report::csv::write(&mut out, results),
    }
}

fn write_text<W: Write>(out: &mut W, info: &Mp3Info) -> io::Result<()> {
    let h = &info.header;
    let d = &info.duration;

    let bitrate = if h.is_free_format() {
        "free format".to_string()
    } else {
        format!("{} kbps", h.bitrate_kbps)
    };

    writeln!(out, "{}", info.file_path.bold())?;
    writeln!(
        out,
        "  {} {}, {}, {} Hz, {}",
        h.version, h.layer, bitrate, h.sample_rate_hz, h.channel_mode
    )?;
    if let Some(ext) = h.mode_extension {
        writeln!(
            out,
            "  intensity stereo: {}, M/S stereo: {}",
            on_off(ext.intensity_stereo),
            on_off(ext.ms_stereo)
        )?;
    }
    writeln!(
        out,
        "  CRC: {}, copyright: {}, original: {}, emphasis: {}",
        on_off(h.error_protection),
        on_off(h.copyright),
        on_off(h.original),
        h.emphasis
    )?;

    let mode = if d.is_vbr {
        format!(
            "VBR {}-{} kbps, avg {}",
            d.min_bitrate_kbps, d.max_bitrate_kbps, d.avg_bitrate_kbps
        )
        .yellow()
    } else {
        "CBR".green()
    };
    writeln!(
        out,
        "  duration: {} ({} frames, {})",
        format_duration(d.seconds).cyan(),
        d.frames,
        mode
    )?;
    if d.truncated {
        writeln!(out, "  {}", "last frame truncated".yellow())?;
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn format_duration(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms % 60_000) as f64 / 1000.0;
    format!("{}:{:06.3}", minutes, secs)
}
