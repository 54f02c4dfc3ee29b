use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use m3u8_clip::config::{PipelineConfig, DEFAULT_TIMEOUT_SECS};
use m3u8_clip::convert::DEFAULT_PROGRAM;
use m3u8_clip::execution::{ClipRequest, Pipeline};

/// Process an m3u8 file from a URL, keeping only a specific time range.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// URL of the m3u8 file
    #[arg(short = 'u', long = "url")]
    pub url: String,

    /// Start time in format hh:mm:ss
    #[arg(short = 's', long = "start_time")]
    pub start_time: String,

    /// End time in format hh:mm:ss
    #[arg(short = 'e', long = "end_time")]
    pub end_time: String,

    /// Name of the output m3u8 file
    #[arg(short = 'o', long = "output_file")]
    pub output_file: PathBuf,

    /// Also remux the new playlist into an .mp4 next to it
    #[arg(short = 'c', long = "convert")]
    pub convert: bool,

    /// Program used for --convert
    #[arg(long, env = "M3U8_CLIP_FFMPEG", default_value = DEFAULT_PROGRAM)]
    pub ffmpeg: String,

    /// Download timeout in seconds
    #[arg(long, env = "M3U8_CLIP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> m3u8_clip::Result<()> {
    let request = ClipRequest::parse(
        &cli.url,
        &cli.start_time,
        &cli.end_time,
        cli.output_file,
        cli.convert,
    )?;

    let config = PipelineConfig::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_converter_program(cli.ffmpeg);
    let outcome = Pipeline::new(&config)?.run(&request)?;

    info!(
        playlist = %outcome.playlist.display(),
        segments = outcome.segments,
        "done"
    );
    if let Some(media) = outcome.media {
        info!(media = %media.display(), "conversion complete");
    }

    Ok(())
}

pub fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        error!(error = ?e, "clip failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
