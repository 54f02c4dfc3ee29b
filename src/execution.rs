use std::path::PathBuf;

use tracing::info;
use url::Url;

use crate::config::PipelineConfig;
use crate::convert::{media_path, Converter};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::output::{base_url, write_playlist};
use crate::playlist::Playlist;
use crate::time::TimeWindow;

/// One clipping job, validated before any I/O happens.
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub url: Url,
    pub window: TimeWindow,
    pub output: PathBuf,
    pub convert: bool,
}

impl ClipRequest {
    /// Validate raw operator input. Time and range errors are reported before the URL.
    pub fn parse(
        url: &str,
        start_time: &str,
        end_time: &str,
        output: impl Into<PathBuf>,
        convert: bool,
    ) -> Result<Self> {
        let window = TimeWindow::parse(start_time, end_time)?;
        let url = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        Ok(Self {
            url,
            window,
            output: output.into(),
            convert,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipOutcome {
    pub playlist: PathBuf,
    pub segments: usize,
    /// Set when conversion was requested and succeeded.
    pub media: Option<PathBuf>,
}

/// Fetch, filter, write and optionally convert, strictly in that order.
pub struct Pipeline {
    fetcher: Fetcher,
    converter: Converter,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config.timeout)?,
            converter: Converter::new(config.converter_program.clone()),
        })
    }

    /// A conversion failure is returned as an error, but the playlist written before it stays
    /// on disk.
    pub fn run(&self, request: &ClipRequest) -> Result<ClipOutcome> {
        info!(url = %request.url, window = %request.window, "begin clip");

        let text = self.fetcher.fetch(&request.url)?;
        let playlist = Playlist::parse(&text);
        let filtered = playlist.filter(&request.window)?;
        let segments = filtered.segment_count();
        info!(
            segments,
            lines = playlist.lines().len(),
            "filtered playlist"
        );

        let base_url = base_url(&request.url)?;
        write_playlist(&request.output, &filtered, &base_url)?;

        let media = if request.convert {
            let media = media_path(&request.output);
            self.converter.convert(&request.output, &media)?;
            Some(media)
        } else {
            None
        };

        Ok(ClipOutcome {
            playlist: request.output.clone(),
            segments,
            media,
        })
    }
}
