use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::time::TimeWindow;

pub const EXTINF: &str = "#EXTINF";
pub const ENDLIST: &str = "#EXT-X-ENDLIST";

/// Non-directive lines with this suffix are media segment references.
pub const SEGMENT_SUFFIX: &str = ".ts";

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineKind {
    /// `#EXTINF:<seconds>,[title]`
    Duration(f64),
    /// A media segment reference, relative to the playlist.
    Segment,
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> Result<Self> {
        if line.starts_with(EXTINF) {
            return parse_duration(line).map(LineKind::Duration);
        }

        if is_segment(line) {
            return Ok(LineKind::Segment);
        }

        Ok(LineKind::Other)
    }
}

/// Directives never count, even when their payload ends in the segment suffix.
pub fn is_segment(line: &str) -> bool {
    !line.starts_with('#') && line.ends_with(SEGMENT_SUFFIX)
}

fn parse_duration(line: &str) -> Result<f64> {
    let malformed = |reason: &str| Error::PlaylistFormat {
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let (_, payload) = line
        .split_once(':')
        .ok_or_else(|| malformed("missing duration"))?;
    let value = payload.split(',').next().unwrap_or_default().trim();

    match value.parse::<f64>() {
        Ok(duration) if duration.is_finite() && duration >= 0.0 => Ok(duration),
        Ok(_) => Err(malformed("duration must be a non-negative number")),
        Err(_) => Err(malformed("duration is not a number")),
    }
}

/// A fetched media playlist, held as its trimmed lines in original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    lines: Vec<String>,
}

impl Playlist {
    pub fn parse(text: &str) -> Self {
        let lines = text.lines().map(|line| line.trim().to_string()).collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn filter(&self, window: &TimeWindow) -> Result<FilteredPlaylist> {
        if !self.lines.iter().any(|line| line.starts_with(EXTINF)) {
            warn!("playlist has no {EXTINF} lines, is this a master playlist?");
        }

        let lines = filter_segments(&self.lines, window)?;
        Ok(FilteredPlaylist { lines })
    }
}

impl From<&str> for Playlist {
    fn from(value: &str) -> Self {
        Playlist::parse(value)
    }
}

/// The lines of a [Playlist] that survived filtering, without the closing `#EXT-X-ENDLIST`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredPlaylist {
    lines: Vec<String>,
}

impl FilteredPlaylist {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().filter(|line| is_segment(line)).count()
    }
}

/// Select the lines of a playlist that fall inside `window`.
///
/// Everything before the first `#EXTINF` is kept as header. After that, a segment is kept
/// when the running total *before* its duration is added has reached `window.start()`, and
/// the scan stops at the first `#EXTINF` whose running total has reached `window.end()`.
/// Once inside the window, every segment reference line is kept.
pub fn filter_segments(lines: &[String], window: &TimeWindow) -> Result<Vec<String>> {
    let start = window.start() as f64;
    let end = window.end() as f64;

    let mut total_time = 0.0_f64;
    let mut inside_range = false;
    let mut in_header = true;
    let mut result = Vec::new();

    for line in lines {
        let line = line.trim();

        match LineKind::classify(line)? {
            LineKind::Duration(duration) => {
                in_header = false;

                if total_time >= start {
                    inside_range = true;
                }

                if total_time >= end {
                    debug!(total_time, "reached end of window");
                    break;
                }

                total_time += duration;

                if inside_range {
                    debug!(duration, total_time, "keeping segment");
                    result.push(line.to_string());
                }
            }
            LineKind::Segment if inside_range => result.push(line.to_string()),
            _ if in_header => result.push(line.to_string()),
            _ => {}
        }
    }

    Ok(result)
}
