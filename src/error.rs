use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid time format {input:?}, use hh:mm:ss")]
    TimeFormat { input: String },

    #[error("start time ({start}s) must be before end time ({end}s)")]
    Range { start: u64, end: u64 },

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to download m3u8 file from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed playlist line {line:?}: {reason}")]
    PlaylistFormat { line: String, reason: String },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion with {program} failed: {reason}")]
    Conversion { program: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
