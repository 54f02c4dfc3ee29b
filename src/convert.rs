use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, instrument};

use crate::error::{Error, Result};

pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Protocols the remuxer may open while following the playlist.
pub const PROTOCOL_WHITELIST: &str = "file,http,https,tcp,tls,crypto";

pub const MEDIA_EXTENSION: &str = "mp4";

/// The media file a playlist converts into: same path, `.mp4` extension.
pub fn media_path<P: AsRef<Path>>(playlist: P) -> PathBuf {
    playlist.as_ref().with_extension(MEDIA_EXTENSION)
}

/// Remuxes a playlist into a single MP4 by running an external ffmpeg-compatible program.
/// Audio and video are stream-copied; ADTS audio is rewrapped for MP4.
#[derive(Debug, Clone)]
pub struct Converter {
    program: OsString,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Converter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-protocol_whitelist".into(),
            PROTOCOL_WHITELIST.into(),
            "-i".into(),
            input.into(),
            "-c".into(),
            "copy".into(),
            "-bsf:a".into(),
            "aac_adtstoasc".into(),
            output.into(),
        ]
    }

    /// Run the conversion and wait for the program to exit. No retries.
    #[instrument(skip(self))]
    pub fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let program = self.program.to_string_lossy().into_owned();
        info!("converting playlist with {program}");

        let status = Command::new(&self.program)
            .args(self.args(input, output))
            .stdin(Stdio::null())
            .status()
            .map_err(|e| Error::Conversion {
                program: program.clone(),
                reason: format!("could not start: {e}"),
            })?;

        if !status.success() {
            return Err(Error::Conversion {
                program,
                reason: match status.code() {
                    Some(code) => format!("exited with status {code}"),
                    None => "terminated by signal".to_string(),
                },
            });
        }

        info!(output = %output.display(), "conversion complete");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    use crate::convert::{media_path, Converter};
    use crate::error::Error;

    #[test]
    pub fn test_media_path() {
        assert_eq!(media_path("clip.m3u8"), PathBuf::from("clip.mp4"));
        assert_eq!(
            media_path("/tmp/out/game.m3u8"),
            PathBuf::from("/tmp/out/game.mp4")
        );
        assert_eq!(media_path("clip"), PathBuf::from("clip.mp4"));
    }

    #[test]
    pub fn test_args() {
        let args = Converter::default().args(Path::new("in.m3u8"), Path::new("out.mp4"));
        let expected: Vec<OsString> = [
            "-y",
            "-protocol_whitelist",
            "file,http,https,tcp,tls,crypto",
            "-i",
            "in.m3u8",
            "-c",
            "copy",
            "-bsf:a",
            "aac_adtstoasc",
            "out.mp4",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        assert_eq!(args, expected);
        assert_eq!(Converter::default().program(), "ffmpeg");
    }

    #[test]
    #[cfg(unix)]
    pub fn test_convert_success() {
        let converter = Converter::new("true");
        converter
            .convert(Path::new("in.m3u8"), Path::new("out.mp4"))
            .unwrap();
    }

    #[test]
    #[cfg(unix)]
    pub fn test_convert_failure() {
        let converter = Converter::new("false");
        match converter.convert(Path::new("in.m3u8"), Path::new("out.mp4")) {
            Err(Error::Conversion { program, reason }) => {
                assert_eq!(program, "false");
                assert_eq!(reason, "exited with status 1");
            }
            other => panic!("expected conversion error, got {other:?}"),
        }
    }

    #[test]
    pub fn test_convert_missing_program() {
        let converter = Converter::new("m3u8-clip-no-such-program");
        assert!(matches!(
            converter.convert(Path::new("in.m3u8"), Path::new("out.mp4")),
            Err(Error::Conversion { .. })
        ));
    }
}
