use std::path::Path;

use tracing::info;
use url::Url;

use crate::error::{Error, Result};
use crate::playlist::{is_segment, FilteredPlaylist, ENDLIST};

/// The directory a playlist was served from, minus the one trailing slash `join(".")` adds.
///
/// `https://cdn.example/vod/index.m3u8?token=1` becomes `https://cdn.example/vod`.
pub fn base_url(url: &Url) -> Result<String> {
    let directory = url.join(".").map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let directory = directory.as_str();
    Ok(directory.strip_suffix('/').unwrap_or(directory).to_string())
}

/// Render the playlist body. Segment references become `{base_url}/{reference}` and the
/// body always ends with `#EXT-X-ENDLIST`.
pub fn render(playlist: &FilteredPlaylist, base_url: &str) -> String {
    let mut body = String::new();

    for line in playlist.lines() {
        if is_segment(line) {
            body.push_str(format!("{base_url}/{line}\n").as_str());
        } else {
            body.push_str(format!("{line}\n").as_str());
        }
    }

    body.push_str(ENDLIST);
    body.push('\n');

    body
}

/// Write the rendered playlist to `path`, replacing any existing file.
pub fn write_playlist<P: AsRef<Path>>(
    path: P,
    playlist: &FilteredPlaylist,
    base_url: &str,
) -> Result<()> {
    let path = path.as_ref();

    std::fs::write(path, render(playlist, base_url)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "new m3u8 file saved");
    Ok(())
}

#[cfg(test)]
mod test {
    use url::Url;

    use crate::output::{base_url, render, write_playlist};
    use crate::playlist::Playlist;
    use crate::time::TimeWindow;

    const PLAYLIST: &str = "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXTINF:10,\nseg0.ts\n#EXTINF:10,\nhd/seg1.ts\n";

    fn base(url: &str) -> String {
        base_url(&Url::parse(url).unwrap()).unwrap()
    }

    #[test]
    pub fn test_base_url() {
        assert_eq!(
            base("https://cdn.example/vod/index.m3u8"),
            "https://cdn.example/vod"
        );
        assert_eq!(
            base("https://cdn.example/a/b/index.m3u8?token=abc#frag"),
            "https://cdn.example/a/b"
        );
        assert_eq!(base("http://cdn.example/index.m3u8"), "http://cdn.example");
        assert_eq!(base("http://cdn.example/vod/"), "http://cdn.example/vod");
        assert_eq!(base("https://h/a//index.m3u8"), "https://h/a/");
    }

    #[test]
    pub fn test_render() {
        let window = TimeWindow::new(0, 60).unwrap();
        let filtered = Playlist::parse(PLAYLIST).filter(&window).unwrap();

        assert_eq!(
            render(&filtered, "https://cdn.example/vod"),
            "#EXTM3U\n\
             #EXT-X-TARGETDURATION:10\n\
             #EXTINF:10,\n\
             https://cdn.example/vod/seg0.ts\n\
             #EXTINF:10,\n\
             https://cdn.example/vod/hd/seg1.ts\n\
             #EXT-X-ENDLIST\n"
        );
    }

    #[test]
    pub fn test_render_empty_window() {
        let window = TimeWindow::new(100, 200).unwrap();
        let filtered = Playlist::parse(PLAYLIST).filter(&window).unwrap();

        assert_eq!(
            render(&filtered, "https://cdn.example/vod"),
            "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXT-X-ENDLIST\n"
        );
    }

    #[test]
    pub fn test_render_keeps_titled_durations() {
        let window = TimeWindow::new(0, 10).unwrap();
        let filtered = Playlist::parse("#EXTM3U\n#EXTINF:10,intro.ts\nseg0.ts\n")
            .filter(&window)
            .unwrap();

        assert_eq!(
            render(&filtered, "http://h/vod"),
            "#EXTM3U\n#EXTINF:10,intro.ts\nhttp://h/vod/seg0.ts\n#EXT-X-ENDLIST\n"
        );
    }

    #[test]
    pub fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.m3u8");
        std::fs::write(&path, "stale contents that are longer than the playlist\n".repeat(20))
            .unwrap();

        let window = TimeWindow::new(10, 20).unwrap();
        let filtered = Playlist::parse(PLAYLIST).filter(&window).unwrap();
        write_playlist(&path, &filtered, "http://host/vod").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXTINF:10,\nhttp://host/vod/hd/seg1.ts\n#EXT-X-ENDLIST\n"
        );
    }

    #[test]
    pub fn test_write_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("clip.m3u8");

        let window = TimeWindow::new(0, 10).unwrap();
        let filtered = Playlist::parse(PLAYLIST).filter(&window).unwrap();

        assert!(matches!(
            write_playlist(&path, &filtered, "http://host"),
            Err(crate::error::Error::Io { .. })
        ));
    }
}
