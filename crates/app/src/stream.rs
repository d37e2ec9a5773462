//! Playback handoff to the third-party streaming embed endpoint.
//!
//! There is no in-terminal player; the app builds the embed URL for the
//! selected title and opens it with the platform's default browser.

use std::process::{Command, Stdio};

use reeldeck_core::MediaKind;

pub const DEFAULT_STREAM_BASE: &str = "https://vidsrc.cc/v2/embed";

/// Player theming and behavior flags passed to the embed endpoint.
const PLAYER_PARAMS: &str =
    "color=E11D48&nextEpisode=true&autoplayNextEpisode=true&episodeSelector=true&overlay=true";

pub fn embed_url(base: &str, kind: MediaKind, id: u64, season: i64, episode: i64) -> String {
    match kind {
        MediaKind::Movie => format!("{base}/movie/{id}?{PLAYER_PARAMS}"),
        MediaKind::Tv => format!("{base}/tv/{id}/{season}/{episode}?{PLAYER_PARAMS}"),
        MediaKind::Anime => format!("{base}/anime/{id}/{episode}?{PLAYER_PARAMS}"),
    }
}

/// Open a URL with the platform handler. Fire-and-forget: the spawned
/// process is not waited on.
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };

    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };

    #[cfg(all(unix, not(target_os = "macos")))]
    let mut cmd = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_url_has_no_season_segment() {
        let url = embed_url(DEFAULT_STREAM_BASE, MediaKind::Movie, 27205, 1, 1);
        assert!(url.starts_with("https://vidsrc.cc/v2/embed/movie/27205?"));
        assert!(url.contains("autoplayNextEpisode=true"));
    }

    #[test]
    fn tv_url_carries_season_and_episode() {
        let url = embed_url("https://example.test/embed", MediaKind::Tv, 1396, 2, 7);
        assert!(url.starts_with("https://example.test/embed/tv/1396/2/7?"));
    }

    #[test]
    fn anime_url_carries_episode_only() {
        let url = embed_url("https://example.test/embed", MediaKind::Anime, 20, 1, 12);
        assert!(url.starts_with("https://example.test/embed/anime/20/12?"));
    }
}
