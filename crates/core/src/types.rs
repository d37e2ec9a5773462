use serde::{Deserialize, Serialize};

/// Media kind stored in the `continue_watching.kind` column and used to pick
/// catalog endpoints and stream URLs.
///
/// `Anime` titles come back from the catalog as movies or TV shows; the kind
/// is assigned by the screen that fetched them so playback and history can
/// use the anime-specific stream path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Anime => "anime",
        }
    }

    /// Inverse of [`as_str`](Self::as_str), for values read back from storage.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            "anime" => Some(Self::Anime),
            _ => None,
        }
    }

    /// Whether titles of this kind play per-episode.
    pub fn is_episodic(self) -> bool {
        matches!(self, Self::Tv | Self::Anime)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_str() {
        for kind in [MediaKind::Movie, MediaKind::Tv, MediaKind::Anime] {
            assert_eq!(MediaKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MediaKind::parse("series"), None);
    }
}
