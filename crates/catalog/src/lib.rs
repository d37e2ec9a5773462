pub mod provider;
pub mod tmdb;

use reeldeck_core::MediaKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// One page of a paginated collection.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// A catalog list entry (movie or TV show) as it appears in listings,
/// search results, and similar-title rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Title {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub year: Option<i32>,
    pub vote_average: f64,
    pub vote_count: i64,
    pub genre_ids: Vec<u64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// Full detail record for one title.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleDetails {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: String,
    pub tagline: Option<String>,
    pub year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub vote_average: f64,
    pub vote_count: i64,
    pub status: Option<String>,
    pub genres: Vec<Genre>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
    pub seasons: Vec<SeasonSummary>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeasonSummary {
    pub season_number: i32,
    pub name: String,
    pub episode_count: i32,
    pub air_date: Option<String>,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

/// A promotional video attached to a title (trailers, teasers, clips).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoRef {
    pub key: String,
    pub name: String,
    pub site: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Trending collection time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendWindow {
    Day,
    Week,
}

impl TrendWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// Prefer an official YouTube trailer, then fall back to whatever video the
/// title has.
pub fn pick_trailer(videos: &[VideoRef]) -> Option<&VideoRef> {
    videos
        .iter()
        .find(|v| v.kind == "Trailer" && v.site == "YouTube")
        .or_else(|| videos.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_trailer_prefers_youtube_trailers() {
        let videos = vec![
            VideoRef {
                key: "aaa".into(),
                name: "Teaser".into(),
                site: "YouTube".into(),
                kind: "Teaser".into(),
            },
            VideoRef {
                key: "bbb".into(),
                name: "Official Trailer".into(),
                site: "YouTube".into(),
                kind: "Trailer".into(),
            },
        ];
        assert_eq!(pick_trailer(&videos).unwrap().key, "bbb");
    }

    #[test]
    fn pick_trailer_falls_back_to_first_video() {
        let videos = vec![VideoRef {
            key: "ccc".into(),
            name: "Clip".into(),
            site: "Vimeo".into(),
            kind: "Clip".into(),
        }];
        assert_eq!(pick_trailer(&videos).unwrap().key, "ccc");
        assert!(pick_trailer(&[]).is_none());
    }
}
