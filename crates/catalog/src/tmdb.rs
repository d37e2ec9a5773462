//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use crate::provider::CatalogProvider;
use crate::{
    CastMember, CatalogError, Genre, Page, SeasonSummary, Title, TitleDetails, TrendWindow,
    VideoRef,
};
use reeldeck_core::MediaKind;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Animation genre id; combined with `with_original_language=ja` this is the
/// anime discovery filter.
const ANIME_GENRE: u64 = 16;

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, CatalogError> {
        let mut query = vec![("api_key", self.api_key.as_str())];
        query.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        match resp.status() {
            reqwest::StatusCode::NOT_FOUND => return Err(CatalogError::NotFound),
            status if !status.is_success() => {
                return Err(CatalogError::Provider(format!("TMDB returned {status}")));
            }
            _ => {}
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Provider(format!("parse JSON: {e}")))
    }

    async fn title_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
        kind: MediaKind,
    ) -> Result<Page<Title>, CatalogError> {
        let data = self.get_json(path, params).await?;
        Ok(parse_title_page(&data, kind))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn trending(&self, window: TrendWindow) -> Result<Page<Title>, CatalogError> {
        let data = self
            .get_json(&format!("/trending/all/{}", window.as_str()), &[])
            .await?;
        Ok(parse_mixed_page(&data))
    }

    async fn popular_movies(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/movie/popular", &[("page", &page)], MediaKind::Movie)
            .await
    }

    async fn top_rated_movies(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/movie/top_rated", &[("page", &page)], MediaKind::Movie)
            .await
    }

    async fn now_playing_movies(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/movie/now_playing", &[("page", &page)], MediaKind::Movie)
            .await
    }

    async fn upcoming_movies(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/movie/upcoming", &[("page", &page)], MediaKind::Movie)
            .await
    }

    async fn popular_tv(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/tv/popular", &[("page", &page)], MediaKind::Tv)
            .await
    }

    async fn top_rated_tv(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/tv/top_rated", &[("page", &page)], MediaKind::Tv)
            .await
    }

    async fn on_the_air_tv(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page("/tv/on_the_air", &[("page", &page)], MediaKind::Tv)
            .await
    }

    async fn discover_movies(
        &self,
        page: u32,
        genre: Option<u64>,
    ) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        let genre = genre.map(|g| g.to_string());
        let mut params = vec![("page", page.as_str())];
        if let Some(ref g) = genre {
            params.push(("with_genres", g));
        }
        self.title_page("/discover/movie", &params, MediaKind::Movie)
            .await
    }

    async fn discover_tv(
        &self,
        page: u32,
        genre: Option<u64>,
    ) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        let genre = genre.map(|g| g.to_string());
        let mut params = vec![("page", page.as_str())];
        if let Some(ref g) = genre {
            params.push(("with_genres", g));
        }
        self.title_page("/discover/tv", &params, MediaKind::Tv).await
    }

    async fn anime_movies(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        let genre = ANIME_GENRE.to_string();
        self.title_page(
            "/discover/movie",
            &[
                ("page", &page),
                ("with_genres", &genre),
                ("with_original_language", "ja"),
                ("sort_by", "popularity.desc"),
            ],
            MediaKind::Movie,
        )
        .await
    }

    async fn anime_tv(&self, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        let genre = ANIME_GENRE.to_string();
        self.title_page(
            "/discover/tv",
            &[
                ("page", &page),
                ("with_genres", &genre),
                ("with_original_language", "ja"),
                ("sort_by", "popularity.desc"),
            ],
            MediaKind::Tv,
        )
        .await
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        let data = self
            .get_json("/search/multi", &[("query", query), ("page", &page)])
            .await?;
        Ok(parse_mixed_page(&data))
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page(
            "/search/movie",
            &[("query", query), ("page", &page)],
            MediaKind::Movie,
        )
        .await
    }

    async fn search_tv(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError> {
        let page = page.to_string();
        self.title_page(
            "/search/tv",
            &[("query", query), ("page", &page)],
            MediaKind::Tv,
        )
        .await
    }

    async fn movie_details(&self, id: u64) -> Result<TitleDetails, CatalogError> {
        let data = self.get_json(&format!("/movie/{id}"), &[]).await?;
        Ok(parse_movie_details(&data))
    }

    async fn tv_details(&self, id: u64) -> Result<TitleDetails, CatalogError> {
        let data = self.get_json(&format!("/tv/{id}"), &[]).await?;
        Ok(parse_tv_details(&data))
    }

    async fn movie_credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError> {
        let data = self.get_json(&format!("/movie/{id}/credits"), &[]).await?;
        Ok(parse_cast(&data))
    }

    async fn tv_credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError> {
        let data = self.get_json(&format!("/tv/{id}/credits"), &[]).await?;
        Ok(parse_cast(&data))
    }

    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoRef>, CatalogError> {
        let data = self.get_json(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(parse_videos(&data))
    }

    async fn tv_videos(&self, id: u64) -> Result<Vec<VideoRef>, CatalogError> {
        let data = self.get_json(&format!("/tv/{id}/videos"), &[]).await?;
        Ok(parse_videos(&data))
    }

    async fn similar_movies(&self, id: u64) -> Result<Page<Title>, CatalogError> {
        self.title_page(&format!("/movie/{id}/similar"), &[], MediaKind::Movie)
            .await
    }

    async fn similar_tv(&self, id: u64) -> Result<Page<Title>, CatalogError> {
        self.title_page(&format!("/tv/{id}/similar"), &[], MediaKind::Tv)
            .await
    }

    async fn movie_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let data = self.get_json("/genre/movie/list", &[]).await?;
        Ok(parse_genres(&data))
    }

    async fn tv_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let data = self.get_json("/genre/tv/list", &[]).await?;
        Ok(parse_genres(&data))
    }
}

fn image(path: Option<&str>, size: &str) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE}/{size}{p}"))
}

fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

fn parse_title(v: &serde_json::Value, kind: MediaKind) -> Option<Title> {
    let id = v["id"].as_u64()?;
    let (name_field, date_field) = match kind {
        MediaKind::Tv => ("name", "first_air_date"),
        _ => ("title", "release_date"),
    };

    Some(Title {
        id,
        kind,
        title: v[name_field].as_str().unwrap_or("Unknown").to_string(),
        overview: v["overview"].as_str().unwrap_or("").to_string(),
        year: year_of(v[date_field].as_str()),
        vote_average: v["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: v["vote_count"].as_i64().unwrap_or(0),
        genre_ids: v["genre_ids"]
            .as_array()
            .map(|ids| ids.iter().filter_map(|g| g.as_u64()).collect())
            .unwrap_or_default(),
        poster_url: image(v["poster_path"].as_str(), "w500"),
        backdrop_url: image(v["backdrop_path"].as_str(), "original"),
    })
}

fn page_envelope<T>(data: &serde_json::Value, results: Vec<T>) -> Page<T> {
    Page {
        page: data["page"].as_u64().unwrap_or(1) as u32,
        results,
        total_pages: data["total_pages"].as_u64().unwrap_or(1) as u32,
        total_results: data["total_results"].as_u64().unwrap_or(0),
    }
}

fn parse_title_page(data: &serde_json::Value, kind: MediaKind) -> Page<Title> {
    let results = data["results"]
        .as_array()
        .map(|rs| rs.iter().filter_map(|r| parse_title(r, kind)).collect())
        .unwrap_or_default();
    page_envelope(data, results)
}

/// Trending and multi-search return movies, TV shows, and people in one
/// list; entries are dispatched on `media_type` and people are dropped.
fn parse_mixed_page(data: &serde_json::Value) -> Page<Title> {
    let results = data["results"]
        .as_array()
        .map(|rs| {
            rs.iter()
                .filter_map(|r| match r["media_type"].as_str() {
                    Some("movie") => parse_title(r, MediaKind::Movie),
                    Some("tv") => parse_title(r, MediaKind::Tv),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    page_envelope(data, results)
}

fn parse_genres(data: &serde_json::Value) -> Vec<Genre> {
    data["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| {
                    Some(Genre {
                        id: g["id"].as_u64()?,
                        name: g["name"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_movie_details(data: &serde_json::Value) -> TitleDetails {
    TitleDetails {
        id: data["id"].as_u64().unwrap_or(0),
        title: data["title"].as_str().unwrap_or("Unknown").to_string(),
        original_title: data["original_title"].as_str().map(|s| s.to_string()),
        overview: data["overview"].as_str().unwrap_or("").to_string(),
        tagline: data["tagline"]
            .as_str()
            .filter(|t| !t.is_empty())
            .map(|s| s.to_string()),
        year: year_of(data["release_date"].as_str()),
        runtime_minutes: data["runtime"].as_i64().map(|r| r as i32),
        vote_average: data["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: data["vote_count"].as_i64().unwrap_or(0),
        status: data["status"].as_str().map(|s| s.to_string()),
        genres: parse_genres(data),
        number_of_seasons: None,
        number_of_episodes: None,
        seasons: Vec::new(),
        poster_url: image(data["poster_path"].as_str(), "original"),
        backdrop_url: image(data["backdrop_path"].as_str(), "original"),
    }
}

fn parse_tv_details(data: &serde_json::Value) -> TitleDetails {
    TitleDetails {
        id: data["id"].as_u64().unwrap_or(0),
        title: data["name"].as_str().unwrap_or("Unknown").to_string(),
        original_title: data["original_name"].as_str().map(|s| s.to_string()),
        overview: data["overview"].as_str().unwrap_or("").to_string(),
        tagline: data["tagline"]
            .as_str()
            .filter(|t| !t.is_empty())
            .map(|s| s.to_string()),
        year: year_of(data["first_air_date"].as_str()),
        runtime_minutes: data["episode_run_time"]
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_i64())
            .map(|r| r as i32),
        vote_average: data["vote_average"].as_f64().unwrap_or(0.0),
        vote_count: data["vote_count"].as_i64().unwrap_or(0),
        status: data["status"].as_str().map(|s| s.to_string()),
        genres: parse_genres(data),
        number_of_seasons: data["number_of_seasons"].as_i64().map(|n| n as i32),
        number_of_episodes: data["number_of_episodes"].as_i64().map(|n| n as i32),
        seasons: data["seasons"]
            .as_array()
            .map(|ss| {
                ss.iter()
                    .map(|s| SeasonSummary {
                        season_number: s["season_number"].as_i64().unwrap_or(0) as i32,
                        name: s["name"].as_str().unwrap_or("").to_string(),
                        episode_count: s["episode_count"].as_i64().unwrap_or(0) as i32,
                        air_date: s["air_date"].as_str().map(|d| d.to_string()),
                        poster_url: image(s["poster_path"].as_str(), "w300"),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        poster_url: image(data["poster_path"].as_str(), "original"),
        backdrop_url: image(data["backdrop_path"].as_str(), "original"),
    }
}

fn parse_cast(data: &serde_json::Value) -> Vec<CastMember> {
    data["cast"]
        .as_array()
        .map(|cast| {
            cast.iter()
                .take(20)
                .filter_map(|p| {
                    Some(CastMember {
                        id: p["id"].as_u64()?,
                        name: p["name"].as_str().unwrap_or("").to_string(),
                        character: p["character"].as_str().map(|c| c.to_string()),
                        profile_url: image(p["profile_path"].as_str(), "w185"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_videos(data: &serde_json::Value) -> Vec<VideoRef> {
    data["results"]
        .as_array()
        .map(|vs| {
            vs.iter()
                .filter_map(|v| {
                    Some(VideoRef {
                        key: v["key"].as_str()?.to_string(),
                        name: v["name"].as_str().unwrap_or("").to_string(),
                        site: v["site"].as_str().unwrap_or("").to_string(),
                        kind: v["type"].as_str().unwrap_or("").to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_page_from_json() {
        let json = serde_json::json!({
            "page": 2,
            "total_pages": 731,
            "total_results": 14601,
            "results": [
                {
                    "id": 27205,
                    "title": "Inception",
                    "overview": "A thief who steals corporate secrets...",
                    "release_date": "2010-07-16",
                    "vote_average": 8.4,
                    "vote_count": 34123,
                    "genre_ids": [28, 878],
                    "poster_path": "/poster.jpg",
                    "backdrop_path": "/backdrop.jpg"
                },
                { "title": "No id, dropped" }
            ]
        });

        let page = parse_title_page(&json, MediaKind::Movie);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 731);
        assert_eq!(page.results.len(), 1);

        let t = &page.results[0];
        assert_eq!(t.id, 27205);
        assert_eq!(t.kind, MediaKind::Movie);
        assert_eq!(t.title, "Inception");
        assert_eq!(t.year, Some(2010));
        assert_eq!(t.genre_ids, vec![28, 878]);
        assert_eq!(
            t.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }

    #[test]
    fn parse_tv_page_reads_name_and_first_air_date() {
        let json = serde_json::json!({
            "page": 1,
            "total_pages": 5,
            "total_results": 100,
            "results": [{
                "id": 1396,
                "name": "Breaking Bad",
                "overview": "A high school chemistry teacher...",
                "first_air_date": "2008-01-20",
                "vote_average": 9.5,
                "vote_count": 12000,
                "genre_ids": [18]
            }]
        });

        let page = parse_title_page(&json, MediaKind::Tv);
        let t = &page.results[0];
        assert_eq!(t.kind, MediaKind::Tv);
        assert_eq!(t.title, "Breaking Bad");
        assert_eq!(t.year, Some(2008));
        assert!(t.poster_url.is_none());
    }

    #[test]
    fn mixed_page_drops_people() {
        let json = serde_json::json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 3,
            "results": [
                { "id": 1, "media_type": "movie", "title": "A", "release_date": "1999-03-31" },
                { "id": 2, "media_type": "person", "name": "Keanu Reeves" },
                { "id": 3, "media_type": "tv", "name": "B", "first_air_date": "2020-01-01" }
            ]
        });

        let page = parse_mixed_page(&json);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].kind, MediaKind::Movie);
        assert_eq!(page.results[1].kind, MediaKind::Tv);
        assert_eq!(page.results[1].title, "B");
    }

    #[test]
    fn parse_movie_details_from_json() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "original_title": "Inception",
            "overview": "A thief who steals corporate secrets...",
            "tagline": "Your mind is the scene of the crime.",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.4,
            "vote_count": 34123,
            "status": "Released",
            "poster_path": "/poster.jpg",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ]
        });

        let d = parse_movie_details(&json);
        assert_eq!(d.title, "Inception");
        assert_eq!(d.year, Some(2010));
        assert_eq!(d.runtime_minutes, Some(148));
        assert_eq!(d.tagline.as_deref(), Some("Your mind is the scene of the crime."));
        assert_eq!(d.genres.len(), 2);
        assert_eq!(d.genres[1].name, "Science Fiction");
        assert!(d.seasons.is_empty());
        assert!(
            d.poster_url
                .as_deref()
                .unwrap()
                .ends_with("/original/poster.jpg")
        );
    }

    #[test]
    fn parse_tv_details_reads_seasons() {
        let json = serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "overview": "A high school chemistry teacher...",
            "tagline": "",
            "first_air_date": "2008-01-20",
            "episode_run_time": [47, 60],
            "vote_average": 9.5,
            "vote_count": 12000,
            "status": "Ended",
            "number_of_seasons": 5,
            "number_of_episodes": 62,
            "seasons": [
                {
                    "season_number": 0,
                    "name": "Specials",
                    "episode_count": 9
                },
                {
                    "season_number": 1,
                    "name": "Season 1",
                    "episode_count": 7,
                    "air_date": "2008-01-20",
                    "poster_path": "/s1.jpg"
                }
            ]
        });

        let d = parse_tv_details(&json);
        assert_eq!(d.title, "Breaking Bad");
        assert_eq!(d.runtime_minutes, Some(47));
        // Empty taglines collapse to None.
        assert!(d.tagline.is_none());
        assert_eq!(d.number_of_seasons, Some(5));
        assert_eq!(d.seasons.len(), 2);
        assert_eq!(d.seasons[1].name, "Season 1");
        assert_eq!(
            d.seasons[1].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w300/s1.jpg")
        );
    }

    #[test]
    fn parse_cast_caps_at_twenty() {
        let members: Vec<_> = (0..30)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("Actor {i}"),
                    "character": "Someone",
                    "profile_path": "/p.jpg"
                })
            })
            .collect();
        let json = serde_json::json!({ "cast": members });

        let cast = parse_cast(&json);
        assert_eq!(cast.len(), 20);
        assert_eq!(cast[0].name, "Actor 0");
        assert_eq!(cast[0].character.as_deref(), Some("Someone"));
        assert!(
            cast[0]
                .profile_url
                .as_deref()
                .unwrap()
                .contains("/w185/p.jpg")
        );
    }

    #[test]
    fn parse_videos_from_json() {
        let json = serde_json::json!({
            "results": [
                { "key": "abc", "name": "Official Trailer", "site": "YouTube", "type": "Trailer" },
                { "name": "missing key, dropped" }
            ]
        });

        let videos = parse_videos(&json);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key, "abc");
        assert_eq!(videos[0].kind, "Trailer");
    }

    #[test]
    fn parse_genre_list() {
        let json = serde_json::json!({
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 16, "name": "Animation" }
            ]
        });

        let genres = parse_genres(&json);
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].id, 16);
        assert_eq!(genres[1].name, "Animation");
    }
}
