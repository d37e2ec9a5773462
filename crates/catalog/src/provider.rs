use crate::{CastMember, CatalogError, Genre, Page, Title, TitleDetails, TrendWindow, VideoRef};

/// A catalog metadata provider: paginated listings, search, and per-title
/// detail lookups, all keyed by the provider's numeric id.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Trending titles across movies and TV for the given window.
    async fn trending(&self, window: TrendWindow) -> Result<Page<Title>, CatalogError>;

    async fn popular_movies(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn top_rated_movies(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn now_playing_movies(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn upcoming_movies(&self, page: u32) -> Result<Page<Title>, CatalogError>;

    async fn popular_tv(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn top_rated_tv(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn on_the_air_tv(&self, page: u32) -> Result<Page<Title>, CatalogError>;

    /// Discovery listing, optionally restricted to one genre.
    async fn discover_movies(
        &self,
        page: u32,
        genre: Option<u64>,
    ) -> Result<Page<Title>, CatalogError>;
    async fn discover_tv(
        &self,
        page: u32,
        genre: Option<u64>,
    ) -> Result<Page<Title>, CatalogError>;

    /// Japanese animation, movies and series respectively.
    async fn anime_movies(&self, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn anime_tv(&self, page: u32) -> Result<Page<Title>, CatalogError>;

    async fn search_multi(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError>;
    async fn search_tv(&self, query: &str, page: u32) -> Result<Page<Title>, CatalogError>;

    async fn movie_details(&self, id: u64) -> Result<TitleDetails, CatalogError>;
    async fn tv_details(&self, id: u64) -> Result<TitleDetails, CatalogError>;

    async fn movie_credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError>;
    async fn tv_credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError>;

    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoRef>, CatalogError>;
    async fn tv_videos(&self, id: u64) -> Result<Vec<VideoRef>, CatalogError>;

    async fn similar_movies(&self, id: u64) -> Result<Page<Title>, CatalogError>;
    async fn similar_tv(&self, id: u64) -> Result<Page<Title>, CatalogError>;

    async fn movie_genres(&self) -> Result<Vec<Genre>, CatalogError>;
    async fn tv_genres(&self) -> Result<Vec<Genre>, CatalogError>;
}
