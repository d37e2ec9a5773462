//! Application state and update loop.
//!
//! One synchronous update per input event or fetch result; catalog and
//! history I/O runs on spawned tasks that report back over the message
//! channel, so a failed or slow request can never block navigation.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sqlx::SqlitePool;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use reeldeck_catalog::provider::CatalogProvider;
use reeldeck_catalog::{
    CastMember, CatalogError, Genre, Page, Title, TitleDetails, TrendWindow, VideoRef,
};
use reeldeck_core::MediaKind;
use reeldeck_history::store::{self, HistoryEntry};
use reeldeck_nav::{Decision, NavKey, Navigator, TargetId};

use crate::config::Config;
use crate::focus::{FocusFrame, RowKey, SceneView, ScrollAnim, center_on};
use crate::stream;

/// The API rejects pages past 500 regardless of `total_pages`.
pub const MAX_PAGE: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Movies,
    Tv,
    Anime,
    Search,
    Details { kind: MediaKind, id: u64 },
    Playing,
}

impl Route {
    /// Navbar tabs reset the route stack; everything else pushes onto it.
    pub fn is_tab(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Movies | Route::Tv | Route::Anime | Route::Search
        )
    }
}

/// Everything needed to hand a title off to the embed player and record it
/// in the continue-watching list.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub kind: MediaKind,
    pub id: u64,
    pub title: String,
    pub season: i64,
    pub episode: i64,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// What activating a focus target does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Goto(Route),
    Back,
    Play(PlayRequest),
    OpenUrl(String),
    Page(i32),
    SetGenre(Option<u64>),
    AnimeTab(AnimeTab),
    EditSearch,
    RemoveHistory { id: i64, kind: MediaKind },
}

/// Result slot for one async load.
#[derive(Debug, Clone, Default)]
pub enum Load<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Load<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Load::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeRow {
    Trending,
    PopularMovies,
    TopRatedMovies,
    PopularTv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTab {
    Movies,
    Tv,
    AnimeSeries,
    AnimeMovies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimeTab {
    #[default]
    Series,
    Movies,
}

/// Fetch results reported back to the update loop.
#[derive(Debug)]
pub enum Msg {
    HomeRow(HomeRow, Result<Page<Title>, CatalogError>),
    History(Result<Vec<HistoryEntry>, sqlx::Error>),
    Grid {
        tab: GridTab,
        seq: u64,
        result: Result<Page<Title>, CatalogError>,
    },
    Genres {
        tab: GridTab,
        result: Result<Vec<Genre>, CatalogError>,
    },
    SearchResults {
        seq: u64,
        result: Result<Page<Title>, CatalogError>,
    },
    Details {
        seq: u64,
        result: Result<DetailsBundle, CatalogError>,
    },
}

#[derive(Debug, Clone)]
pub struct DetailsBundle {
    pub kind: MediaKind,
    pub details: TitleDetails,
    pub cast: Vec<CastMember>,
    pub videos: Vec<VideoRef>,
    pub similar: Vec<Title>,
}

#[derive(Debug, Default)]
pub struct HomeState {
    pub scroll: ScrollAnim,
    /// Horizontal offsets, one per card row (continue watching + 4 catalog
    /// rows).
    pub rows: [ScrollAnim; 5],
    pub trending: Load<Page<Title>>,
    pub popular_movies: Load<Page<Title>>,
    pub top_rated_movies: Load<Page<Title>>,
    pub popular_tv: Load<Page<Title>>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug)]
pub struct GridState {
    pub scroll: ScrollAnim,
    pub genre_scroll: ScrollAnim,
    pub page: u32,
    pub genre: Option<u64>,
    pub genres: Load<Vec<Genre>>,
    pub data: Load<Page<Title>>,
    pub seq: u64,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            scroll: ScrollAnim::default(),
            genre_scroll: ScrollAnim::default(),
            page: 1,
            genre: None,
            genres: Load::Idle,
            data: Load::Idle,
            seq: 0,
        }
    }
}

#[derive(Debug)]
pub struct AnimeState {
    pub scroll: ScrollAnim,
    pub tab: AnimeTab,
    pub page: u32,
    pub series: Load<Page<Title>>,
    pub movies: Load<Page<Title>>,
    pub seq: u64,
}

impl Default for AnimeState {
    fn default() -> Self {
        Self {
            scroll: ScrollAnim::default(),
            tab: AnimeTab::Series,
            page: 1,
            series: Load::Idle,
            movies: Load::Idle,
            seq: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub scroll: ScrollAnim,
    /// Text being edited; promoted to `query` on submit.
    pub input: String,
    pub query: String,
    pub editing: bool,
    pub results: Load<Page<Title>>,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct DetailsState {
    pub scroll: ScrollAnim,
    pub similar_scroll: ScrollAnim,
    pub bundle: Load<DetailsBundle>,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub struct PlayingState {
    pub title: String,
    pub url: String,
}

pub struct App {
    pub config: Config,
    pub catalog: Arc<dyn CatalogProvider>,
    pub db: SqlitePool,
    pub tx: UnboundedSender<Msg>,

    pub routes: Vec<Route>,
    pub focus: Option<TargetId>,
    pub navigator: Navigator,
    pub frame: FocusFrame,
    pub should_quit: bool,

    pub home: HomeState,
    pub movies: GridState,
    pub tv: GridState,
    pub anime: AnimeState,
    pub search: SearchState,
    pub details: DetailsState,
    pub playing: Option<PlayingState>,
}

impl App {
    pub fn new(
        config: Config,
        catalog: Arc<dyn CatalogProvider>,
        db: SqlitePool,
        tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            config,
            catalog,
            db,
            tx,
            routes: vec![Route::Home],
            focus: None,
            navigator: Navigator::new(),
            frame: FocusFrame::new(),
            should_quit: false,
            home: HomeState::default(),
            movies: GridState::default(),
            tv: GridState::default(),
            anime: AnimeState::default(),
            search: SearchState::default(),
            details: DetailsState::default(),
            playing: None,
        }
    }

    pub fn route(&self) -> Route {
        self.routes.last().cloned().unwrap_or(Route::Home)
    }

    pub fn load_initial(&mut self) {
        self.load_home();
    }

    // ----- input ---------------------------------------------------------

    pub fn on_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.on_key(key),
            // Resizes redraw on the next loop pass anyway.
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The search editor gets first claim on the event; whatever it
        // consumes reaches the navigator as already handled.
        let handled = self.handle_editor_key(key);

        let Some(nav_key) = nav_key_of(key.code) else {
            if !handled {
                self.handle_chrome_key(key);
            }
            return;
        };

        let decision = {
            let scene = SceneView {
                frame: &self.frame,
                current: self.focus,
            };
            self.navigator.decide(&scene, nav_key, handled)
        };
        self.apply(decision);
    }

    /// Text entry for the search input. Returns whether the event was
    /// consumed.
    fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        if !(matches!(self.route(), Route::Search) && self.search.editing) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.search.input.push(c),
            KeyCode::Backspace => {
                self.search.input.pop();
            }
            KeyCode::Enter => {
                self.search.editing = false;
                self.submit_search();
            }
            KeyCode::Esc => {
                self.search.editing = false;
                self.search.input = self.search.query.clone();
            }
            // Arrows and the rest are swallowed while editing.
            _ => {}
        }
        true
    }

    fn handle_chrome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.dispatch(Action::Back),
            _ => {}
        }
    }

    fn apply(&mut self, decision: Decision) {
        match decision {
            Decision::Ignored | Decision::Unchanged => {}
            Decision::FocusFirst(id) => self.focus = Some(id),
            Decision::MoveFocus(id) => {
                self.focus = Some(id);
                self.scroll_to(id);
            }
            Decision::Activate(id) => {
                if let Some(action) = self.frame.entry(id).map(|e| e.action.clone()) {
                    self.dispatch(action);
                }
            }
        }
    }

    /// Center the newly focused widget in the viewport on both axes.
    fn scroll_to(&mut self, id: TargetId) {
        let Some(entry) = self.frame.entry(id).cloned() else {
            return;
        };
        if let Some((viewport, content)) = self.frame.vertical() {
            let target = center_on(entry.content_center.1, viewport, content);
            if let Some(s) = self.vertical_scroll_mut() {
                s.glide_to(target);
            }
        }
        if let Some(row) = entry.row {
            if let Some(extent) = self.frame.row_extent(row) {
                let target = center_on(entry.content_center.0, extent.span, extent.content);
                if let Some(s) = self.row_scroll_mut(row) {
                    s.glide_to(target);
                }
            }
        }
    }

    fn vertical_scroll_mut(&mut self) -> Option<&mut ScrollAnim> {
        match self.route() {
            Route::Home => Some(&mut self.home.scroll),
            Route::Movies => Some(&mut self.movies.scroll),
            Route::Tv => Some(&mut self.tv.scroll),
            Route::Anime => Some(&mut self.anime.scroll),
            Route::Search => Some(&mut self.search.scroll),
            Route::Details { .. } => Some(&mut self.details.scroll),
            Route::Playing => None,
        }
    }

    fn row_scroll_mut(&mut self, key: RowKey) -> Option<&mut ScrollAnim> {
        match (self.route(), key) {
            (Route::Home, RowKey::Home(i)) => self.home.rows.get_mut(i as usize),
            (Route::Movies, RowKey::Genres) => Some(&mut self.movies.genre_scroll),
            (Route::Tv, RowKey::Genres) => Some(&mut self.tv.genre_scroll),
            (Route::Details { .. }, RowKey::Similar) => Some(&mut self.details.similar_scroll),
            _ => None,
        }
    }

    // ----- actions -------------------------------------------------------

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Goto(route) => self.goto(route),
            Action::Back => {
                if self.routes.len() > 1 {
                    self.routes.pop();
                }
            }
            Action::Play(req) => self.play(req),
            Action::OpenUrl(url) => self.open_url(&url),
            Action::Page(delta) => self.flip_page(delta),
            Action::SetGenre(genre) => self.set_genre(genre),
            Action::AnimeTab(tab) => {
                if self.anime.tab != tab {
                    self.anime.tab = tab;
                    let idle = match tab {
                        AnimeTab::Series => self.anime.series.is_idle(),
                        AnimeTab::Movies => self.anime.movies.is_idle(),
                    };
                    if idle {
                        self.load_anime();
                    }
                }
            }
            Action::EditSearch => {
                self.search.editing = true;
            }
            Action::RemoveHistory { id, kind } => self.remove_history(id, kind),
        }
    }

    fn goto(&mut self, route: Route) {
        if route.is_tab() {
            self.routes.clear();
            self.routes.push(route.clone());
        } else {
            if self.routes.last() == Some(&route) {
                return;
            }
            self.routes.push(route.clone());
        }

        match route {
            Route::Home => {
                if self.home.trending.is_idle() {
                    self.load_home();
                } else {
                    self.load_history();
                }
            }
            Route::Movies => {
                if self.movies.data.is_idle() {
                    self.load_grid(GridTab::Movies);
                }
                if self.movies.genres.is_idle() {
                    self.load_genres(GridTab::Movies);
                }
            }
            Route::Tv => {
                if self.tv.data.is_idle() {
                    self.load_grid(GridTab::Tv);
                }
                if self.tv.genres.is_idle() {
                    self.load_genres(GridTab::Tv);
                }
            }
            Route::Anime => {
                let idle = match self.anime.tab {
                    AnimeTab::Series => self.anime.series.is_idle(),
                    AnimeTab::Movies => self.anime.movies.is_idle(),
                };
                if idle {
                    self.load_anime();
                }
            }
            Route::Search => {}
            Route::Details { kind, id } => self.load_details(kind, id),
            Route::Playing => {}
        }
    }

    fn play(&mut self, req: PlayRequest) {
        let url = stream::embed_url(
            &self.config.stream_base,
            req.kind,
            req.id,
            req.season,
            req.episode,
        );
        info!(title = %req.title, kind = %req.kind, id = req.id, "starting playback");
        self.open_url(&url);

        let entry = HistoryEntry {
            tmdb_id: req.id as i64,
            kind: req.kind,
            title: req.title.clone(),
            poster_url: req.poster_url.clone(),
            backdrop_url: req.backdrop_url.clone(),
            season: req.kind.is_episodic().then_some(req.season),
            episode: req.kind.is_episodic().then_some(req.episode),
            updated_ts: chrono::Utc::now().timestamp(),
        };
        let pool = self.db.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = store::upsert(&pool, &entry).await {
                warn!(error = %e, "failed to record continue watching");
            }
            let _ = tx.send(Msg::History(store::list(&pool).await));
        });

        self.playing = Some(PlayingState {
            title: req.title,
            url,
        });
        self.routes.push(Route::Playing);
    }

    fn open_url(&self, url: &str) {
        if let Err(e) = stream::open_in_browser(url) {
            warn!(error = %e, url, "failed to open browser");
        }
    }

    fn flip_page(&mut self, delta: i32) {
        match self.route() {
            Route::Movies => {
                let next = step_page(self.movies.page, delta, total_of(&self.movies.data));
                if next != self.movies.page {
                    self.movies.page = next;
                    self.load_grid(GridTab::Movies);
                }
            }
            Route::Tv => {
                let next = step_page(self.tv.page, delta, total_of(&self.tv.data));
                if next != self.tv.page {
                    self.tv.page = next;
                    self.load_grid(GridTab::Tv);
                }
            }
            Route::Anime => {
                let total = match self.anime.tab {
                    AnimeTab::Series => total_of(&self.anime.series),
                    AnimeTab::Movies => total_of(&self.anime.movies),
                };
                let next = step_page(self.anime.page, delta, total);
                if next != self.anime.page {
                    self.anime.page = next;
                    self.load_anime();
                }
            }
            _ => {}
        }
    }

    fn set_genre(&mut self, genre: Option<u64>) {
        match self.route() {
            Route::Movies => {
                if self.movies.genre != genre {
                    self.movies.genre = genre;
                    self.movies.page = 1;
                    self.load_grid(GridTab::Movies);
                }
            }
            Route::Tv => {
                if self.tv.genre != genre {
                    self.tv.genre = genre;
                    self.tv.page = 1;
                    self.load_grid(GridTab::Tv);
                }
            }
            _ => {}
        }
    }

    fn remove_history(&mut self, id: i64, kind: MediaKind) {
        let pool = self.db.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = store::remove(&pool, id, kind).await {
                warn!(error = %e, "failed to remove continue watching entry");
            }
            let _ = tx.send(Msg::History(store::list(&pool).await));
        });
    }

    fn submit_search(&mut self) {
        let query = self.search.input.trim().to_string();
        self.search.query = query.clone();
        if query.is_empty() {
            self.search.results = Load::Idle;
            return;
        }
        self.search.seq += 1;
        let seq = self.search.seq;
        self.search.results = Load::Loading;
        let c = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = c.search_multi(&query, 1).await;
            let _ = tx.send(Msg::SearchResults { seq, result });
        });
    }

    // ----- loaders -------------------------------------------------------

    fn load_home(&mut self) {
        self.home.trending = Load::Loading;
        self.home.popular_movies = Load::Loading;
        self.home.top_rated_movies = Load::Loading;
        self.home.popular_tv = Load::Loading;

        for row in [
            HomeRow::Trending,
            HomeRow::PopularMovies,
            HomeRow::TopRatedMovies,
            HomeRow::PopularTv,
        ] {
            let c = self.catalog.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = match row {
                    HomeRow::Trending => c.trending(TrendWindow::Week).await,
                    HomeRow::PopularMovies => c.popular_movies(1).await,
                    HomeRow::TopRatedMovies => c.top_rated_movies(1).await,
                    HomeRow::PopularTv => c.popular_tv(1).await,
                };
                let _ = tx.send(Msg::HomeRow(row, result));
            });
        }

        self.load_history();
    }

    fn load_history(&mut self) {
        let pool = self.db.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(Msg::History(store::list(&pool).await));
        });
    }

    fn load_grid(&mut self, tab: GridTab) {
        let (seq, page, genre) = match tab {
            GridTab::Movies => {
                self.movies.seq += 1;
                self.movies.data = Load::Loading;
                (self.movies.seq, self.movies.page, self.movies.genre)
            }
            GridTab::Tv => {
                self.tv.seq += 1;
                self.tv.data = Load::Loading;
                (self.tv.seq, self.tv.page, self.tv.genre)
            }
            GridTab::AnimeSeries => {
                self.anime.seq += 1;
                self.anime.series = Load::Loading;
                (self.anime.seq, self.anime.page, None)
            }
            GridTab::AnimeMovies => {
                self.anime.seq += 1;
                self.anime.movies = Load::Loading;
                (self.anime.seq, self.anime.page, None)
            }
        };

        let c = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tab {
                GridTab::Movies => c.discover_movies(page, genre).await,
                GridTab::Tv => c.discover_tv(page, genre).await,
                GridTab::AnimeSeries => c.anime_tv(page).await,
                GridTab::AnimeMovies => c.anime_movies(page).await,
            };
            let _ = tx.send(Msg::Grid { tab, seq, result });
        });
    }

    fn load_anime(&mut self) {
        let tab = match self.anime.tab {
            AnimeTab::Series => GridTab::AnimeSeries,
            AnimeTab::Movies => GridTab::AnimeMovies,
        };
        self.load_grid(tab);
    }

    fn load_genres(&mut self, tab: GridTab) {
        match tab {
            GridTab::Movies => self.movies.genres = Load::Loading,
            GridTab::Tv => self.tv.genres = Load::Loading,
            _ => return,
        }
        let c = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tab {
                GridTab::Movies => c.movie_genres().await,
                _ => c.tv_genres().await,
            };
            let _ = tx.send(Msg::Genres { tab, result });
        });
    }

    fn load_details(&mut self, kind: MediaKind, id: u64) {
        self.details.seq += 1;
        let seq = self.details.seq;
        self.details.bundle = Load::Loading;
        self.details.scroll = ScrollAnim::default();
        self.details.similar_scroll = ScrollAnim::default();

        let c = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetch_details(c.as_ref(), kind, id).await;
            let _ = tx.send(Msg::Details { seq, result });
        });
    }

    // ----- fetch results -------------------------------------------------

    pub fn on_msg(&mut self, msg: Msg) {
        match msg {
            Msg::HomeRow(row, result) => {
                let slot = match row {
                    HomeRow::Trending => &mut self.home.trending,
                    HomeRow::PopularMovies => &mut self.home.popular_movies,
                    HomeRow::TopRatedMovies => &mut self.home.top_rated_movies,
                    HomeRow::PopularTv => &mut self.home.popular_tv,
                };
                *slot = into_load(result);
            }
            Msg::History(result) => match result {
                Ok(entries) => self.home.history = entries,
                Err(e) => warn!(error = %e, "failed to load continue watching"),
            },
            Msg::Grid { tab, seq, result } => match tab {
                GridTab::Movies => {
                    if seq == self.movies.seq {
                        self.movies.data = into_load(result);
                    }
                }
                GridTab::Tv => {
                    if seq == self.tv.seq {
                        self.tv.data = into_load(result);
                    }
                }
                GridTab::AnimeSeries => {
                    if seq == self.anime.seq {
                        self.anime.series = into_load(result);
                    }
                }
                GridTab::AnimeMovies => {
                    if seq == self.anime.seq {
                        self.anime.movies = into_load(result);
                    }
                }
            },
            Msg::Genres { tab, result } => match tab {
                GridTab::Movies => self.movies.genres = into_load(result),
                GridTab::Tv => self.tv.genres = into_load(result),
                _ => {}
            },
            Msg::SearchResults { seq, result } => {
                if seq == self.search.seq {
                    self.search.results = into_load(result);
                }
            }
            Msg::Details { seq, result } => {
                if seq == self.details.seq {
                    self.details.bundle = into_load(result);
                }
            }
        }
    }

    /// Advance scroll animations; fire-and-forget per key event, driven by
    /// the loop's tick.
    pub fn on_tick(&mut self) {
        self.home.scroll.tick();
        for row in &mut self.home.rows {
            row.tick();
        }
        self.movies.scroll.tick();
        self.movies.genre_scroll.tick();
        self.tv.scroll.tick();
        self.tv.genre_scroll.tick();
        self.anime.scroll.tick();
        self.search.scroll.tick();
        self.details.scroll.tick();
        self.details.similar_scroll.tick();
    }
}

async fn fetch_details(
    c: &dyn CatalogProvider,
    kind: MediaKind,
    id: u64,
) -> Result<DetailsBundle, CatalogError> {
    // Cast, videos, and similar titles are optional sections; only the
    // detail record itself is required.
    match kind {
        MediaKind::Movie => {
            let (details, cast, videos, similar) = tokio::join!(
                c.movie_details(id),
                c.movie_credits(id),
                c.movie_videos(id),
                c.similar_movies(id),
            );
            Ok(DetailsBundle {
                kind,
                details: details?,
                cast: cast.unwrap_or_default(),
                videos: videos.unwrap_or_default(),
                similar: similar.map(|p| p.results).unwrap_or_default(),
            })
        }
        MediaKind::Tv | MediaKind::Anime => {
            let (details, cast, videos, similar) = tokio::join!(
                c.tv_details(id),
                c.tv_credits(id),
                c.tv_videos(id),
                c.similar_tv(id),
            );
            Ok(DetailsBundle {
                kind,
                details: details?,
                cast: cast.unwrap_or_default(),
                videos: videos.unwrap_or_default(),
                similar: similar.map(|p| p.results).unwrap_or_default(),
            })
        }
    }
}

fn into_load<T>(result: Result<T, CatalogError>) -> Load<T> {
    match result {
        Ok(t) => Load::Ready(t),
        Err(e) => {
            warn!(error = %e, "catalog request failed");
            Load::Failed(e.to_string())
        }
    }
}

fn nav_key_of(code: KeyCode) -> Option<NavKey> {
    match code {
        KeyCode::Up => Some(NavKey::Up),
        KeyCode::Down => Some(NavKey::Down),
        KeyCode::Left => Some(NavKey::Left),
        KeyCode::Right => Some(NavKey::Right),
        KeyCode::Enter => Some(NavKey::Activate),
        _ => None,
    }
}

fn total_of<T>(data: &Load<Page<T>>) -> u32 {
    data.ready().map(|p| p.total_pages).unwrap_or(MAX_PAGE)
}

/// Step a 1-based page number, clamped to `[1, min(total, MAX_PAGE)]`.
pub fn step_page(page: u32, delta: i32, total_pages: u32) -> u32 {
    let max = total_pages.clamp(1, MAX_PAGE);
    page.saturating_add_signed(delta).clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_page_clamps_at_both_ends() {
        assert_eq!(step_page(1, -1, 40), 1);
        assert_eq!(step_page(1, 1, 40), 2);
        assert_eq!(step_page(40, 1, 40), 40);
        // The API's hard ceiling wins over huge catalogs.
        assert_eq!(step_page(500, 1, 731), 500);
        // A catalog with no pages still leaves page 1 valid.
        assert_eq!(step_page(1, 1, 0), 1);
    }

    #[test]
    fn tabs_reset_detail_routes_push() {
        assert!(Route::Movies.is_tab());
        assert!(
            !Route::Details {
                kind: MediaKind::Movie,
                id: 1
            }
            .is_tab()
        );
        assert!(!Route::Playing.is_tab());
    }

    #[test]
    fn nav_keys_map_from_key_codes() {
        assert_eq!(nav_key_of(KeyCode::Up), Some(NavKey::Up));
        assert_eq!(nav_key_of(KeyCode::Enter), Some(NavKey::Activate));
        assert_eq!(nav_key_of(KeyCode::Char('x')), None);
        assert_eq!(nav_key_of(KeyCode::Tab), None);
    }

    #[test]
    fn load_slots_report_readiness() {
        let mut slot: Load<u32> = Load::Idle;
        assert!(slot.is_idle());
        assert!(slot.ready().is_none());
        slot = Load::Ready(7);
        assert_eq!(slot.ready(), Some(&7));
    }
}
