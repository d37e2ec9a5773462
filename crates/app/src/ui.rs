//! Screen rendering.
//!
//! Each render rebuilds the focus frame: layout is computed for the whole
//! screen in content coordinates, every interactive widget registers its
//! on-screen rectangle (scroll applied) in draw order, and only the visible
//! slice is painted. The navigator therefore always sees live geometry,
//! including targets scrolled out of view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use reeldeck_catalog::{Genre, Title, pick_trailer};
use reeldeck_core::MediaKind;
use reeldeck_history::store::HistoryEntry;
use reeldeck_nav::Rect as NavRect;

use crate::app::{Action, AnimeTab, App, Load, MAX_PAGE, PlayRequest, Route};
use crate::focus::{RowExtent, RowKey};

/// Primary accent, the player theme color.
const ACCENT: Color = Color::Rgb(225, 29, 72);

const CARD_W: u16 = 24;
const CARD_H: u16 = 6;
const CARD_GAP: u16 = 1;

pub fn render(f: &mut Frame, app: &mut App) {
    app.frame.clear();

    let [nav_area, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_navbar(f, app, nav_area);
    match app.route() {
        Route::Home => render_home(f, app, body),
        Route::Movies => render_grid_screen(f, app, body, GridScreen::Movies),
        Route::Tv => render_grid_screen(f, app, body, GridScreen::Tv),
        Route::Anime => render_anime(f, app, body),
        Route::Search => render_search(f, app, body),
        Route::Details { kind, .. } => render_details(f, app, body, kind),
        Route::Playing => render_playing(f, app, body),
    }
    render_footer(f, app, footer);
}

fn dim() -> Style {
    Style::new().fg(Color::DarkGray)
}

fn bold() -> Style {
    Style::new().add_modifier(Modifier::BOLD)
}

fn err() -> Style {
    Style::new().fg(Color::Red)
}

// ----- chrome -------------------------------------------------------------

fn render_navbar(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::bordered()
        .border_style(dim())
        .title(Span::styled(" ReelDeck ", Style::new().fg(ACCENT).bold()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tabs: [(&str, &str, Route); 5] = [
        ("nav:home", "Home", Route::Home),
        ("nav:movies", "Movies", Route::Movies),
        ("nav:tv", "TV Shows", Route::Tv),
        ("nav:anime", "Anime", Route::Anime),
        ("nav:search", "Search", Route::Search),
    ];
    let active = app.routes.first().cloned();

    let mut x = inner.x + 1;
    for (slug, label, route) in tabs {
        let w = label.chars().count() as u16 + 2;
        if x + w > inner.x + inner.width {
            break;
        }
        let id = app.frame.register(
            slug,
            NavRect::new(x as f32, inner.y as f32, w as f32, 1.0),
            Action::Goto(route.clone()),
        );
        let focused = app.focus == Some(id);
        let style = if focused {
            Style::new().fg(Color::Black).bg(ACCENT).bold()
        } else if active.as_ref() == Some(&route) {
            Style::new().fg(ACCENT).bold()
        } else {
            dim()
        };
        f.render_widget(
            Paragraph::new(format!(" {label} ")).style(style),
            Rect::new(x, inner.y, w, 1),
        );
        x += w + 2;
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.search.editing {
        "type to search · Enter submit · Esc cancel"
    } else {
        "←↑↓→ move · Enter select · Esc back · q quit"
    };
    f.render_widget(Paragraph::new(hints).style(dim()).centered(), area);
}

// ----- shared pieces ------------------------------------------------------

/// Clip a laid-out rectangle to the body area; `None` when any part falls
/// outside (the widget stays registered, it just isn't painted).
fn clip_rect(body: Rect, x: f32, y: f32, w: u16, h: u16) -> Option<Rect> {
    if x < body.x as f32 || y < body.y as f32 {
        return None;
    }
    let xu = x.round() as u16;
    let yu = y.round() as u16;
    if xu < body.x || yu < body.y {
        return None;
    }
    if xu.saturating_add(w) > body.x + body.width || yu.saturating_add(h) > body.y + body.height {
        return None;
    }
    Some(Rect::new(xu, yu, w, h))
}

fn text_line(f: &mut Frame, body: Rect, v: f32, y: f32, text: &str, style: Style) {
    if let Some(r) = clip_rect(body, body.x as f32, body.y as f32 + y - v, body.width, 1) {
        f.render_widget(
            Paragraph::new(truncate(text, body.width as usize)).style(style),
            r,
        );
    }
}

#[derive(Clone)]
struct CardSpec {
    slug: String,
    title: String,
    meta: String,
    action: Action,
}

fn title_card(t: &Title, row_tag: &str) -> CardSpec {
    let year = t
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".to_string());
    CardSpec {
        slug: format!("card:{}:{}:{row_tag}", t.kind, t.id),
        title: t.title.clone(),
        meta: format!("{year} · ★ {:.1}", t.vote_average),
        action: Action::Goto(Route::Details {
            kind: t.kind,
            id: t.id,
        }),
    }
}

fn play_request_of(t: &Title, season: i64, episode: i64) -> PlayRequest {
    PlayRequest {
        kind: t.kind,
        id: t.id,
        title: t.title.clone(),
        season,
        episode,
        poster_url: t.poster_url.clone(),
        backdrop_url: t.backdrop_url.clone(),
    }
}

fn draw_card(f: &mut Frame, area: Rect, title: &str, meta: &str, focused: bool) {
    let border = if focused {
        Style::new().fg(ACCENT).bold()
    } else {
        dim()
    };
    let block = Block::bordered().border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(truncate(title, inner.width as usize), bold())),
        Line::from(Span::styled(
            truncate(meta, inner.width as usize),
            Style::new().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

/// One-line button. `content_x` is measured inside the owning row when
/// `row_key` is set, otherwise from the body's left edge. Returns the chip
/// width.
#[allow(clippy::too_many_arguments)]
fn render_chip(
    f: &mut Frame,
    app: &mut App,
    body: Rect,
    v: f32,
    content_x: f32,
    y: f32,
    label: &str,
    slug: &str,
    action: Action,
    row_key: Option<RowKey>,
    h_scroll: f32,
    selected: bool,
) -> f32 {
    let w = label.chars().count() as u16 + 2;
    let vx = body.x as f32 + content_x - h_scroll;
    let vy = body.y as f32 + y - v;
    let id = app.frame.register_scrolled(
        slug,
        NavRect::new(vx, vy, w as f32, 1.0),
        action,
        (content_x + w as f32 / 2.0, y + 0.5),
        row_key,
    );
    let focused = app.focus == Some(id);
    let style = match (focused, selected) {
        (true, _) => Style::new().fg(Color::Black).bg(ACCENT).bold(),
        (false, true) => Style::new().fg(ACCENT).bold(),
        (false, false) => Style::new().fg(Color::Gray),
    };
    if let Some(r) = clip_rect(body, vx, vy, w, 1) {
        f.render_widget(Paragraph::new(format!("[{label}]")).style(style), r);
    }
    w as f32
}

/// Horizontal strip of uniform cards. Registers every card, draws the
/// visible ones, returns the content height consumed (label + cards).
#[allow(clippy::too_many_arguments)]
fn render_card_row(
    f: &mut Frame,
    app: &mut App,
    body: Rect,
    v: f32,
    y: f32,
    label: &str,
    row_key: Option<RowKey>,
    h_scroll: f32,
    cards: &[CardSpec],
) -> f32 {
    text_line(f, body, v, y, label, bold());

    let row_y = y + 1.0;
    let stride = (CARD_W + CARD_GAP) as f32;
    if let Some(key) = row_key {
        app.frame.set_row(
            key,
            RowExtent {
                span: body.width as f32,
                content: cards.len() as f32 * stride,
            },
        );
    }
    for (i, card) in cards.iter().enumerate() {
        let cx = i as f32 * stride;
        let vx = body.x as f32 + cx - h_scroll;
        let vy = body.y as f32 + row_y - v;
        let id = app.frame.register_scrolled(
            &card.slug,
            NavRect::new(vx, vy, CARD_W as f32, CARD_H as f32),
            card.action.clone(),
            (
                cx + CARD_W as f32 / 2.0,
                row_y + CARD_H as f32 / 2.0,
            ),
            row_key,
        );
        let focused = app.focus == Some(id);
        if let Some(r) = clip_rect(body, vx, vy, CARD_W, CARD_H) {
            draw_card(f, r, &card.title, &card.meta, focused);
        }
    }
    1.0 + CARD_H as f32
}

/// Wrapping grid of cards for listing screens. Returns content height.
fn render_card_grid(f: &mut Frame, app: &mut App, body: Rect, v: f32, y: f32, cards: &[CardSpec]) -> f32 {
    let cols = (((body.width + CARD_GAP) / (CARD_W + CARD_GAP)).max(1)) as usize;
    for (i, card) in cards.iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        let vx = body.x as f32 + (col as f32) * (CARD_W + CARD_GAP) as f32;
        let cy = y + (row * CARD_H as usize) as f32;
        let vy = body.y as f32 + cy - v;
        let id = app.frame.register_scrolled(
            &card.slug,
            NavRect::new(vx, vy, CARD_W as f32, CARD_H as f32),
            card.action.clone(),
            (vx + CARD_W as f32 / 2.0, cy + CARD_H as f32 / 2.0),
            None,
        );
        let focused = app.focus == Some(id);
        if let Some(r) = clip_rect(body, vx, vy, CARD_W, CARD_H) {
            draw_card(f, r, &card.title, &card.meta, focused);
        }
    }
    (cards.len().div_ceil(cols) * CARD_H as usize) as f32
}

fn catalog_row_cards(
    load: &Load<reeldeck_catalog::Page<Title>>,
    skip: usize,
    tag: &str,
) -> Result<Vec<CardSpec>, String> {
    match load {
        Load::Ready(p) => Ok(p
            .results
            .iter()
            .skip(skip)
            .take(20)
            .map(|t| title_card(t, tag))
            .collect()),
        Load::Failed(e) => Err(format!("Couldn't load: {e}")),
        Load::Idle | Load::Loading => Err("Loading…".to_string()),
    }
}

// ----- home ---------------------------------------------------------------

fn render_home(f: &mut Frame, app: &mut App, body: Rect) {
    let v = app.home.scroll.current();
    let mut y = 0.0f32;

    let hero = app
        .home
        .trending
        .ready()
        .and_then(|p| p.results.first().cloned());
    let trending_error = match &app.home.trending {
        Load::Failed(e) => Some(e.clone()),
        _ => None,
    };

    if let Some(hero) = hero {
        y += render_hero(f, app, body, v, y, &hero);
    } else if let Some(e) = trending_error {
        text_line(f, body, v, y, &format!("Couldn't load trending: {e}"), err());
        y += 2.0;
    } else {
        text_line(f, body, v, y, "Loading…", dim());
        y += 2.0;
    }

    let history = app.home.history.clone();
    if !history.is_empty() {
        y += render_history_row(f, app, body, v, y, &history);
        y += 1.0;
    }

    let row_defs: [(u8, &str, Result<Vec<CardSpec>, String>); 4] = [
        (
            1,
            "🔥 Trending Now",
            catalog_row_cards(&app.home.trending, 1, "trending"),
        ),
        (
            2,
            "🎬 Popular Movies",
            catalog_row_cards(&app.home.popular_movies, 0, "popular-movies"),
        ),
        (
            3,
            "⭐ Top Rated Movies",
            catalog_row_cards(&app.home.top_rated_movies, 0, "top-rated"),
        ),
        (
            4,
            "📺 Popular TV Shows",
            catalog_row_cards(&app.home.popular_tv, 0, "popular-tv"),
        ),
    ];

    for (key, label, content) in row_defs {
        match content {
            Ok(cards) if !cards.is_empty() => {
                let h = app.home.rows[key as usize].current();
                y += render_card_row(f, app, body, v, y, label, Some(RowKey::Home(key)), h, &cards);
            }
            Ok(_) => continue,
            Err(note) => {
                text_line(f, body, v, y, label, bold());
                text_line(f, body, v, y + 1.0, &note, dim());
                y += 2.0;
            }
        }
        y += 1.0;
    }

    app.frame
        .set_vertical(body.height as f32, y.max(body.height as f32));
}

fn render_hero(f: &mut Frame, app: &mut App, body: Rect, v: f32, y: f32, hero: &Title) -> f32 {
    const HERO_H: u16 = 9;
    let vy = body.y as f32 + y - v;
    if let Some(r) = clip_rect(body, body.x as f32, vy, body.width, HERO_H) {
        let block = Block::bordered()
            .border_style(Style::new().fg(ACCENT))
            .title(Span::styled(format!(" {} ", hero.title), bold()));
        let inner = block.inner(r);
        f.render_widget(block, r);

        let year = hero
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "—".to_string());
        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "{year} · ★ {:.1} ({} votes) · {}",
                    hero.vote_average, hero.vote_count, hero.kind
                ),
                Style::new().fg(Color::Gray),
            )),
            Line::default(),
        ];
        for l in wrap_text(&hero.overview, inner.width as usize).into_iter().take(3) {
            lines.push(Line::from(l));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }

    // Buttons sit on the hero's last inner line.
    let by = y + (HERO_H - 2) as f32;
    let mut bx = 2.0f32;
    bx += render_chip(
        f,
        app,
        body,
        v,
        bx,
        by,
        "▶ Play",
        "hero:play",
        Action::Play(play_request_of(hero, 1, 1)),
        None,
        0.0,
        false,
    ) + 2.0;
    render_chip(
        f,
        app,
        body,
        v,
        bx,
        by,
        "More Info",
        "hero:info",
        Action::Goto(Route::Details {
            kind: hero.kind,
            id: hero.id,
        }),
        None,
        0.0,
        false,
    );

    (HERO_H + 1) as f32
}

fn render_history_row(
    f: &mut Frame,
    app: &mut App,
    body: Rect,
    v: f32,
    y: f32,
    entries: &[HistoryEntry],
) -> f32 {
    text_line(f, body, v, y, "▶ Continue Watching", bold());

    let row_y = y + 1.0;
    let stride = (CARD_W + CARD_GAP) as f32;
    app.frame.set_row(
        RowKey::Home(0),
        RowExtent {
            span: body.width as f32,
            content: entries.len() as f32 * stride,
        },
    );
    let h = app.home.rows[0].current();

    for (i, e) in entries.iter().enumerate() {
        let cx = i as f32 * stride;
        let vx = body.x as f32 + cx - h;
        let vy = body.y as f32 + row_y - v;
        let req = PlayRequest {
            kind: e.kind,
            id: e.tmdb_id.max(0) as u64,
            title: e.title.clone(),
            season: e.season.unwrap_or(1),
            episode: e.episode.unwrap_or(1),
            poster_url: e.poster_url.clone(),
            backdrop_url: e.backdrop_url.clone(),
        };
        let id = app.frame.register_scrolled(
            &format!("cw:{}:{}", e.kind, e.tmdb_id),
            NavRect::new(vx, vy, CARD_W as f32, CARD_H as f32),
            Action::Play(req),
            (cx + CARD_W as f32 / 2.0, row_y + CARD_H as f32 / 2.0),
            Some(RowKey::Home(0)),
        );
        let meta = match (e.season, e.episode) {
            (Some(s), Some(ep)) => format!("Resume S{s} E{ep}"),
            _ => "Resume".to_string(),
        };
        if let Some(r) = clip_rect(body, vx, vy, CARD_W, CARD_H) {
            draw_card(f, r, &e.title, &meta, app.focus == Some(id));
        }

        render_chip(
            f,
            app,
            body,
            v,
            cx,
            row_y + CARD_H as f32,
            "✕ remove",
            &format!("cwx:{}:{}", e.kind, e.tmdb_id),
            Action::RemoveHistory {
                id: e.tmdb_id,
                kind: e.kind,
            },
            Some(RowKey::Home(0)),
            h,
            false,
        );
    }

    1.0 + CARD_H as f32 + 1.0
}

// ----- listing screens ----------------------------------------------------

enum GridScreen {
    Movies,
    Tv,
}

fn render_grid_screen(f: &mut Frame, app: &mut App, body: Rect, which: GridScreen) {
    let (label, tag) = match which {
        GridScreen::Movies => ("Movies", "movies"),
        GridScreen::Tv => ("TV Shows", "tv"),
    };
    let (v, gscroll, page, genre_sel, genres, data) = {
        let s = match which {
            GridScreen::Movies => &app.movies,
            GridScreen::Tv => &app.tv,
        };
        (
            s.scroll.current(),
            s.genre_scroll.current(),
            s.page,
            s.genre,
            s.genres.ready().cloned().unwrap_or_default(),
            s.data.clone(),
        )
    };
    let total = data
        .ready()
        .map(|p| p.total_pages.clamp(1, MAX_PAGE))
        .unwrap_or(1);

    let mut y = 0.0f32;
    let header = format!("{label} — Page {page}/{total}");
    text_line(f, body, v, y, &header, bold());
    let mut bx = header.chars().count() as f32 + 3.0;
    bx += render_chip(
        f, app, body, v, bx, y, "◀ Prev", &format!("{tag}:prev"), Action::Page(-1), None, 0.0,
        false,
    ) + 1.0;
    render_chip(
        f, app, body, v, bx, y, "Next ▶", &format!("{tag}:next"), Action::Page(1), None, 0.0,
        false,
    );
    y += 2.0;

    y += render_genre_chips(f, app, body, v, y, tag, gscroll, genre_sel, &genres);

    match &data {
        Load::Ready(p) if p.results.is_empty() => {
            text_line(f, body, v, y, "Nothing here.", dim());
            y += 1.0;
        }
        Load::Ready(p) => {
            let cards: Vec<CardSpec> = p.results.iter().map(|t| title_card(t, tag)).collect();
            y += render_card_grid(f, app, body, v, y, &cards);
        }
        Load::Failed(e) => {
            text_line(f, body, v, y, &format!("Couldn't load: {e}"), err());
            y += 1.0;
        }
        Load::Idle | Load::Loading => {
            text_line(f, body, v, y, "Loading…", dim());
            y += 1.0;
        }
    }

    app.frame
        .set_vertical(body.height as f32, y.max(body.height as f32));
}

/// Genre filter strip. Returns consumed height.
#[allow(clippy::too_many_arguments)]
fn render_genre_chips(
    f: &mut Frame,
    app: &mut App,
    body: Rect,
    v: f32,
    y: f32,
    tag: &str,
    gscroll: f32,
    selected: Option<u64>,
    genres: &[Genre],
) -> f32 {
    let mut gx = 0.0f32;
    gx += render_chip(
        f,
        app,
        body,
        v,
        gx,
        y,
        "All",
        &format!("{tag}:genre:all"),
        Action::SetGenre(None),
        Some(RowKey::Genres),
        gscroll,
        selected.is_none(),
    ) + 1.0;
    for g in genres {
        gx += render_chip(
            f,
            app,
            body,
            v,
            gx,
            y,
            &g.name,
            &format!("{tag}:genre:{}", g.id),
            Action::SetGenre(Some(g.id)),
            Some(RowKey::Genres),
            gscroll,
            selected == Some(g.id),
        ) + 1.0;
    }
    app.frame.set_row(
        RowKey::Genres,
        RowExtent {
            span: body.width as f32,
            content: gx,
        },
    );
    2.0
}

fn render_anime(f: &mut Frame, app: &mut App, body: Rect) {
    let v = app.anime.scroll.current();
    let page = app.anime.page;
    let tab = app.anime.tab;
    let data = match tab {
        AnimeTab::Series => app.anime.series.clone(),
        AnimeTab::Movies => app.anime.movies.clone(),
    };
    let total = data
        .ready()
        .map(|p| p.total_pages.clamp(1, MAX_PAGE))
        .unwrap_or(1);

    let mut y = 0.0f32;
    let header = format!("Anime — Page {page}/{total}");
    text_line(f, body, v, y, &header, bold());
    let mut bx = header.chars().count() as f32 + 3.0;
    bx += render_chip(
        f, app, body, v, bx, y, "◀ Prev", "anime:prev", Action::Page(-1), None, 0.0, false,
    ) + 1.0;
    render_chip(
        f, app, body, v, bx, y, "Next ▶", "anime:next", Action::Page(1), None, 0.0, false,
    );
    y += 2.0;

    let mut tx = 0.0f32;
    tx += render_chip(
        f,
        app,
        body,
        v,
        tx,
        y,
        "TV Series",
        "anime:tab:series",
        Action::AnimeTab(AnimeTab::Series),
        None,
        0.0,
        tab == AnimeTab::Series,
    ) + 1.0;
    render_chip(
        f,
        app,
        body,
        v,
        tx,
        y,
        "Movies",
        "anime:tab:movies",
        Action::AnimeTab(AnimeTab::Movies),
        None,
        0.0,
        tab == AnimeTab::Movies,
    );
    y += 2.0;

    match &data {
        Load::Ready(p) if p.results.is_empty() => {
            text_line(f, body, v, y, "Nothing here.", dim());
            y += 1.0;
        }
        Load::Ready(p) => {
            let cards: Vec<CardSpec> = p.results.iter().map(|t| title_card(t, "anime")).collect();
            y += render_card_grid(f, app, body, v, y, &cards);
        }
        Load::Failed(e) => {
            text_line(f, body, v, y, &format!("Couldn't load: {e}"), err());
            y += 1.0;
        }
        Load::Idle | Load::Loading => {
            text_line(f, body, v, y, "Loading…", dim());
            y += 1.0;
        }
    }

    app.frame
        .set_vertical(body.height as f32, y.max(body.height as f32));
}

// ----- search -------------------------------------------------------------

fn render_search(f: &mut Frame, app: &mut App, body: Rect) {
    let v = app.search.scroll.current();
    let mut y = 0.0f32;

    let editing = app.search.editing;
    let shown = if editing {
        format!("{}▏", app.search.input)
    } else if app.search.input.is_empty() {
        "Press Enter to type a search…".to_string()
    } else {
        app.search.input.clone()
    };

    let vy = body.y as f32 + y - v;
    let id = app.frame.register_scrolled(
        "search:input",
        NavRect::new(body.x as f32, vy, body.width as f32, 3.0),
        Action::EditSearch,
        (body.width as f32 / 2.0, y + 1.5),
        None,
    );
    let focused = app.focus == Some(id);
    if let Some(r) = clip_rect(body, body.x as f32, vy, body.width, 3) {
        let border = if editing {
            Style::new().fg(ACCENT).bold()
        } else if focused {
            Style::new().fg(ACCENT)
        } else {
            dim()
        };
        let block = Block::bordered().title(" Search ").border_style(border);
        let inner = block.inner(r);
        f.render_widget(block, r);
        let style = if app.search.input.is_empty() && !editing {
            dim()
        } else {
            Style::new()
        };
        f.render_widget(
            Paragraph::new(truncate(&shown, inner.width as usize)).style(style),
            inner,
        );
    }
    y += 4.0;

    let query = app.search.query.clone();
    if query.is_empty() {
        text_line(f, body, v, y, "Search across movies and TV shows.", dim());
        y += 1.0;
    } else {
        match &app.search.results.clone() {
            Load::Ready(p) if p.results.is_empty() => {
                text_line(f, body, v, y, &format!("No results for \"{query}\"."), dim());
                y += 1.0;
            }
            Load::Ready(p) => {
                text_line(
                    f,
                    body,
                    v,
                    y,
                    &format!("{} results for \"{query}\"", p.total_results),
                    bold(),
                );
                y += 2.0;
                let cards: Vec<CardSpec> =
                    p.results.iter().map(|t| title_card(t, "search")).collect();
                y += render_card_grid(f, app, body, v, y, &cards);
            }
            Load::Failed(e) => {
                text_line(f, body, v, y, &format!("Search failed: {e}"), err());
                y += 1.0;
            }
            Load::Idle | Load::Loading => {
                text_line(f, body, v, y, "Searching…", dim());
                y += 1.0;
            }
        }
    }

    app.frame
        .set_vertical(body.height as f32, y.max(body.height as f32));
}

// ----- details ------------------------------------------------------------

fn render_details(f: &mut Frame, app: &mut App, body: Rect, kind: MediaKind) {
    let v = app.details.scroll.current();
    let mut y = 0.0f32;

    render_chip(
        f, app, body, v, 0.0, y, "← Back", "details:back", Action::Back, None, 0.0, false,
    );
    y += 2.0;

    let bundle = match &app.details.bundle {
        Load::Ready(b) => b.clone(),
        Load::Failed(e) => {
            text_line(f, body, v, y, &format!("Couldn't load details: {e}"), err());
            app.frame.set_vertical(body.height as f32, body.height as f32);
            return;
        }
        Load::Idle | Load::Loading => {
            text_line(f, body, v, y, "Loading…", dim());
            app.frame.set_vertical(body.height as f32, body.height as f32);
            return;
        }
    };
    let d = &bundle.details;

    let year = d
        .year
        .map(|yr| yr.to_string())
        .unwrap_or_else(|| "—".to_string());
    text_line(f, body, v, y, &format!("{} ({year})", d.title), bold());
    y += 1.0;

    if let Some(tagline) = &d.tagline {
        text_line(
            f,
            body,
            v,
            y,
            tagline,
            Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        );
        y += 1.0;
    }

    let mut meta = format!("★ {:.1} ({} votes)", d.vote_average, d.vote_count);
    if let Some(rt) = d.runtime_minutes {
        meta.push_str(&format!(" · {rt} min"));
    }
    if let Some(status) = &d.status {
        meta.push_str(&format!(" · {status}"));
    }
    if let (Some(s), Some(e)) = (d.number_of_seasons, d.number_of_episodes) {
        meta.push_str(&format!(" · {s} seasons · {e} episodes"));
    }
    text_line(f, body, v, y, &meta, Style::new().fg(Color::Gray));
    y += 1.0;

    if !d.genres.is_empty() {
        let names: Vec<&str> = d.genres.iter().map(|g| g.name.as_str()).collect();
        text_line(f, body, v, y, &names.join(" · "), dim());
        y += 1.0;
    }
    y += 1.0;

    for line in wrap_text(&d.overview, body.width.saturating_sub(2) as usize)
        .into_iter()
        .take(6)
    {
        text_line(f, body, v, y, &line, Style::new());
        y += 1.0;
    }
    y += 1.0;

    let mut bx = 0.0f32;
    bx += render_chip(
        f,
        app,
        body,
        v,
        bx,
        y,
        "▶ Play",
        "details:play",
        Action::Play(PlayRequest {
            kind,
            id: d.id,
            title: d.title.clone(),
            season: 1,
            episode: 1,
            poster_url: d.poster_url.clone(),
            backdrop_url: d.backdrop_url.clone(),
        }),
        None,
        0.0,
        false,
    ) + 2.0;
    if let Some(trailer) = pick_trailer(&bundle.videos) {
        render_chip(
            f,
            app,
            body,
            v,
            bx,
            y,
            &format!("Trailer: {}", truncate(&trailer.name, 28)),
            "details:trailer",
            Action::OpenUrl(format!("https://www.youtube.com/watch?v={}", trailer.key)),
            None,
            0.0,
            false,
        );
    }
    y += 2.0;

    if !bundle.cast.is_empty() {
        text_line(f, body, v, y, "Cast", bold());
        y += 1.0;
        let names: Vec<String> = bundle
            .cast
            .iter()
            .take(6)
            .map(|c| match &c.character {
                Some(ch) if !ch.is_empty() => format!("{} ({ch})", c.name),
                _ => c.name.clone(),
            })
            .collect();
        for line in wrap_text(&names.join(" · "), body.width.saturating_sub(2) as usize)
            .into_iter()
            .take(2)
        {
            text_line(f, body, v, y, &line, Style::new().fg(Color::Gray));
            y += 1.0;
        }
        y += 1.0;
    }

    let seasons: Vec<String> = d
        .seasons
        .iter()
        .filter(|s| s.season_number > 0)
        .map(|s| format!("S{} · {} eps", s.season_number, s.episode_count))
        .collect();
    if !seasons.is_empty() {
        text_line(f, body, v, y, "Seasons", bold());
        text_line(f, body, v, y + 1.0, &seasons.join("   "), Style::new().fg(Color::Gray));
        y += 3.0;
    }

    if !bundle.similar.is_empty() {
        let cards: Vec<CardSpec> = bundle
            .similar
            .iter()
            .take(20)
            .map(|t| title_card(t, "similar"))
            .collect();
        let h = app.details.similar_scroll.current();
        y += render_card_row(
            f,
            app,
            body,
            v,
            y,
            "More Like This",
            Some(RowKey::Similar),
            h,
            &cards,
        );
    }

    app.frame
        .set_vertical(body.height as f32, y.max(body.height as f32));
}

// ----- playing ------------------------------------------------------------

fn render_playing(f: &mut Frame, app: &mut App, body: Rect) {
    let Some(playing) = app.playing.clone() else {
        text_line(f, body, 0.0, 0.0, "Nothing playing.", dim());
        return;
    };

    let area = centered_rect(body, 64, 9);
    let block = Block::bordered()
        .border_style(Style::new().fg(ACCENT))
        .title(" Now Playing ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            truncate(&playing.title, inner.width as usize),
            bold(),
        )),
        Line::default(),
        Line::from("Streaming in your browser."),
        Line::from(Span::styled(
            truncate(&playing.url, inner.width as usize),
            dim(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);

    let chip_y = (inner.y + inner.height).saturating_sub(1) as f32 - body.y as f32;
    let chip_x = (inner.x + 1) as f32 - body.x as f32;
    let w = render_chip(
        f,
        app,
        body,
        0.0,
        chip_x,
        chip_y,
        "Reopen",
        "playing:reopen",
        Action::OpenUrl(playing.url.clone()),
        None,
        0.0,
        false,
    );
    render_chip(
        f,
        app,
        body,
        0.0,
        chip_x + w + 2.0,
        chip_y,
        "← Back",
        "playing:back",
        Action::Back,
        None,
        0.0,
        false,
    );
}

// ----- text helpers -------------------------------------------------------

fn truncate(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        return s.to_string();
    }
    let taken: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{taken}…")
}

fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
