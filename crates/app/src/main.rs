use std::sync::Arc;

use anyhow::Context;
use crossterm::event::Event;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reeldeck_app::app::{App, Msg};
use reeldeck_app::config::Config;
use reeldeck_app::ui;
use reeldeck_catalog::provider::CatalogProvider;
use reeldeck_catalog::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // The TUI owns the terminal, so tracing goes to a file.
    std::fs::create_dir_all(&config.log_dir).context("failed to create log directory")?;
    let appender = tracing_appender::rolling::never(&config.log_dir, "reeldeck.log");
    let (writer, _log_guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!(db_path = %config.db_path, "connecting to database");
    let pool = reeldeck_history::connect(&config.db_path)
        .await
        .context("failed to connect to database")?;
    reeldeck_history::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("migrations complete");

    let catalog: Arc<dyn CatalogProvider> =
        Arc::new(TmdbClient::new(config.tmdb_api_key.clone()));

    let (msg_tx, mut msg_rx) = tokio::sync::mpsc::unbounded_channel();
    let (input_tx, mut input_rx) = tokio::sync::mpsc::unbounded_channel();

    // Dedicated input thread: crossterm reads are blocking.
    std::thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(ev) => {
                    if input_tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut app = App::new(config, catalog, pool, msg_tx);
    app.load_initial();

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app, &mut input_rx, &mut msg_rx).await;
    ratatui::restore();
    result
}

async fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    input_rx: &mut UnboundedReceiver<Event>,
    msg_rx: &mut UnboundedReceiver<Msg>,
) -> anyhow::Result<()> {
    let mut tick = tokio::time::interval(std::time::Duration::from_millis(50));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while !app.should_quit {
        terminal.draw(|f| ui::render(f, app))?;
        tokio::select! {
            Some(ev) = input_rx.recv() => app.on_event(ev),
            Some(msg) = msg_rx.recv() => app.on_msg(msg),
            _ = tick.tick() => app.on_tick(),
        }
    }
    Ok(())
}
