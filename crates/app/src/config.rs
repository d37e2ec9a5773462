use anyhow::Context;
use std::path::PathBuf;

use crate::stream::DEFAULT_STREAM_BASE;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub db_path: String,
    pub stream_base: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let tmdb_api_key = std::env::var("REELDECK_TMDB_KEY")
            .context("REELDECK_TMDB_KEY is not set (get a free API key at themoviedb.org)")?;

        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reeldeck");

        let db_path = std::env::var("REELDECK_DB")
            .unwrap_or_else(|_| data_dir.join("reeldeck.db").to_string_lossy().into_owned());

        let stream_base = std::env::var("REELDECK_STREAM_BASE")
            .unwrap_or_else(|_| DEFAULT_STREAM_BASE.to_string());

        let log_dir = std::env::var("REELDECK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("logs"));

        Ok(Self {
            tmdb_api_key,
            db_path,
            stream_base,
            log_dir,
        })
    }
}
