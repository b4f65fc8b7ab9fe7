use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_USERNAME: &str = "布丁";
pub const DEFAULT_POPULAR_LIMIT: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Alternate dataset file; the bundled fixture is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub username: String,
    pub popular_limit: usize,
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            data: DataConfig {
                path: lookup("CORPUS_MARKET_DATA")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
            },
            ui: UiConfig {
                username: lookup("CORPUS_MARKET_USERNAME")
                    .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
                popular_limit: lookup("CORPUS_MARKET_POPULAR_LIMIT")
                    .unwrap_or_else(|| DEFAULT_POPULAR_LIMIT.to_string())
                    .parse()?,
                tick_rate_ms: lookup("CORPUS_MARKET_TICK_MS")
                    .unwrap_or_else(|| "100".to_string())
                    .parse()?,
            },
            logging: LoggingConfig {
                dir: lookup("CORPUS_MARKET_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_log_dir),
                filter: lookup("RUST_LOG").unwrap_or_else(|| "corpus_market=info".to_string()),
            },
        })
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("corpus-market").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
