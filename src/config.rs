//! Application-level configuration loading: optional JSON file, then environment overrides.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HUDDLE_BACK_CONFIG_PATH";

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_FILE: &str = "./data.sqlite";
const DEFAULT_FEED_LIMIT: u32 = 50;
const DEFAULT_MAX_FEED_LIMIT: u32 = 100;
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pub port: u16,
    pub db_file: PathBuf,
    /// Browser origin allowed by CORS; any origin when unset.
    pub client_origin: Option<String>,
    pub seed_demo_data: bool,
    pub session_idle_minutes: i64,
    pub feed_limit: u32,
    pub max_feed_limit: u32,
}

impl AppConfig {
    /// Load the configuration file (if any) and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Number of feed entries to return for a requested limit.
    pub fn feed_limit_for(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.feed_limit)
            .clamp(1, self.max_feed_limit.max(1))
    }

    fn from_file() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("PORT") {
            match value.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!(value = %value, "ignoring invalid PORT"),
            }
        }
        if let Some(value) = lookup("DB_FILE").filter(|v| !v.is_empty()) {
            self.db_file = PathBuf::from(value);
        }
        if let Some(value) = lookup("CLIENT_ORIGIN") {
            self.client_origin = Some(value).filter(|v| !v.is_empty());
        }
        if let Some(value) = lookup("SEED_DEMO_DATA") {
            match value.parse() {
                Ok(flag) => self.seed_demo_data = flag,
                Err(_) => warn!(value = %value, "ignoring invalid SEED_DEMO_DATA"),
            }
        }
        if let Some(value) = lookup("SESSION_IDLE_MINUTES") {
            match value.parse() {
                Ok(minutes) => self.session_idle_minutes = minutes,
                Err(_) => warn!(value = %value, "ignoring invalid SESSION_IDLE_MINUTES"),
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_file: PathBuf::from(DEFAULT_DB_FILE),
            client_origin: None,
            seed_demo_data: true,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            feed_limit: DEFAULT_FEED_LIMIT,
            max_feed_limit: DEFAULT_MAX_FEED_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    db_file: Option<PathBuf>,
    client_origin: Option<String>,
    seed_demo_data: Option<bool>,
    session_idle_minutes: Option<i64>,
    feed_limit: Option<u32>,
    max_feed_limit: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            db_file: value.db_file.unwrap_or(defaults.db_file),
            client_origin: value.client_origin.or(defaults.client_origin),
            seed_demo_data: value.seed_demo_data.unwrap_or(defaults.seed_demo_data),
            session_idle_minutes: value
                .session_idle_minutes
                .unwrap_or(defaults.session_idle_minutes),
            feed_limit: value.feed_limit.unwrap_or(defaults.feed_limit),
            max_feed_limit: value.max_feed_limit.unwrap_or(defaults.max_feed_limit),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
