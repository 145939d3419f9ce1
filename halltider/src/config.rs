//! Process configuration.
//!
//! Built once at startup from the environment and the command line, then
//! passed by reference to every component that needs it. Nothing in here is
//! mutated after construction.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the ResRobot API key.
pub const API_KEY_ENV: &str = "RESROBOTAPIKEY";

/// Default base URL for the ResRobot v2 API.
const DEFAULT_BASE_URL: &str = "https://api.resrobot.se/v2";

/// Stop whose arrival board is fetched.
const DEFAULT_SITE_ID: &str = "740049185";

/// Number of journeys requested per board.
const DEFAULT_MAX_JOURNEYS: u32 = 20;

/// Upstream request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Where the raw upstream body is written in debug mode.
const DEFAULT_DUMP_PATH: &str = "result.json";

/// Directory served under `/static`.
const DEFAULT_STATIC_DIR: &str = "static";

/// Extra time an inbound request gets on top of the upstream timeout.
///
/// The server-side limit must outlast the upstream call, or a slow upstream
/// is cut off as a bare 408 before its own timeout can be reported.
const DEFAULT_REQUEST_MARGIN_SECS: u64 = 5;

/// Offset added to the wall clock before computing countdowns.
///
/// The deployment host runs with a misconfigured timezone, so its clock reads
/// two hours behind the local (Swedish) times that ResRobot reports.
pub const CLOCK_OFFSET_HOURS: i64 = 2;

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API key variable is unset or empty
    #[error("no API key present, use env var RESROBOTAPIKEY to set it")]
    MissingApiKey,
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// ResRobot API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production ResRobot)
    pub base_url: String,
    /// Stop identifier for the arrival board
    pub site_id: String,
    /// Maximum number of journeys to request
    pub max_journeys: u32,
    /// Upstream request timeout
    pub timeout: Duration,
    /// Debug mode: console run, verbose logging, raw response dump
    pub debug: bool,
    /// Raw response dump target, only written in debug mode
    pub dump_path: PathBuf,
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Added to `timeout` to bound each inbound HTTP request
    pub request_margin: Duration,
    /// Offset added to the wall clock for countdowns
    pub clock_offset: chrono::Duration,
}

impl Config {
    /// Create a config with the given API key and default everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            site_id: DEFAULT_SITE_ID.to_string(),
            max_journeys: DEFAULT_MAX_JOURNEYS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            request_margin: Duration::from_secs(DEFAULT_REQUEST_MARGIN_SECS),
            clock_offset: chrono::Duration::hours(CLOCK_OFFSET_HOURS),
        }
    }

    /// Build the config from `RESROBOTAPIKEY`.
    pub fn from_env(debug: bool) -> Result<Self, ConfigError> {
        Self::from_key(std::env::var(API_KEY_ENV).ok(), debug)
    }

    /// Build the config from an optional key value.
    ///
    /// Split out from [`Config::from_env`] so the key check can be tested
    /// without touching the process environment.
    pub fn from_key(key: Option<String>, debug: bool) -> Result<Self, ConfigError> {
        match key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key).with_debug(debug)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the upstream request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how much longer than the upstream timeout a request may run.
    pub fn with_request_margin(mut self, margin: Duration) -> Self {
        self.request_margin = margin;
        self
    }

    /// Timeout applied to each inbound HTTP request.
    ///
    /// Always longer than the upstream timeout, so an upstream timeout is
    /// reported by the handler rather than pre-empted.
    pub fn request_timeout(&self) -> Duration {
        self.timeout + self.request_margin
    }

    /// Enable or disable debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the raw response dump path.
    pub fn with_dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_path = path.into();
        self
    }

    /// Set the static asset directory.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Dump target for the raw upstream body, if debug mode is on.
    pub fn dump_target(&self) -> Option<&std::path::Path> {
        self.debug.then_some(self.dump_path.as_path())
    }
}
