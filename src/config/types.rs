//! Configuration types.
//!
//! This module defines the enums and structs used to configure the analyzer,
//! the HTTP API and logging.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    COMPUTED_FONT_SAMPLE, DEFAULT_LISTEN_ADDR, DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS,
    RENDER_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use site_profile::Config;
///
/// let config = Config {
///     capture_screenshot: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Address the HTTP API binds to
    pub listen_addr: SocketAddr,

    /// Caller-side timeout for one page analysis, in seconds
    pub render_timeout_secs: u64,

    /// Timeout for plain HTTP fetches, in seconds
    pub http_timeout_secs: u64,

    /// User-Agent presented to analyzed sites
    pub user_agent: String,

    /// Explicit Chromium binary. Discovered from the environment when `None`.
    pub chromium_path: Option<PathBuf>,

    /// Force the HTTP fallback renderer even when a browser is available
    pub http_only: bool,

    /// JSON signature file replacing the built-in tool taxonomy
    pub signatures: Option<PathBuf>,

    /// Capture a full-page screenshot for each profile
    pub capture_screenshot: bool,

    /// Number of elements whose computed font-family is sampled
    pub computed_font_sample: usize,

    /// Remote endpoint used as the basic backend in comparisons
    pub remote_basic_endpoint: Option<String>,

    /// Remote endpoint used as the enhanced backend in comparisons
    pub remote_enhanced_endpoint: Option<String>,
}

impl Config {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            listen_addr: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            render_timeout_secs: RENDER_TIMEOUT_SECS,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chromium_path: None,
            http_only: false,
            signatures: None,
            capture_screenshot: true,
            computed_font_sample: COMPUTED_FONT_SAMPLE,
            remote_basic_endpoint: None,
            remote_enhanced_endpoint: None,
        }
    }
}
