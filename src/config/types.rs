//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line and environment
//! based configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_EXPORT_BASE_URL, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    MAX_DOCUMENT_BYTES,
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
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Every field can be given as a CLI flag or through the environment variable
/// named next to it. It can also be constructed programmatically:
///
/// ```no_run
/// use gdoc_fields::Config;
///
/// let config = Config {
///     port: 8080,
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gdoc_fields",
    about = "Serves an HTTP API that extracts labeled fields from public Google Docs."
)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Timeout in seconds for the document download
    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value for outbound requests
    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Base URL of the document export service
    #[arg(long, env = "EXPORT_BASE_URL", default_value = DEFAULT_EXPORT_BASE_URL)]
    pub export_base_url: String,

    /// Largest accepted DOCX payload in bytes
    #[arg(long, env = "MAX_DOCUMENT_BYTES", default_value_t = MAX_DOCUMENT_BYTES)]
    pub max_document_bytes: u64,

    /// Directory under which per-request temporary directories are created
    /// (system temp directory when unset)
    #[arg(long, env = "GDOC_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Download timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            export_base_url: DEFAULT_EXPORT_BASE_URL.to_string(),
            max_document_bytes: MAX_DOCUMENT_BYTES,
            temp_dir: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
