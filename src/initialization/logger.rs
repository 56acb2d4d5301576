//! Logger setup for the service.
//!
//! Records go through the `log` facade to `env_logger`. Plain output is one
//! colored line per record; JSON output is one object per line so log shippers
//! can ingest it without a parser.

use std::io::Write;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependency modules capped below the configured level. HTML parsing and the
/// HTTP stack are chatty at debug level.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `RUST_LOG` is read first, then `level` is applied on top of it, so the
/// configured level wins for this crate while `RUST_LOG` can still tune other
/// modules.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=reqwest=debug LOG_FORMAT=json gdoc_fields --log-level debug
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.target().cyan(),
                    paint_level(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

/// One JSON log line. The message is escaped through `serde_json`; the other
/// fields never contain characters that need escaping.
fn json_line(ts_millis: i64, level: Level, target: &str, message: &str) -> String {
    let msg = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".into());
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        ts_millis, level, target, msg
    )
}

fn paint_level(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}
