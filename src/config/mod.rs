//! Service configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, MIME types)
//! - The `Config` struct, parsed from CLI flags and environment variables

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
