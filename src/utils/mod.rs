//! Shared helpers.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - Static regex compilation
//! - Log preview truncation

mod preview;
mod selector;

pub use preview::preview;
pub use selector::{compile_regex_unsafe, parse_selector_unsafe};
