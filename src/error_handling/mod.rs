//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization and document processing
//! - A closed `ErrorKind` classification consumed by the HTTP layer
//! - Categorization of upstream HTTP statuses and transport failures

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_status, categorize_transport_error};
pub use types::{DocumentError, ErrorKind, InitializationError};
