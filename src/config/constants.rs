//! Configuration constants.
//!
//! This module defines the operational defaults used throughout the service,
//! including timeouts, size limits, and the export endpoint layout.

/// Default TCP port for the HTTP server (overridden by `PORT`).
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Per-request timeout in seconds for the outbound export download.
/// Export of a large document can take several seconds on Google's side, so this
/// is kept in the tens of seconds rather than the usual single digits.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL of the document export service.
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com";

/// Default User-Agent string for outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Response and body size limits
/// Maximum DOCX payload size in bytes (25MB)
/// Larger exports are rejected to prevent memory exhaustion
pub const MAX_DOCUMENT_BYTES: u64 = 25 * 1024 * 1024;

/// MIME type returned by the export endpoint for a DOCX rendering.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Prefix for per-request temporary directories.
pub const TEMP_DIR_PREFIX: &str = "gdoc-";

/// File name of the downloaded document inside its temporary directory.
pub const DOCX_FILE_NAME: &str = "document.docx";

/// Separator used when joining list items or table cells into one value.
pub const VALUE_SEPARATOR: &str = " | ";

/// Maximum HTML preview length in characters for debug logging
pub const MAX_HTML_PREVIEW_CHARS: usize = 200;
