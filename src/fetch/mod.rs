//! Document download.
//!
//! This module resolves a document ID from a Google Docs URL, requests the DOCX
//! export and stores the payload in a per-request temporary directory.

mod document;
mod download;
mod url;

// Re-export public API
pub use document::DownloadedDocument;
pub use download::download_docx;
pub use url::{export_url, extract_doc_id};
