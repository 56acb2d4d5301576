//! gdoc_fields library: labeled field extraction from Google Docs
//!
//! This library downloads a publicly shared Google Docs document as DOCX,
//! converts it to HTML and extracts keyword values from it. The same pipeline
//! is served over HTTP by the `gdoc_fields` binary.
//!
//! # Example
//!
//! ```no_run
//! use gdoc_fields::{init_client, parse_document, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let keywords = vec!["Customer Name".to_string()];
//!
//! let outcome = parse_document(
//!     &client,
//!     &config,
//!     "https://docs.google.com/document/d/1AbC/edit",
//!     &keywords,
//! )
//! .await?;
//! println!("{:?}", outcome.structured_data);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The download and server functions require a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod convert;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
mod pipeline;
pub mod server;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use convert::{convert_docx_bytes, convert_docx_to_html};
pub use error_handling::{DocumentError, ErrorKind};
pub use extract::{extract_structured_data, StructuredData};
pub use fetch::{download_docx, extract_doc_id};
pub use initialization::{init_client, init_logger_with};
pub use pipeline::{parse_document, ParseOutcome};
pub use server::{create_app, start_server, AppState};
