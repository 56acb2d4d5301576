//! Error type definitions.
//!
//! This module defines all error types used throughout the service.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error binding the server socket.
    #[error("Failed to bind server to {address}: {source}")]
    BindError {
        /// Address the server tried to bind
        address: String,
        /// Underlying socket error
        source: std::io::Error,
    },
}

/// Coarse classification of a `DocumentError`.
///
/// The HTTP layer switches on this exhaustively to pick a status code, so every
/// new `DocumentError` variant has to decide which bucket it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad URL or malformed request body
    InvalidInput,
    /// Private document or access denied by the export service
    Unauthorized,
    /// The document ID has no corresponding document
    NotFound,
    /// Conversion, transport, filesystem and other server-side failures
    Internal,
}

/// Errors raised while fetching, converting or extracting a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The URL does not point at a Google Docs document.
    #[error("Invalid Google Docs URL")]
    InvalidUrl,

    /// The request body failed validation.
    #[error("{0}")]
    InvalidRequest(String),

    /// The export service answered 401 or 403.
    #[error("Unauthorized access to document. Make sure the document is publicly accessible.")]
    Unauthorized,

    /// The export service answered with something other than a DOCX file,
    /// typically a sign-in page for a private document.
    #[error("Unexpected response from Google Docs. Document is not publicly accessible.")]
    NotPubliclyAccessible,

    /// The export service answered 404.
    #[error("Document not found. Check that the URL is correct.")]
    NotFound,

    /// Any other download failure; the underlying message is embedded.
    #[error("Failed to download document: {0}")]
    DownloadFailed(String),

    /// The downloaded payload could not be stored on disk.
    #[error("Failed to store downloaded document: {0}")]
    Storage(#[from] std::io::Error),

    /// The converter was handed an empty path.
    #[error("Invalid file path")]
    InvalidPath,

    /// The converter was handed a path that does not exist.
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The DOCX archive or its XML parts could not be read.
    #[error("Failed to convert DOCX to HTML: {0}")]
    Conversion(String),

    /// A background task died before producing a result.
    #[error("Failed to process document: {0}")]
    Internal(String),
}

impl DocumentError {
    /// Returns the classification used to choose a response status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::InvalidUrl | DocumentError::InvalidRequest(_) => {
                ErrorKind::InvalidInput
            }
            DocumentError::Unauthorized | DocumentError::NotPubliclyAccessible => {
                ErrorKind::Unauthorized
            }
            DocumentError::NotFound => ErrorKind::NotFound,
            DocumentError::DownloadFailed(_)
            | DocumentError::Storage(_)
            | DocumentError::InvalidPath
            | DocumentError::FileNotFound(_)
            | DocumentError::Conversion(_)
            | DocumentError::Internal(_) => ErrorKind::Internal,
        }
    }
}
