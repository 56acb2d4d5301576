//! HTTP client initialization.

use crate::config::Config;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for document exports.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Explicit request timeout from the config
/// - Redirect following enabled (Google answers exports with a 307 to a
///   content host)
///
/// The client is cheap to clone and is shared by all requests.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;
    Ok(client)
}
