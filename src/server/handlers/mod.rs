//! Server HTTP handlers.

mod health;
mod parse;

pub use health::{health_handler, not_found_handler};
pub use parse::parse_doc_handler;
