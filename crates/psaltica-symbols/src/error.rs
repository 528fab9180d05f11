//! Error types for psaltica-symbols

use std::path::PathBuf;
use thiserror::Error;

/// Symbol configuration error
///
/// Missing or unreadable files degrade to defaults and never surface here;
/// only syntactically malformed JSON is reported, at the loader boundary.
#[derive(Error, Debug)]
pub enum SymbolError {
    /// A configuration file exists but is not valid JSON
    #[error("malformed configuration {path}: {source}")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for symbol configuration operations
pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
