//! Host lookup errors

use thiserror::Error;

/// Errors produced when a type cannot be looked up through a host
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// No type with the given name is visible in the loading context
    #[error("Type not found: {name} (in loading context {context})")]
    TypeNotFound {
        /// Qualified type name that was requested
        name: String,
        /// Loading context the lookup ran against
        context: String,
    },
}

/// Errors that can occur while loading a metadata table file
#[derive(Debug, Error)]
pub enum TableError {
    /// Failed to read the table file
    #[error("Failed to read metadata table: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse metadata table: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A class entry is malformed
    #[error("Invalid class entry: {0}")]
    InvalidEntry(String),
}
