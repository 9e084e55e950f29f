//! Error types for the probekit engine

use std::fmt;

use probekit_types::LookupError;
use thiserror::Error;

use crate::hook::Unhook;

/// Errors raised while evaluating a finder
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinderError {
    /// A required-result terminal produced nothing
    ///
    /// `message` is the rendered diagnostics trail: the source description
    /// followed by every filter in the order it was applied.
    #[error("{finder}: {message}")]
    NoCandidate {
        /// Finder that produced no result
        finder: &'static str,
        /// Rendered diagnostics trail
        message: String,
    },

    /// A type name could not be resolved by the host
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// The host refused or failed to register an intercept
///
/// Produced by [`Interceptor`](crate::hook::Interceptor) implementations and
/// passed through unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Failed to install intercept on {member}: {reason}")]
pub struct InstallationError {
    /// Display form of the target member
    pub member: String,
    /// Host-provided reason
    pub reason: String,
}

impl InstallationError {
    /// Create an installation error
    pub fn new(member: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self {
            member: member.to_string(),
            reason: reason.into(),
        }
    }
}

/// One failed member of a bulk installation
#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    /// Position of the member in the input
    pub index: usize,
    /// Error reported by the host
    pub error: InstallationError,
}

/// At least one member of a bulk installation failed
///
/// Every member was attempted. `failures` lists the failed ones in input
/// order. `installed` holds the intercepts that succeeded when the installer
/// keeps them; under rollback it is empty.
#[derive(Debug, Error)]
#[error(
    "{} of {total} hook installations failed; first: {}",
    .failures.len(),
    first_error(.failures)
)]
pub struct BulkInstallError {
    /// Number of members attempted
    pub total: usize,
    /// Per-member failures in input order
    pub failures: Vec<BulkFailure>,
    /// Successful intercepts left installed
    pub installed: Vec<Unhook>,
}

impl BulkInstallError {
    /// First failure in input order
    pub fn first(&self) -> Option<&InstallationError> {
        self.failures.first().map(|f| &f.error)
    }
}

fn first_error(failures: &[BulkFailure]) -> String {
    failures
        .first()
        .map(|f| f.error.to_string())
        .unwrap_or_default()
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}
