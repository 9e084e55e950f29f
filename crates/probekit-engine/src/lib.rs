//! Probekit Engine
//!
//! Query and hook layer over a host's type metadata:
//! - **Finders**: lazy, chainable class and method searches that explain an
//!   empty result through a diagnostics trail (`finder` module)
//! - **Hooks**: declarative before/after/replace specifications and their
//!   installation through a host [`Interceptor`] (`hook` module)
//! - **Config**: `probekit.toml` defaults for queries and hook installation
//!   (`config` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use probekit_engine::{create_hooks, ClassFinder, InterceptRegistry, MethodFinder};
//!
//! let service = ClassFinder::from_loading_context(&table, &app)
//!     .filter_is_public()
//!     .filter_is_not_abstract()
//!     .filter_implement_interfaces(&["com.example.Service"])
//!     .first()?;
//!
//! let methods = MethodFinder::from_class(&service)
//!     .filter_by_name("start")
//!     .to_list_non_empty()?;
//!
//! let registry = InterceptRegistry::new();
//! let unhooks = create_hooks(&registry, methods, |spec| {
//!     spec.return_constant(true);
//! })?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod finder;
pub mod hook;

pub use config::{HookConfig, ProbeConfig, QueryConfig};
pub use error::{BulkFailure, BulkInstallError, ConfigError, FinderError, InstallationError};
pub use finder::{ClassFinder, DiagnosticsTrail, Finder, MethodFinder};
pub use hook::{
    create_hook, create_hooks, BulkFailurePolicy, HookCallback, HookInstaller, HookParam, HookSpec,
    InterceptCallbacks, InterceptRegistry, Interceptor, UndoHandle, Unhook, Value,
};

// Re-export the metadata model so callers need a single dependency
pub use probekit_types;
