//! Hooks
//!
//! Declarative hook specifications and their installation on members
//! through a host [`Interceptor`].

mod installer;
mod param;
mod registry;
mod spec;

pub use installer::{
    create_hook, create_hooks, BulkFailurePolicy, HookInstaller, Interceptor, UndoHandle, Unhook,
};
pub use param::{HookParam, Value};
pub use registry::InterceptRegistry;
pub use spec::{HookCallback, HookSpec, InterceptCallbacks};
