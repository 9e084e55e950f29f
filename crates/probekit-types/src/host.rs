//! Host lookup interface
//!
//! The host owns the loaded types. probekit only asks it two things: which
//! type names a loading context can enumerate, and how to resolve a name to
//! a [`Class`] handle.

use std::sync::Arc;

use crate::class::Class;
use crate::context::LoadingContext;
use crate::error::LookupError;

/// Type enumeration and resolution provided by the host
pub trait TypeHost {
    /// Qualified names of every type loaded by `ctx` itself (may be empty)
    fn enumerate_type_names(&self, ctx: &LoadingContext) -> Vec<String>;

    /// Resolve a qualified name in `ctx`, falling back through its parents
    fn resolve_type(&self, name: &str, ctx: &LoadingContext) -> Result<Class, LookupError>;

    /// Whether `ctx` can enumerate its types
    fn can_enumerate(&self, _ctx: &LoadingContext) -> bool {
        true
    }

    /// Nearest context in the chain starting at `ctx` that can enumerate
    fn enumerable_context(&self, ctx: &LoadingContext) -> Option<LoadingContext> {
        ctx.ancestors().find(|c| self.can_enumerate(c)).cloned()
    }
}

impl<T: TypeHost + ?Sized> TypeHost for &T {
    fn enumerate_type_names(&self, ctx: &LoadingContext) -> Vec<String> {
        (**self).enumerate_type_names(ctx)
    }

    fn resolve_type(&self, name: &str, ctx: &LoadingContext) -> Result<Class, LookupError> {
        (**self).resolve_type(name, ctx)
    }

    fn can_enumerate(&self, ctx: &LoadingContext) -> bool {
        (**self).can_enumerate(ctx)
    }
}

impl<T: TypeHost + ?Sized> TypeHost for Arc<T> {
    fn enumerate_type_names(&self, ctx: &LoadingContext) -> Vec<String> {
        (**self).enumerate_type_names(ctx)
    }

    fn resolve_type(&self, name: &str, ctx: &LoadingContext) -> Result<Class, LookupError> {
        (**self).resolve_type(name, ctx)
    }

    fn can_enumerate(&self, ctx: &LoadingContext) -> bool {
        (**self).can_enumerate(ctx)
    }
}
