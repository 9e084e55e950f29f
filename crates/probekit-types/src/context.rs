//! Loading contexts
//!
//! A loading context names the scope types are resolved in (a class loader
//! on a managed host, a module table on a native one). Contexts form a chain:
//! a child sees its own types first and then its parent's.

use std::fmt;
use std::sync::Arc;

/// A named loading context with an optional parent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadingContext {
    name: Arc<str>,
    parent: Option<Arc<LoadingContext>>,
}

impl LoadingContext {
    /// Create a root context
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Create a child context whose parent is `self`
    pub fn child(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Context name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent context, if any
    pub fn parent(&self) -> Option<&LoadingContext> {
        self.parent.as_deref()
    }

    /// Iterate this context and then each ancestor up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = &LoadingContext> {
        std::iter::successors(Some(self), |ctx| ctx.parent())
    }
}

impl fmt::Display for LoadingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_walk_to_root() {
        let system = LoadingContext::new("system");
        let app = system.child("app");
        let plugin = app.child("plugin");

        let names: Vec<&str> = plugin.ancestors().map(|c| c.name()).collect();
        assert_eq!(names, vec!["plugin", "app", "system"]);
        assert_eq!(plugin.parent().map(|p| p.name()), Some("app"));
        assert!(system.parent().is_none());
    }

    #[test]
    fn test_display_is_name() {
        let ctx = LoadingContext::new("system").child("app");
        assert_eq!(ctx.to_string(), "app");
    }
}
