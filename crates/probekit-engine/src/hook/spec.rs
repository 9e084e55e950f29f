//! Hook specification
//!
//! A [`HookSpec`] binds one target member to at most one before-callback
//! and at most one after-callback. `replace`, `interrupt` and
//! `return_constant` are shorthands that each overwrite the before-callback;
//! the last one set wins. The after-callback is independent of them.

use std::fmt;
use std::sync::Arc;

use probekit_types::Member;

use super::param::{HookParam, Value};

/// Callback run around an intercepted call
pub type HookCallback = Arc<dyn Fn(&mut HookParam) + Send + Sync>;

/// The composed callback pair handed to the host
#[derive(Clone, Default)]
pub struct InterceptCallbacks {
    /// Runs before the original body
    pub before: Option<HookCallback>,
    /// Runs after the original body (or after a substituted result)
    pub after: Option<HookCallback>,
}

impl InterceptCallbacks {
    /// Run the before-callback, if any
    pub fn run_before(&self, param: &mut HookParam) {
        if let Some(before) = &self.before {
            before(param);
        }
    }

    /// Run the after-callback, if any
    pub fn run_after(&self, param: &mut HookParam) {
        if let Some(after) = &self.after {
            after(param);
        }
    }
}

impl fmt::Debug for InterceptCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptCallbacks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Hook configuration for a single target member
pub struct HookSpec {
    target: Member,
    callbacks: InterceptCallbacks,
}

impl HookSpec {
    /// Create an unconfigured spec for `target`
    pub fn new(target: impl Into<Member>) -> Self {
        Self {
            target: target.into(),
            callbacks: InterceptCallbacks::default(),
        }
    }

    /// Target member
    pub fn target(&self) -> &Member {
        &self.target
    }

    /// Whether any callback has been set
    pub fn is_configured(&self) -> bool {
        self.callbacks.before.is_some() || self.callbacks.after.is_some()
    }

    /// Whether a before-callback is set
    pub fn has_before(&self) -> bool {
        self.callbacks.before.is_some()
    }

    /// Whether an after-callback is set
    pub fn has_after(&self) -> bool {
        self.callbacks.after.is_some()
    }

    /// Set the before-callback
    pub fn before<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookParam) + Send + Sync + 'static,
    {
        self.callbacks.before = Some(Arc::new(callback));
        self
    }

    /// Set the after-callback
    pub fn after<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookParam) + Send + Sync + 'static,
    {
        self.callbacks.after = Some(Arc::new(callback));
        self
    }

    /// Replace the original body with `callback`'s return value
    pub fn replace<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookParam) -> Value + Send + Sync + 'static,
    {
        self.before(move |param| {
            let value = callback(param);
            param.set_result(value);
        })
    }

    /// Skip the original body, returning null
    pub fn interrupt(&mut self) -> &mut Self {
        self.before(|param| param.set_result(Value::Null))
    }

    /// Skip the original body, returning `constant`
    pub fn return_constant(&mut self, constant: impl Into<Value>) -> &mut Self {
        let constant = constant.into();
        self.before(move |param| param.set_result(constant.clone()))
    }

    /// Split into the target and its composed callbacks
    pub fn into_parts(self) -> (Member, InterceptCallbacks) {
        (self.target, self.callbacks)
    }
}

impl fmt::Debug for HookSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSpec")
            .field("target", &self.target.to_string())
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probekit_types::MethodInfo;

    fn target() -> Member {
        let mut method = MethodInfo::new("answer", "int", Vec::<String>::new());
        method.declaring_class = "com.example.Oracle".to_string();
        Member::from(method)
    }

    fn run_before(spec: HookSpec) -> Option<Value> {
        let (member, callbacks) = spec.into_parts();
        let mut param = HookParam::new(member, Value::Null, Vec::new());
        callbacks.run_before(&mut param);
        param.take_result()
    }

    #[test]
    fn test_unconfigured() {
        let spec = HookSpec::new(target());
        assert!(!spec.is_configured());
        assert_eq!(run_before(spec), None);
    }

    #[test]
    fn test_last_shorthand_wins() {
        let mut spec = HookSpec::new(target());
        spec.return_constant(42);
        spec.replace(|_| Value::Int(99));
        assert_eq!(run_before(spec), Some(Value::Int(99)));

        let mut spec = HookSpec::new(target());
        spec.replace(|_| Value::Int(99)).interrupt();
        assert_eq!(run_before(spec), Some(Value::Null));

        let mut spec = HookSpec::new(target());
        spec.interrupt().return_constant("done");
        assert_eq!(run_before(spec), Some(Value::Str("done".to_string())));
    }

    #[test]
    fn test_after_is_independent_of_shorthands() {
        let mut spec = HookSpec::new(target());
        spec.after(|param| {
            if let Some(Value::Int(n)) = param.result().cloned() {
                param.set_result(n + 1);
            }
        });
        spec.return_constant(1);
        spec.interrupt();
        assert!(spec.has_before());
        assert!(spec.has_after());

        let (member, callbacks) = spec.into_parts();
        let mut param = HookParam::new(member, Value::Null, Vec::new());
        param.set_result(10);
        callbacks.run_after(&mut param);
        assert_eq!(param.result(), Some(&Value::Int(11)));
    }

    #[test]
    fn test_replace_sees_arguments() {
        let mut spec = HookSpec::new(target());
        spec.replace(|param| {
            let sum: i64 = param
                .args()
                .iter()
                .filter_map(|v| match v {
                    Value::Int(n) => Some(*n),
                    _ => None,
                })
                .sum();
            Value::Int(sum)
        });

        let (member, callbacks) = spec.into_parts();
        let mut param = HookParam::new(member, Value::Null, vec![Value::Int(2), Value::Int(3)]);
        callbacks.run_before(&mut param);
        assert_eq!(param.result(), Some(&Value::Int(5)));
    }
}
