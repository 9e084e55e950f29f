//! In-process intercept registry
//!
//! A reference [`Interceptor`] for hosts that dispatch calls themselves.
//! The host routes each call through [`InterceptRegistry::invoke`], which
//! runs the installed callbacks around the original body.

use std::sync::Arc;

use parking_lot::RwLock;
use probekit_types::{Member, MemberId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::installer::{Interceptor, UndoHandle};
use super::param::{HookParam, Value};
use super::spec::InterceptCallbacks;
use crate::error::InstallationError;

/// Host-assigned id plus signature key; the same signature loaded in two
/// contexts is two members
type MemberKey = (MemberId, String);

fn member_key(member: &Member) -> MemberKey {
    (member.id(), member.key())
}

#[derive(Default)]
struct RegistryState {
    hooks: FxHashMap<MemberKey, Vec<(u64, InterceptCallbacks)>>,
    rejected: FxHashSet<MemberKey>,
    next_token: u64,
}

/// Thread-safe table of installed intercepts, keyed by member
#[derive(Clone, Default)]
pub struct InterceptRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl InterceptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse future intercepts on `member`
    pub fn reject(&self, member: &Member) {
        self.state.write().rejected.insert(member_key(member));
    }

    /// Number of intercepts installed on `member`
    pub fn hook_count(&self, member: &Member) -> usize {
        self.state
            .read()
            .hooks
            .get(&member_key(member))
            .map_or(0, Vec::len)
    }

    /// Whether `member` has at least one intercept
    pub fn is_hooked(&self, member: &Member) -> bool {
        self.hook_count(member) > 0
    }

    /// Dispatch a call to `member` through its intercepts
    ///
    /// Before-callbacks run in installation order until one sets a result.
    /// The original body runs only if none did. After-callbacks of the
    /// intercepts whose before-callback ran are then called in reverse.
    pub fn invoke<F>(
        &self,
        member: &Member,
        this_object: Value,
        args: Vec<Value>,
        original: F,
    ) -> Value
    where
        F: FnOnce(&[Value]) -> Value,
    {
        let chain: Vec<InterceptCallbacks> = self
            .state
            .read()
            .hooks
            .get(&member_key(member))
            .map(|entries| entries.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();

        let mut param = HookParam::new(member.clone(), this_object, args);
        let mut ran = 0;
        for callbacks in &chain {
            callbacks.run_before(&mut param);
            ran += 1;
            if param.has_result() {
                break;
            }
        }

        if !param.has_result() {
            let value = original(param.args());
            param.set_result(value);
        }

        for callbacks in chain[..ran].iter().rev() {
            callbacks.run_after(&mut param);
        }

        param.take_result().unwrap_or_default()
    }
}

impl Interceptor for InterceptRegistry {
    fn install_intercept(
        &self,
        target: &Member,
        callbacks: InterceptCallbacks,
    ) -> Result<Box<dyn UndoHandle>, InstallationError> {
        let key = member_key(target);
        let mut state = self.state.write();
        if state.rejected.contains(&key) {
            return Err(InstallationError::new(target, "member cannot be intercepted"));
        }

        let token = state.next_token;
        state.next_token += 1;
        state.hooks.entry(key.clone()).or_default().push((token, callbacks));
        debug!(member = %key.1, id = %key.0, token, "Registered intercept");

        Ok(Box::new(RegistryUndo {
            state: Arc::clone(&self.state),
            key,
            token,
        }))
    }
}

struct RegistryUndo {
    state: Arc<RwLock<RegistryState>>,
    key: MemberKey,
    token: u64,
}

impl UndoHandle for RegistryUndo {
    fn revert(self: Box<Self>) {
        let mut state = self.state.write();
        if let Some(entries) = state.hooks.get_mut(&self.key) {
            entries.retain(|(token, _)| *token != self.token);
            if entries.is_empty() {
                state.hooks.remove(&self.key);
            }
        }
        debug!(
            member = %self.key.1,
            id = %self.key.0,
            token = self.token,
            "Removed intercept"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::{create_hook, create_hooks};
    use probekit_types::MethodInfo;

    fn method(name: &str, params: &[&str]) -> Member {
        let mut info = MethodInfo::new(name, "int", params.iter().copied());
        info.declaring_class = "com.example.Calc".to_string();
        Member::from(info)
    }

    fn add(args: &[Value]) -> Value {
        match args {
            [Value::Int(a), Value::Int(b)] => Value::Int(a + b),
            _ => Value::Null,
        }
    }

    fn ints(a: i64, b: i64) -> Vec<Value> {
        vec![Value::Int(a), Value::Int(b)]
    }

    #[test]
    fn test_unhooked_call_runs_original() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        assert_eq!(registry.invoke(&target, Value::Null, ints(2, 3), add), Value::Int(5));
        assert!(!registry.is_hooked(&target));
    }

    #[test]
    fn test_return_constant_skips_original() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        let unhook = create_hook(&registry, target.clone(), |spec| {
            spec.return_constant(42);
        })
        .unwrap();

        let mut called = false;
        let result = registry.invoke(&target, Value::Null, ints(2, 3), |args| {
            called = true;
            add(args)
        });
        assert_eq!(result, Value::Int(42));
        assert!(!called);

        unhook.revert();
        assert_eq!(registry.invoke(&target, Value::Null, ints(2, 3), add), Value::Int(5));
    }

    #[test]
    fn test_before_can_rewrite_arguments() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        create_hook(&registry, target.clone(), |spec| {
            spec.before(|param| param.args_mut()[0] = Value::Int(10));
        })
        .unwrap();

        assert_eq!(registry.invoke(&target, Value::Null, ints(2, 3), add), Value::Int(13));
    }

    #[test]
    fn test_after_sees_and_modifies_result() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        create_hook(&registry, target.clone(), |spec| {
            spec.after(|param| {
                if let Some(Value::Int(n)) = param.result().cloned() {
                    param.set_result(n * 2);
                }
            });
        })
        .unwrap();

        assert_eq!(registry.invoke(&target, Value::Null, ints(2, 3), add), Value::Int(10));
    }

    #[test]
    fn test_double_install_creates_two_intercepts() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        let bump = |spec: &mut crate::hook::HookSpec| {
            spec.after(|param| {
                if let Some(Value::Int(n)) = param.result().cloned() {
                    param.set_result(n + 1);
                }
            });
        };

        let first = create_hook(&registry, target.clone(), bump).unwrap();
        let second = create_hook(&registry, target.clone(), bump).unwrap();
        assert_eq!(registry.hook_count(&target), 2);
        assert_eq!(registry.invoke(&target, Value::Null, ints(1, 1), add), Value::Int(4));

        first.revert();
        assert_eq!(registry.hook_count(&target), 1);
        assert_eq!(registry.invoke(&target, Value::Null, ints(1, 1), add), Value::Int(3));

        second.revert();
        assert!(!registry.is_hooked(&target));
    }

    #[test]
    fn test_overloads_are_distinct_members() {
        let registry = InterceptRegistry::new();
        let two = method("add", &["int", "int"]);
        let three = method("add", &["int", "int", "int"]);
        create_hook(&registry, two.clone(), |spec| {
            spec.interrupt();
        })
        .unwrap();

        assert!(registry.is_hooked(&two));
        assert!(!registry.is_hooked(&three));
    }

    #[test]
    fn test_rejected_member_rolls_back_bulk() {
        let registry = InterceptRegistry::new();
        let targets = vec![method("a", &[]), method("b", &[]), method("c", &[])];
        registry.reject(&targets[2]);

        let err = create_hooks(&registry, targets.clone(), |spec| {
            spec.interrupt();
        })
        .unwrap_err();
        assert_eq!(err.failures[0].index, 2);
        assert!(targets.iter().all(|t| !registry.is_hooked(t)));
    }

    #[test]
    fn test_short_circuit_skips_later_befores() {
        let registry = InterceptRegistry::new();
        let target = method("add", &["int", "int"]);
        create_hook(&registry, target.clone(), |spec| {
            spec.return_constant(7);
        })
        .unwrap();
        create_hook(&registry, target.clone(), |spec| {
            spec.before(|param| param.set_result(100))
                .after(|param| param.set_result(-1));
        })
        .unwrap();

        assert_eq!(registry.invoke(&target, Value::Null, ints(2, 3), add), Value::Int(7));
    }

    #[test]
    fn test_same_signature_with_distinct_ids_are_separate_members() {
        let registry = InterceptRegistry::new();
        let mut first = MethodInfo::new("add", "int", ["int", "int"]);
        first.declaring_class = "com.example.Calc".to_string();
        first.id = MemberId(1);
        let mut second = first.clone();
        second.id = MemberId(2);
        let (first, second) = (Member::from(first), Member::from(second));
        assert_eq!(first.key(), second.key());

        registry.reject(&second);
        let unhook = create_hook(&registry, first.clone(), |spec| {
            spec.return_constant(42);
        })
        .unwrap();

        assert!(registry.is_hooked(&first));
        assert!(!registry.is_hooked(&second));
        assert_eq!(registry.invoke(&second, Value::Null, ints(2, 3), add), Value::Int(5));
        assert!(create_hook(&registry, second.clone(), |spec| {
            spec.interrupt();
        })
        .is_err());

        unhook.revert();
        assert!(!registry.is_hooked(&first));
    }
}
