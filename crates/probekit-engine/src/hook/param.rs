//! Per-invocation hook parameters

use std::fmt;

use probekit_types::Member;

/// Value passed through an intercepted call
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null / no value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
    /// Opaque host object reference
    Object(u64),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Object(id) => write!(f, "object@{:x}", id),
        }
    }
}

/// State of one intercepted call, shared by its before and after callbacks
///
/// A before-callback that calls [`HookParam::set_result`] substitutes the
/// return value; the host then skips the original body.
#[derive(Debug, Clone)]
pub struct HookParam {
    member: Member,
    this_object: Value,
    args: Vec<Value>,
    result: Option<Value>,
}

impl HookParam {
    /// Create the parameters for a call to `member`
    pub fn new(member: Member, this_object: Value, args: Vec<Value>) -> Self {
        Self {
            member,
            this_object,
            args,
            result: None,
        }
    }

    /// Intercepted member
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Receiver (`Value::Null` for static members)
    pub fn this_object(&self) -> &Value {
        &self.this_object
    }

    /// Call arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Mutable call arguments, seen by the original body
    pub fn args_mut(&mut self) -> &mut Vec<Value> {
        &mut self.args
    }

    /// Current result, if one was produced or substituted
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Set the result
    pub fn set_result(&mut self, value: impl Into<Value>) {
        self.result = Some(value.into());
    }

    /// Whether a result is present
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Take the result out, leaving none
    pub fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }
}
