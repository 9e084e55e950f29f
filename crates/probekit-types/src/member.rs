//! Member metadata: fields, methods and constructors
//!
//! Members are declared inside a [`ClassInfo`](crate::ClassInfo). Ids and the
//! declaring class name are assigned by the host when the class is
//! registered; table files leave them out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modifiers::Modifiers;

/// Host-assigned member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

/// Field information
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Qualified name of the field's type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Field modifiers
    pub modifiers: Modifiers,
}

impl FieldInfo {
    /// Create a field with no modifiers
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Method information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodInfo {
    /// Host-assigned id
    #[serde(skip)]
    pub id: MemberId,
    /// Qualified name of the declaring class
    #[serde(skip)]
    pub declaring_class: String,
    /// Method name
    pub name: String,
    /// Qualified name of the return type
    pub return_type: String,
    /// Qualified names of the parameter types, in order
    pub param_types: Vec<String>,
    /// Method modifiers
    pub modifiers: Modifiers,
}

impl Default for MethodInfo {
    fn default() -> Self {
        Self {
            id: MemberId::default(),
            declaring_class: String::new(),
            name: String::new(),
            return_type: "void".to_string(),
            param_types: Vec::new(),
            modifiers: Modifiers::NONE,
        }
    }
}

impl MethodInfo {
    /// Create a method
    pub fn new<P, S>(name: impl Into<String>, return_type: impl Into<String>, params: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            param_types: params.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if the method is static
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Check if the method is public
    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }

    /// Check if the method is abstract
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    /// Check if the method is final
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifiers::FINAL)
    }

    /// Check if the method is compiler generated
    pub fn is_synthetic(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC)
    }
}

/// Constructor information
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructorInfo {
    /// Host-assigned id
    #[serde(skip)]
    pub id: MemberId,
    /// Qualified name of the declaring class
    #[serde(skip)]
    pub declaring_class: String,
    /// Qualified names of the parameter types, in order
    pub param_types: Vec<String>,
    /// Constructor modifiers
    pub modifiers: Modifiers,
}

impl ConstructorInfo {
    /// Create a constructor
    pub fn new<P, S>(params: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            param_types: params.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A hookable member: a method or a constructor
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A method
    Method(MethodInfo),
    /// A constructor
    Constructor(ConstructorInfo),
}

impl Member {
    /// Host-assigned id
    pub fn id(&self) -> MemberId {
        match self {
            Member::Method(m) => m.id,
            Member::Constructor(c) => c.id,
        }
    }

    /// Qualified name of the declaring class
    pub fn declaring_class(&self) -> &str {
        match self {
            Member::Method(m) => &m.declaring_class,
            Member::Constructor(c) => &c.declaring_class,
        }
    }

    /// Member name (`<init>` for constructors)
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Constructor(_) => "<init>",
        }
    }

    /// Parameter type names
    pub fn param_types(&self) -> &[String] {
        match self {
            Member::Method(m) => &m.param_types,
            Member::Constructor(c) => &c.param_types,
        }
    }

    /// Stable key identifying the member by owner, name and parameter types
    pub fn key(&self) -> String {
        format!(
            "{}#{}({})",
            self.declaring_class(),
            self.name(),
            self.param_types().join(",")
        )
    }
}

impl From<MethodInfo> for Member {
    fn from(method: MethodInfo) -> Self {
        Member::Method(method)
    }
}

impl From<ConstructorInfo> for Member {
    fn from(constructor: ConstructorInfo) -> Self {
        Member::Constructor(constructor)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.declaring_class(),
            self.name(),
            self.param_types().join(", ")
        )?;
        if let Member::Method(m) = self {
            write!(f, ": {}", m.return_type)?;
        }
        Ok(())
    }
}
