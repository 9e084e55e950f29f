//! Class metadata and the resolved [`Class`] handle
//!
//! [`ClassInfo`] is the raw table entry a host stores. [`Class`] is what a
//! host hands out on resolution: a cheap-to-clone handle that also carries
//! every supertype name reachable from the class, so relationship checks
//! never need to go back to the host.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::member::{ConstructorInfo, FieldInfo, MethodInfo};
use crate::modifiers::Modifiers;

/// Host-assigned class identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassId(pub u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Broad category of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    /// Ordinary class, interface, enum or annotation type
    #[default]
    Object,
    /// Primitive type (`int`, `boolean`, ...)
    Primitive,
    /// Array type
    Array,
}

/// Where a class is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nesting {
    /// Declared at package level
    #[default]
    TopLevel,
    /// Declared as a member of another class
    Member,
    /// Declared inside a method body
    Local,
    /// Anonymous class expression
    Anonymous,
}

/// Reflection metadata for a single class
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassInfo {
    /// Host-assigned id
    #[serde(skip)]
    pub id: ClassId,
    /// Qualified class name
    pub name: String,
    /// Class modifiers
    pub modifiers: Modifiers,
    /// Type category
    pub category: TypeCategory,
    /// Declaration site
    pub nesting: Nesting,
    /// Direct superclass name
    pub superclass: Option<String>,
    /// Directly implemented interface names
    pub interfaces: Vec<String>,
    /// Names of annotation types present on the class
    pub annotations: Vec<String>,
    /// Declared fields
    pub fields: Vec<FieldInfo>,
    /// Declared methods
    pub methods: Vec<MethodInfo>,
    /// Declared constructors
    pub constructors: Vec<ConstructorInfo>,
}

impl ClassInfo {
    /// Create an empty top-level class entry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a primitive type entry
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ABSTRACT,
            category: TypeCategory::Primitive,
            ..Self::default()
        }
    }

    /// Create an array type entry for `element`
    pub fn array_of(element: &str) -> Self {
        Self {
            name: format!("{}[]", element),
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ABSTRACT,
            category: TypeCategory::Array,
            ..Self::default()
        }
    }

    /// Set the modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the declaration site
    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add an annotation
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method
    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a constructor
    pub fn with_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Stamp the declaring class name onto every method and constructor
    pub fn stamp_members(&mut self) {
        for method in &mut self.methods {
            method.declaring_class = self.name.clone();
        }
        for constructor in &mut self.constructors {
            constructor.declaring_class = self.name.clone();
        }
    }
}

/// A resolved class handle
///
/// Equality and hashing use the host-assigned id together with the name.
#[derive(Clone)]
pub struct Class {
    info: Arc<ClassInfo>,
    supertypes: Arc<[String]>,
}

impl Class {
    /// Create a handle from a table entry and its transitive supertype names
    pub fn new(info: impl Into<Arc<ClassInfo>>, supertypes: Vec<String>) -> Self {
        Self {
            info: info.into(),
            supertypes: supertypes.into(),
        }
    }

    /// Create a handle without a host, knowing only direct supertypes
    pub fn detached(mut info: ClassInfo) -> Self {
        info.stamp_members();
        let supertypes = info
            .superclass
            .iter()
            .chain(info.interfaces.iter())
            .cloned()
            .collect();
        Self::new(info, supertypes)
    }

    /// Host-assigned id
    pub fn id(&self) -> ClassId {
        self.info.id
    }

    /// Qualified class name
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Package part of the qualified name (empty for the default package)
    pub fn package(&self) -> &str {
        self.info
            .name
            .rfind('.')
            .map(|idx| &self.info.name[..idx])
            .unwrap_or("")
    }

    /// Raw table entry
    pub fn info(&self) -> &ClassInfo {
        &self.info
    }

    /// Class modifiers
    pub fn modifiers(&self) -> Modifiers {
        self.info.modifiers
    }

    /// Declared fields
    pub fn fields(&self) -> &[FieldInfo] {
        &self.info.fields
    }

    /// Declared methods
    pub fn methods(&self) -> &[MethodInfo] {
        &self.info.methods
    }

    /// Declared constructors
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.info.constructors
    }

    /// Every supertype name reachable from this class
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Check if `name` is this class or one of its supertypes
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.info.name == name || self.supertypes.iter().any(|s| s == name)
    }

    /// Check if a value of `other` can be assigned to this type
    pub fn is_assignable_from(&self, other: &Class) -> bool {
        other.is_subtype_of(self.name())
    }

    /// Check if an annotation type is present on the class
    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.info.annotations.iter().any(|a| a == annotation)
    }

    /// Public class
    pub fn is_public(&self) -> bool {
        self.info.modifiers.contains(Modifiers::PUBLIC)
    }

    /// Final class
    pub fn is_final(&self) -> bool {
        self.info.modifiers.contains(Modifiers::FINAL)
    }

    /// Abstract class (interfaces are abstract too)
    pub fn is_abstract(&self) -> bool {
        self.info.modifiers.contains(Modifiers::ABSTRACT)
    }

    /// Compiler generated class
    pub fn is_synthetic(&self) -> bool {
        self.info.modifiers.contains(Modifiers::SYNTHETIC)
    }

    /// Interface type
    pub fn is_interface(&self) -> bool {
        self.info.modifiers.contains(Modifiers::INTERFACE)
    }

    /// Annotation type
    pub fn is_annotation(&self) -> bool {
        self.info.modifiers.contains(Modifiers::ANNOTATION)
    }

    /// Enum type
    pub fn is_enum(&self) -> bool {
        self.info.modifiers.contains(Modifiers::ENUM)
    }

    /// Anonymous class
    pub fn is_anonymous(&self) -> bool {
        self.info.nesting == Nesting::Anonymous
    }

    /// Local class
    pub fn is_local(&self) -> bool {
        self.info.nesting == Nesting::Local
    }

    /// Member class
    pub fn is_member(&self) -> bool {
        self.info.nesting == Nesting::Member
    }

    /// Primitive type
    pub fn is_primitive(&self) -> bool {
        self.info.category == TypeCategory::Primitive
    }

    /// Array type
    pub fn is_array(&self) -> bool {
        self.info.category == TypeCategory::Array
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.info.id == other.info.id && self.info.name == other.info.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.id.hash(state);
        self.info.name.hash(state);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("id", &self.info.id)
            .field("name", &self.info.name)
            .finish()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info.name)
    }
}

/// Anything that names a type: a resolved [`Class`] or a qualified name
pub trait TypeName {
    /// Qualified type name
    fn type_name(&self) -> &str;
}

impl TypeName for str {
    fn type_name(&self) -> &str {
        self
    }
}

impl TypeName for String {
    fn type_name(&self) -> &str {
        self
    }
}

impl TypeName for Class {
    fn type_name(&self) -> &str {
        self.name()
    }
}

impl<T: TypeName + ?Sized> TypeName for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }
}
