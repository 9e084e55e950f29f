//! Ahead-of-time class table
//!
//! A [`TypeHost`] backed by metadata registered up front, for hosts without
//! native reflection. Classes are registered per loading context; lookups
//! fall back from a context to its parents.
//!
//! ## Table files
//!
//! ```toml
//! [[class]]
//! name = "com.example.Task"
//! modifiers = "public"
//! superclass = "com.example.Base"
//! interfaces = ["java.lang.Runnable"]
//!
//! [[class.fields]]
//! name = "count"
//! type = "int"
//!
//! [[class.methods]]
//! name = "run"
//! return_type = "void"
//! modifiers = "public"
//! ```

use std::path::Path;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use crate::class::{Class, ClassId, ClassInfo};
use crate::context::LoadingContext;
use crate::error::{LookupError, TableError};
use crate::host::TypeHost;
use crate::member::MemberId;

/// Classes registered in one loading context
#[derive(Debug)]
struct ContextEntry {
    /// Class ids in registration order
    order: Vec<ClassId>,
    /// Class name to ID mapping
    by_name: FxHashMap<String, ClassId>,
    /// Whether the context can enumerate its classes
    enumerable: bool,
}

impl Default for ContextEntry {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            by_name: FxHashMap::default(),
            enumerable: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(rename = "class", default)]
    classes: Vec<ClassInfo>,
}

/// Class table host
#[derive(Debug, Default)]
pub struct ClassTable {
    /// Classes indexed by ID
    classes: Vec<Arc<ClassInfo>>,
    /// Registered classes per context name
    contexts: FxHashMap<String, ContextEntry>,
    /// Next member id to hand out
    next_member_id: u32,
}

impl ClassTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class in `ctx`, assigning class and member ids
    ///
    /// Registering a name that already exists in `ctx` replaces the earlier
    /// entry in place.
    pub fn register(&mut self, ctx: &LoadingContext, mut info: ClassInfo) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        info.id = id;
        info.stamp_members();
        for method in &mut info.methods {
            method.id = MemberId(self.next_member_id);
            self.next_member_id += 1;
        }
        for constructor in &mut info.constructors {
            constructor.id = MemberId(self.next_member_id);
            self.next_member_id += 1;
        }

        let name = info.name.clone();
        self.classes.push(Arc::new(info));

        let entry = self.contexts.entry(ctx.name().to_string()).or_default();
        match entry.by_name.insert(name, id) {
            Some(previous) => {
                if let Some(slot) = entry.order.iter_mut().find(|slot| **slot == previous) {
                    *slot = id;
                }
            }
            None => entry.order.push(id),
        }

        id
    }

    /// Mark whether `ctx` can enumerate its classes
    pub fn set_enumerable(&mut self, ctx: &LoadingContext, enumerable: bool) {
        self.contexts
            .entry(ctx.name().to_string())
            .or_default()
            .enumerable = enumerable;
    }

    /// Get class metadata by ID
    pub fn get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.0 as usize).map(|info| info.as_ref())
    }

    /// Number of registered classes across all contexts
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Find a class visible from `ctx`
    fn lookup(&self, name: &str, ctx: &LoadingContext) -> Option<&Arc<ClassInfo>> {
        ctx.ancestors().find_map(|c| {
            self.contexts
                .get(c.name())
                .and_then(|entry| entry.by_name.get(name))
                .and_then(|id| self.classes.get(id.0 as usize))
        })
    }

    /// Collect every supertype name reachable from `info`
    ///
    /// Names that do not resolve are kept but not walked further.
    fn supertypes_of(&self, info: &ClassInfo, ctx: &LoadingContext) -> Vec<String> {
        let mut result = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(info.name.clone());

        let mut pending: Vec<String> = direct_supertypes(info).rev().cloned().collect();
        while let Some(name) = pending.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(parent) = self.lookup(&name, ctx) {
                pending.extend(direct_supertypes(parent).rev().cloned());
            }
            result.push(name);
        }

        result
    }

    /// Register every class from a TOML table into `ctx`
    ///
    /// Returns the number of classes registered.
    pub fn load_toml(&mut self, ctx: &LoadingContext, content: &str) -> Result<usize, TableError> {
        let file: TableFile = toml::from_str(content)?;
        if let Some(idx) = file.classes.iter().position(|c| c.name.trim().is_empty()) {
            return Err(TableError::InvalidEntry(format!(
                "class #{} has no name",
                idx
            )));
        }

        let count = file.classes.len();
        for info in file.classes {
            self.register(ctx, info);
        }
        Ok(count)
    }

    /// Register every class from a TOML table file into `ctx`
    pub fn load_from_file(
        &mut self,
        ctx: &LoadingContext,
        path: &Path,
    ) -> Result<usize, TableError> {
        let content = std::fs::read_to_string(path)?;
        self.load_toml(ctx, &content)
    }
}

fn direct_supertypes(info: &ClassInfo) -> impl DoubleEndedIterator<Item = &String> {
    info.superclass.iter().chain(info.interfaces.iter())
}

impl TypeHost for ClassTable {
    fn enumerate_type_names(&self, ctx: &LoadingContext) -> Vec<String> {
        self.contexts
            .get(ctx.name())
            .map(|entry| {
                entry
                    .order
                    .iter()
                    .filter_map(|id| self.classes.get(id.0 as usize))
                    .map(|info| info.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn resolve_type(&self, name: &str, ctx: &LoadingContext) -> Result<Class, LookupError> {
        let info = self
            .lookup(name, ctx)
            .ok_or_else(|| LookupError::TypeNotFound {
                name: name.to_string(),
                context: ctx.name().to_string(),
            })?;
        let supertypes = self.supertypes_of(info, ctx);
        Ok(Class::new(Arc::clone(info), supertypes))
    }

    fn can_enumerate(&self, ctx: &LoadingContext) -> bool {
        self.contexts
            .get(ctx.name())
            .map(|entry| entry.enumerable)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{ConstructorInfo, FieldInfo, MethodInfo};
    use crate::modifiers::Modifiers;

    fn hierarchy() -> (ClassTable, LoadingContext) {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        table.register(&ctx, ClassInfo::new("Animal"));
        table.register(&ctx, ClassInfo::new("Pet").with_modifiers(Modifiers::INTERFACE));
        table.register(&ctx, ClassInfo::new("Dog").extends("Animal").implements("Pet"));
        table.register(&ctx, ClassInfo::new("Labrador").extends("Dog"));
        (table, ctx)
    }

    #[test]
    fn test_register_assigns_ids() {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        let a = table.register(
            &ctx,
            ClassInfo::new("A")
                .with_method(MethodInfo::new("run", "void", Vec::<String>::new()))
                .with_constructor(ConstructorInfo::new(["int"])),
        );
        let b = table.register(
            &ctx,
            ClassInfo::new("B").with_method(MethodInfo::new("stop", "void", Vec::<String>::new())),
        );

        assert_eq!(a, ClassId(0));
        assert_eq!(b, ClassId(1));
        let info = table.get(a).unwrap();
        assert_eq!(info.methods[0].id, MemberId(0));
        assert_eq!(info.methods[0].declaring_class, "A");
        assert_eq!(info.constructors[0].id, MemberId(1));
        assert_eq!(table.get(b).unwrap().methods[0].id, MemberId(2));
    }

    #[test]
    fn test_resolve_collects_transitive_supertypes() {
        let (table, ctx) = hierarchy();
        let lab = table.resolve_type("Labrador", &ctx).unwrap();
        assert_eq!(lab.supertypes(), &["Dog", "Animal", "Pet"]);

        let animal = table.resolve_type("Animal", &ctx).unwrap();
        let pet = table.resolve_type("Pet", &ctx).unwrap();
        assert!(animal.is_assignable_from(&lab));
        assert!(pet.is_assignable_from(&lab));
        assert!(!lab.is_assignable_from(&animal));
    }

    #[test]
    fn test_supertype_cycle_terminates() {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        table.register(&ctx, ClassInfo::new("A").extends("B"));
        table.register(&ctx, ClassInfo::new("B").extends("A"));

        let a = table.resolve_type("A", &ctx).unwrap();
        assert_eq!(a.supertypes(), &["B"]);
    }

    #[test]
    fn test_resolve_missing_type() {
        let (table, ctx) = hierarchy();
        let err = table.resolve_type("Cat", &ctx).unwrap_err();
        assert_eq!(
            err,
            LookupError::TypeNotFound {
                name: "Cat".to_string(),
                context: "app".to_string(),
            }
        );
    }

    #[test]
    fn test_child_context_falls_back_to_parent() {
        let system = LoadingContext::new("system");
        let app = system.child("app");
        let mut table = ClassTable::new();
        table.register(&system, ClassInfo::new("java.lang.Object"));
        table.register(&app, ClassInfo::new("com.example.Main").extends("java.lang.Object"));

        assert!(table.resolve_type("java.lang.Object", &app).is_ok());
        assert!(table.resolve_type("com.example.Main", &system).is_err());
        assert_eq!(table.enumerate_type_names(&app), vec!["com.example.Main"]);
        assert_eq!(table.enumerate_type_names(&system), vec!["java.lang.Object"]);
    }

    #[test]
    fn test_enumerable_context_walks_parents() {
        let system = LoadingContext::new("system");
        let app = system.child("app");
        let delegate = app.child("delegate");
        let mut table = ClassTable::new();
        table.register(&app, ClassInfo::new("com.example.Main"));
        table.set_enumerable(&delegate, false);

        assert!(!table.can_enumerate(&delegate));
        assert_eq!(
            table.enumerable_context(&delegate).map(|c| c.name().to_string()),
            Some("app".to_string())
        );
        assert!(table.enumerable_context(&system).is_none());
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        table.register(&ctx, ClassInfo::new("A"));
        table.register(&ctx, ClassInfo::new("B"));
        table.register(&ctx, ClassInfo::new("A").with_modifiers(Modifiers::PUBLIC));

        assert_eq!(table.enumerate_type_names(&ctx), vec!["A", "B"]);
        assert!(table.resolve_type("A", &ctx).unwrap().is_public());
    }

    #[test]
    fn test_load_toml() {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        let count = table
            .load_toml(
                &ctx,
                r#"
[[class]]
name = "com.example.Task"
modifiers = "public final"
superclass = "com.example.Base"
interfaces = ["java.lang.Runnable"]

[[class.fields]]
name = "count"
type = "int"

[[class.methods]]
name = "run"
modifiers = "public"

[[class.constructors]]
param_types = ["int"]

[[class]]
name = "com.example.Base"
modifiers = "public abstract"
nesting = "top-level"
"#,
            )
            .unwrap();
        assert_eq!(count, 2);

        let task = table.resolve_type("com.example.Task", &ctx).unwrap();
        assert!(task.is_public() && task.is_final());
        assert_eq!(task.fields(), &[FieldInfo::new("count", "int")]);
        assert_eq!(task.methods()[0].return_type, "void");
        assert_eq!(task.methods()[0].declaring_class, "com.example.Task");
        assert_eq!(task.constructors()[0].param_types, vec!["int"]);
        assert!(task.is_subtype_of("java.lang.Runnable"));
    }

    #[test]
    fn test_load_toml_rejects_bad_entries() {
        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();

        let err = table.load_toml(&ctx, "[[class]]\nmodifiers = \"public\"\n");
        assert!(matches!(err, Err(TableError::InvalidEntry(_))));

        let err = table.load_toml(&ctx, "[[class]]\nname = \"A\"\nmodifiers = \"sealed\"\n");
        assert!(matches!(err, Err(TableError::ParseError(_))));
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.toml");
        std::fs::write(
            &path,
            "[[class]]\nname = \"com.example.Main\"\nmodifiers = \"public\"\n",
        )
        .unwrap();

        let ctx = LoadingContext::new("app");
        let mut table = ClassTable::new();
        assert_eq!(table.load_from_file(&ctx, &path).unwrap(), 1);
        assert!(table.resolve_type("com.example.Main", &ctx).unwrap().is_public());

        let missing = table.load_from_file(&ctx, &dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(TableError::IoError(_))));
    }
}
