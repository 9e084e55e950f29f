//! Class finder
//!
//! Fluent class search over a lazy source:
//!
//! ```rust,ignore
//! let service = ClassFinder::from_loading_context(&host, &app)
//!     .filter_package("com.example")
//!     .filter_is_public()
//!     .filter_is_not_abstract()
//!     .filter_implement_interfaces(&["com.example.Service"])
//!     .first()?;
//! ```
//!
//! Every named filter appends one predicate and one description. Counted
//! filters come in three shapes that agree whenever their bounds agree:
//! an exact count, an inclusive `min..=max` range (also accepted as any
//! `RangeBounds`), and "at least one".

use std::borrow::Cow;
use std::ops::{Bound, RangeBounds};

use probekit_types::{Class, LoadingContext, TypeHost, TypeName};

use super::base::Finder;
use crate::config::ProbeConfig;
use crate::error::FinderError;

const NAME: &str = "ClassFinder";

/// Lazy class search
#[derive(Debug)]
pub struct ClassFinder<'a> {
    inner: Finder<'a, Class>,
}

impl<'a> ClassFinder<'a> {
    fn from_finder(inner: Finder<'a, Class>) -> Self {
        Self { inner }
    }

    // ===== Sources =====

    /// Every type loaded by `ctx`, resolved lazily through `host`
    pub fn from_loading_context<H>(host: &'a H, ctx: &LoadingContext) -> Self
    where
        H: TypeHost + ?Sized,
    {
        let names = host.enumerate_type_names(ctx);
        let description = format!(
            "No such class found in loading context {}(size={})",
            ctx,
            names.len()
        );
        Self::resolving(host, ctx.clone(), names, description)
    }

    /// Like [`Self::from_loading_context`], but first walks to the nearest
    /// enumerable context in the chain and passes it through `unwrap`
    ///
    /// If no enumerable context exists, or `unwrap` returns `None`, the
    /// finder starts empty.
    pub fn from_loading_context_with<H, F>(host: &'a H, ctx: &LoadingContext, unwrap: F) -> Self
    where
        H: TypeHost + ?Sized,
        F: FnOnce(LoadingContext) -> Option<LoadingContext>,
    {
        match host.enumerable_context(ctx).and_then(unwrap) {
            Some(target) => Self::from_loading_context(host, &target),
            None => Self::from_finder(Finder::new(
                NAME,
                std::iter::empty(),
                format!("No such class found in loading context {}(no enumerable context)", ctx),
            )),
        }
    }

    /// Every type loaded by the configured default context
    pub fn from_config<H>(host: &'a H, config: &ProbeConfig) -> Self
    where
        H: TypeHost + ?Sized,
    {
        Self::from_loading_context(host, &config.default_context())
            .with_trail_separator(config.query.trail_separator.clone())
    }

    fn resolving<H>(
        host: &'a H,
        ctx: LoadingContext,
        names: Vec<String>,
        description: String,
    ) -> Self
    where
        H: TypeHost + ?Sized,
    {
        let sequence = names
            .into_iter()
            .map(move |name| host.resolve_type(&name, &ctx).map_err(FinderError::from));
        Self::from_finder(Finder::from_results(NAME, sequence, description))
    }

    /// A fixed slice of classes
    pub fn from_array(array: &[Class]) -> Self {
        Self::from_finder(Finder::new(
            NAME,
            array.to_vec(),
            format!("No such class found in array(size={})", array.len()),
        ))
    }

    /// An explicit list of classes
    pub fn of(classes: Vec<Class>) -> Self {
        let description = format!("No such class found in array(size={})", classes.len());
        Self::from_finder(Finder::new(NAME, classes, description))
    }

    /// Classes resolved by name in `ctx`
    ///
    /// Names are resolved immediately; the first unresolvable name is
    /// returned as an error.
    pub fn of_names<H, S>(host: &H, ctx: &LoadingContext, names: &[S]) -> Result<Self, FinderError>
    where
        H: TypeHost + ?Sized,
        S: AsRef<str>,
    {
        let classes = names
            .iter()
            .map(|name| host.resolve_type(name.as_ref(), ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let joined: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        let description = format!("No such class found in names({})", joined.join(", "));
        Ok(Self::from_finder(Finder::new(NAME, classes, description)))
    }

    /// Any iterable of classes
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = Class>,
        I::IntoIter: 'a,
    {
        Self::from_finder(Finder::new(NAME, iterable, "No such class found in iterable"))
    }

    /// A lazy sequence of classes; the size is reported when the iterator
    /// knows it exactly
    pub fn from_sequence<I>(sequence: I) -> Self
    where
        I: Iterator<Item = Class> + 'a,
    {
        let description = match sequence.size_hint() {
            (lower, Some(upper)) if lower == upper => {
                format!("No such class found in sequence(size={})", lower)
            }
            _ => "No such class found in sequence".to_string(),
        };
        Self::from_finder(Finder::new(NAME, sequence, description))
    }

    // ===== Pipeline =====

    /// Set the separator used when rendering the diagnostics trail
    pub fn with_trail_separator(self, separator: impl Into<Cow<'static, str>>) -> Self {
        Self::from_finder(self.inner.with_separator(separator))
    }

    /// Keep classes matching `predicate`
    pub fn filter<P>(self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&Class) -> bool + 'a,
    {
        Self::from_finder(self.inner.filter(predicate, description))
    }

    /// Drop classes matching `predicate`
    pub fn filter_not<P>(self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&Class) -> bool + 'a,
    {
        Self::from_finder(self.inner.filter_not(predicate, description))
    }

    /// Underlying pipeline
    pub fn finder(&self) -> &Finder<'a, Class> {
        &self.inner
    }

    // ===== Names =====

    /// Keep classes whose qualified name starts with `package`
    pub fn filter_package(self, package: &str) -> Self {
        let package = package.to_string();
        let description = format!("filter_package({})", package);
        self.filter(move |c| c.name().starts_with(&package), description)
    }

    // ===== Fields =====

    /// Keep classes declaring a field of type `ty`
    pub fn filter_has_field_type(self, ty: impl TypeName) -> Self {
        let ty = ty.type_name().to_string();
        let description = format!("filter_has_field_type({})", ty);
        self.filter(
            move |c| c.fields().iter().any(|f| f.type_name == ty),
            description,
        )
    }

    /// Keep classes declaring exactly `count` fields of type `ty`
    pub fn filter_has_field_type_and_count(self, ty: impl TypeName, count: usize) -> Self {
        let ty = ty.type_name().to_string();
        let description = format!("filter_has_field_type_and_count(type={}, count={})", ty, count);
        self.filter(move |c| field_type_count(c, &ty) == count, description)
    }

    /// Keep classes declaring between `min` and `max` (inclusive) fields of
    /// type `ty`
    pub fn filter_has_field_type_and_count_in(
        self,
        ty: impl TypeName,
        min: usize,
        max: usize,
    ) -> Self {
        let ty = ty.type_name().to_string();
        let description = format!(
            "filter_has_field_type_and_count_in(type={}, min={}, max={})",
            ty,
            min,
            bound_label(max)
        );
        self.filter(
            move |c| (min..=max).contains(&field_type_count(c, &ty)),
            description,
        )
    }

    /// Range form of [`Self::filter_has_field_type_and_count_in`]
    pub fn filter_has_field_type_and_count_in_range(
        self,
        ty: impl TypeName,
        range: impl RangeBounds<usize>,
    ) -> Self {
        let (min, max) = inclusive_bounds(&range);
        self.filter_has_field_type_and_count_in(ty, min, max)
    }

    /// Keep classes declaring at least one field of type `ty`
    pub fn filter_has_field_type_at_least_once(self, ty: impl TypeName) -> Self {
        self.filter_has_field_type_and_count_in(ty, 1, usize::MAX)
    }

    /// Keep classes declaring a field named `name`
    pub fn filter_has_field_name(self, name: &str) -> Self {
        let name = name.to_string();
        let description = format!("filter_has_field_name({})", name);
        self.filter(move |c| c.fields().iter().any(|f| f.name == name), description)
    }

    // ===== Methods =====

    /// Keep classes declaring a method named `name`
    pub fn filter_has_method_name(self, name: &str) -> Self {
        let name = name.to_string();
        let description = format!("filter_has_method_name({})", name);
        self.filter(move |c| c.methods().iter().any(|m| m.name == name), description)
    }

    /// Keep classes declaring a method returning `ty`
    pub fn filter_has_method_return_type(self, ty: impl TypeName) -> Self {
        let ty = ty.type_name().to_string();
        let description = format!("filter_has_method_return_type({})", ty);
        self.filter(
            move |c| c.methods().iter().any(|m| m.return_type == ty),
            description,
        )
    }

    /// Keep classes declaring a method with this exact signature
    pub fn filter_has_method_signature<R, P>(self, return_type: R, params: &[P]) -> Self
    where
        R: TypeName,
        P: TypeName,
    {
        let ret = return_type.type_name().to_string();
        let params = type_names(params);
        let description = format!(
            "filter_has_method_signature(ret={}, params=({}))",
            ret,
            params.join(", ")
        );
        self.filter(
            move |c| {
                c.methods()
                    .iter()
                    .any(|m| m.return_type == ret && m.param_types == params)
            },
            description,
        )
    }

    // ===== Constructors =====

    /// Keep classes declaring a constructor with exactly these parameter types
    pub fn filter_has_constructor_signature<P: TypeName>(self, params: &[P]) -> Self {
        let params = type_names(params);
        let description = format!(
            "filter_has_constructor_signature(params=({}))",
            params.join(", ")
        );
        self.filter(
            move |c| c.constructors().iter().any(|ctor| ctor.param_types == params),
            description,
        )
    }

    /// Keep classes declaring exactly `count` constructors
    pub fn filter_has_constructor_count(self, count: usize) -> Self {
        self.filter(
            move |c| c.constructors().len() == count,
            format!("filter_has_constructor_count({})", count),
        )
    }

    /// Keep classes declaring between `min` and `max` (inclusive) constructors
    pub fn filter_has_constructor_count_in(self, min: usize, max: usize) -> Self {
        self.filter(
            move |c| (min..=max).contains(&c.constructors().len()),
            format!(
                "filter_has_constructor_count_in(min={}, max={})",
                min,
                bound_label(max)
            ),
        )
    }

    /// Range form of [`Self::filter_has_constructor_count_in`]
    pub fn filter_has_constructor_count_in_range(self, range: impl RangeBounds<usize>) -> Self {
        let (min, max) = inclusive_bounds(&range);
        self.filter_has_constructor_count_in(min, max)
    }

    /// Keep classes declaring at least one constructor
    pub fn filter_has_constructors(self) -> Self {
        self.filter_has_constructor_count_in(1, usize::MAX)
    }

    // ===== Relationships =====

    /// Keep classes assignable to every one of `interfaces`
    pub fn filter_implement_interfaces<I: TypeName>(self, interfaces: &[I]) -> Self {
        let interfaces = type_names(interfaces);
        let description = format!("filter_implement_interfaces({})", interfaces.join(", "));
        self.filter(
            move |c| interfaces.iter().all(|i| c.is_subtype_of(i)),
            description,
        )
    }

    /// Keep classes assignable to `superclass` (the class itself included)
    pub fn filter_is_subclass_of(self, superclass: impl TypeName) -> Self {
        let superclass = superclass.type_name().to_string();
        let description = format!("filter_is_subclass_of({})", superclass);
        self.filter(move |c| c.is_subtype_of(&superclass), description)
    }

    // ===== Annotations =====

    /// Keep classes carrying `annotation`
    pub fn filter_is_annotation_present(self, annotation: impl TypeName) -> Self {
        let annotation = annotation.type_name().to_string();
        let description = format!("filter_is_annotation_present({})", annotation);
        self.filter(move |c| c.has_annotation(&annotation), description)
    }

    /// Drop classes carrying `annotation`
    pub fn filter_is_not_annotation_present(self, annotation: impl TypeName) -> Self {
        let annotation = annotation.type_name().to_string();
        let description = format!("filter_is_not_annotation_present({})", annotation);
        self.filter_not(move |c| c.has_annotation(&annotation), description)
    }

    // ===== Flags =====

    flag_filters! {
        filter_is_abstract / filter_is_not_abstract => Class::is_abstract, "abstract classes";
        filter_is_interface / filter_is_not_interface => Class::is_interface, "interfaces";
        filter_is_enum / filter_is_not_enum => Class::is_enum, "enum types";
        filter_is_annotation / filter_is_not_annotation => Class::is_annotation, "annotation types";
        filter_is_public / filter_is_not_public => Class::is_public, "public classes";
        filter_is_final / filter_is_not_final => Class::is_final, "final classes";
        filter_is_synthetic / filter_is_not_synthetic => Class::is_synthetic, "synthetic classes";
        filter_is_anonymous / filter_is_not_anonymous => Class::is_anonymous, "anonymous classes";
        filter_is_local / filter_is_not_local => Class::is_local, "local classes";
        filter_is_member / filter_is_not_member => Class::is_member, "member classes";
        filter_is_primitive / filter_is_not_primitive => Class::is_primitive, "primitive types";
        filter_is_array / filter_is_not_array => Class::is_array, "array types";
    }

    // ===== Terminals =====

    /// Collect every matching class (empty is not an error)
    pub fn to_list(self) -> Result<Vec<Class>, FinderError> {
        self.inner.to_list()
    }

    /// Collect every matching class, failing if there are none
    pub fn to_list_non_empty(self) -> Result<Vec<Class>, FinderError> {
        self.inner.to_list_non_empty()
    }

    /// First matching class, failing with the diagnostics trail if none
    pub fn first(self) -> Result<Class, FinderError> {
        self.inner.first()
    }

    /// First matching class, or `None`
    pub fn first_or_none(self) -> Result<Option<Class>, FinderError> {
        self.inner.first_or_none()
    }

    /// Number of matching classes
    pub fn count(self) -> Result<usize, FinderError> {
        self.inner.count()
    }
}

fn field_type_count(class: &Class, ty: &str) -> usize {
    class.fields().iter().filter(|f| f.type_name == ty).count()
}

pub(crate) fn type_names<T: TypeName>(types: &[T]) -> Vec<String> {
    types.iter().map(|t| t.type_name().to_string()).collect()
}

/// Resolve any range into inclusive `(min, max)`; an empty range yields
/// `min > max`, which matches nothing
pub(crate) fn inclusive_bounds(range: &impl RangeBounds<usize>) -> (usize, usize) {
    let min = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let max = match range.end_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&0) => return (1, 0),
        Bound::Excluded(&n) => n - 1,
        Bound::Unbounded => usize::MAX,
    };
    (min, max)
}

pub(crate) fn bound_label(max: usize) -> String {
    if max == usize::MAX {
        "unbounded".to_string()
    } else {
        max.to_string()
    }
}
