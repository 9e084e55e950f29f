//! Method finder
//!
//! Member-search twin of [`ClassFinder`](super::ClassFinder), usually fed
//! straight into bulk hook installation:
//!
//! ```rust,ignore
//! let targets = MethodFinder::from_class(&activity)
//!     .filter_by_name("onCreate")
//!     .filter_is_not_static()
//!     .to_list()?;
//! create_hooks(&interceptor, targets, |hook| { hook.return_constant(Value::Null); })?;
//! ```

use std::ops::RangeBounds;

use probekit_types::{Class, MethodInfo, TypeName};

use super::base::Finder;
use super::class_finder::{bound_label, inclusive_bounds, type_names};
use crate::error::FinderError;

const NAME: &str = "MethodFinder";

/// Lazy method search
#[derive(Debug)]
pub struct MethodFinder<'a> {
    inner: Finder<'a, MethodInfo>,
}

impl<'a> MethodFinder<'a> {
    fn from_finder(inner: Finder<'a, MethodInfo>) -> Self {
        Self { inner }
    }

    /// Methods declared by `class`
    pub fn from_class(class: &Class) -> Self {
        Self::from_finder(Finder::new(
            NAME,
            class.methods().to_vec(),
            format!(
                "No such method found in class {}(size={})",
                class.name(),
                class.methods().len()
            ),
        ))
    }

    /// A fixed slice of methods
    pub fn from_array(array: &[MethodInfo]) -> Self {
        Self::from_finder(Finder::new(
            NAME,
            array.to_vec(),
            format!("No such method found in array(size={})", array.len()),
        ))
    }

    /// Any iterable of methods
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = MethodInfo>,
        I::IntoIter: 'a,
    {
        Self::from_finder(Finder::new(NAME, iterable, "No such method found in iterable"))
    }

    /// Keep methods matching `predicate`
    pub fn filter<P>(self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&MethodInfo) -> bool + 'a,
    {
        Self::from_finder(self.inner.filter(predicate, description))
    }

    /// Drop methods matching `predicate`
    pub fn filter_not<P>(self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&MethodInfo) -> bool + 'a,
    {
        Self::from_finder(self.inner.filter_not(predicate, description))
    }

    /// Underlying pipeline
    pub fn finder(&self) -> &Finder<'a, MethodInfo> {
        &self.inner
    }

    /// Keep methods named `name`
    pub fn filter_by_name(self, name: &str) -> Self {
        let name = name.to_string();
        let description = format!("filter_by_name({})", name);
        self.filter(move |m| m.name == name, description)
    }

    /// Keep methods returning `ty`
    pub fn filter_by_return_type(self, ty: impl TypeName) -> Self {
        let ty = ty.type_name().to_string();
        let description = format!("filter_by_return_type({})", ty);
        self.filter(move |m| m.return_type == ty, description)
    }

    /// Keep methods with exactly these parameter types
    pub fn filter_by_param_types<P: TypeName>(self, params: &[P]) -> Self {
        let params = type_names(params);
        let description = format!("filter_by_param_types({})", params.join(", "));
        self.filter(move |m| m.param_types == params, description)
    }

    /// Keep methods taking exactly `count` parameters
    pub fn filter_by_param_count(self, count: usize) -> Self {
        self.filter(
            move |m| m.param_types.len() == count,
            format!("filter_by_param_count({})", count),
        )
    }

    /// Keep methods taking between `min` and `max` (inclusive) parameters
    pub fn filter_by_param_count_in(self, min: usize, max: usize) -> Self {
        self.filter(
            move |m| (min..=max).contains(&m.param_types.len()),
            format!(
                "filter_by_param_count_in(min={}, max={})",
                min,
                bound_label(max)
            ),
        )
    }

    /// Range form of [`Self::filter_by_param_count_in`]
    pub fn filter_by_param_count_in_range(self, range: impl RangeBounds<usize>) -> Self {
        let (min, max) = inclusive_bounds(&range);
        self.filter_by_param_count_in(min, max)
    }

    /// Keep methods taking at least one parameter
    pub fn filter_has_params(self) -> Self {
        self.filter_by_param_count_in(1, usize::MAX)
    }

    flag_filters! {
        filter_is_static / filter_is_not_static => MethodInfo::is_static, "static methods";
        filter_is_public / filter_is_not_public => MethodInfo::is_public, "public methods";
        filter_is_abstract / filter_is_not_abstract => MethodInfo::is_abstract, "abstract methods";
        filter_is_final / filter_is_not_final => MethodInfo::is_final, "final methods";
        filter_is_synthetic / filter_is_not_synthetic
            => MethodInfo::is_synthetic, "synthetic methods";
    }

    /// Collect every matching method (empty is not an error)
    pub fn to_list(self) -> Result<Vec<MethodInfo>, FinderError> {
        self.inner.to_list()
    }

    /// Collect every matching method, failing if there are none
    pub fn to_list_non_empty(self) -> Result<Vec<MethodInfo>, FinderError> {
        self.inner.to_list_non_empty()
    }

    /// First matching method, failing with the diagnostics trail if none
    pub fn first(self) -> Result<MethodInfo, FinderError> {
        self.inner.first()
    }

    /// First matching method, or `None`
    pub fn first_or_none(self) -> Result<Option<MethodInfo>, FinderError> {
        self.inner.first_or_none()
    }

    /// Number of matching methods
    pub fn count(self) -> Result<usize, FinderError> {
        self.inner.count()
    }
}
