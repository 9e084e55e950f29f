//! Probekit Types
//!
//! Host metadata model shared by the probekit query engine:
//! - **Handles**: [`Class`], [`MethodInfo`], [`ConstructorInfo`], [`FieldInfo`]
//!   and the hookable [`Member`] reference
//! - **Modifiers**: access and kind flags ([`Modifiers`])
//! - **Loading contexts**: [`LoadingContext`] with an optional parent chain
//! - **Host interface**: the [`TypeHost`] lookup trait and the ahead-of-time
//!   [`ClassTable`] that implements it from a metadata table
//!
//! # Example
//!
//! ```rust,ignore
//! use probekit_types::{ClassInfo, ClassTable, LoadingContext, Modifiers, TypeHost};
//!
//! let app = LoadingContext::new("app");
//! let mut table = ClassTable::new();
//! table.register(&app, ClassInfo::new("com.example.Main").with_modifiers(Modifiers::PUBLIC));
//!
//! let main = table.resolve_type("com.example.Main", &app)?;
//! assert!(main.is_public());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod class;
pub mod context;
pub mod error;
pub mod host;
pub mod member;
pub mod modifiers;
pub mod table;

pub use class::{Class, ClassId, ClassInfo, Nesting, TypeCategory, TypeName};
pub use context::LoadingContext;
pub use error::{LookupError, TableError};
pub use host::TypeHost;
pub use member::{ConstructorInfo, FieldInfo, Member, MemberId, MethodInfo};
pub use modifiers::Modifiers;
pub use table::ClassTable;
