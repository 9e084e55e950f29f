//! Finders
//!
//! Chainable, lazily evaluated searches over classes and methods. Each
//! finder records a diagnostics trail so that an empty required result
//! explains which filter removed the last candidates.

/// Generates a named flag filter and its negated twin
macro_rules! flag_filters {
    ($($is:ident / $is_not:ident => $pred:path, $what:literal;)*) => {
        $(
            #[doc = concat!("Keep ", $what)]
            pub fn $is(self) -> Self {
                self.filter($pred, stringify!($is))
            }

            #[doc = concat!("Drop ", $what)]
            pub fn $is_not(self) -> Self {
                self.filter_not($pred, stringify!($is_not))
            }
        )*
    };
}

mod base;
mod class_finder;
mod method_finder;
mod trail;

pub use base::{Candidates, Finder};
pub use class_finder::ClassFinder;
pub use method_finder::MethodFinder;
pub use trail::{DiagnosticsTrail, DEFAULT_SEPARATOR};
