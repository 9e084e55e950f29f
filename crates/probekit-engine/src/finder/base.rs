//! Lazy filter pipeline shared by every finder
//!
//! A [`Finder`] owns one lazy candidate sequence and its
//! [`DiagnosticsTrail`]. Filters wrap the sequence without driving it; a
//! terminal call consumes the finder and walks the source once, testing
//! each candidate against the filters in the order they were added and
//! stopping at the first one that rejects it.
//!
//! Terminals take `self` by value, so a finder cannot be evaluated twice.
//!
//! Candidates are `Result`s: a source that resolves lazily (enumeration
//! through a host) yields `Err` for a name the host cannot resolve. Errors
//! skip every filter and surface at the terminal call.

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use super::trail::{DiagnosticsTrail, DEFAULT_SEPARATOR};
use crate::error::FinderError;

/// Boxed lazy candidate sequence
pub type Candidates<'a, T> = Box<dyn Iterator<Item = Result<T, FinderError>> + 'a>;

/// Lazy, single-use filter pipeline over candidates of type `T`
pub struct Finder<'a, T> {
    name: &'static str,
    sequence: Candidates<'a, T>,
    trail: DiagnosticsTrail,
    separator: Cow<'static, str>,
}

impl<'a, T: 'a> Finder<'a, T> {
    /// Create a finder over an infallible source
    pub fn new<I>(name: &'static str, source: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self::from_results(name, source.into_iter().map(Ok), description)
    }

    /// Create a finder over a source whose candidates may fail to resolve
    pub fn from_results<I>(name: &'static str, source: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = Result<T, FinderError>>,
        I::IntoIter: 'a,
    {
        Self {
            name,
            sequence: Box::new(source.into_iter()),
            trail: DiagnosticsTrail::new(description),
            separator: Cow::Borrowed(DEFAULT_SEPARATOR),
        }
    }

    /// Finder name used in failure messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source and filter descriptions recorded so far
    pub fn trail(&self) -> &DiagnosticsTrail {
        &self.trail
    }

    /// Set the separator used when rendering the trail
    pub fn with_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Keep candidates matching `predicate`
    pub fn filter<P>(mut self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        let sequence = std::mem::replace(&mut self.sequence, Box::new(std::iter::empty()));
        self.sequence = Box::new(sequence.filter(move |candidate| match candidate {
            Ok(c) => predicate(c),
            Err(_) => true,
        }));
        self.trail.record(description);
        self
    }

    /// Keep candidates not matching `predicate`
    pub fn filter_not<P>(self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.filter(move |c| !predicate(c), description)
    }

    /// Collect every remaining candidate (empty is not an error)
    pub fn to_list(self) -> Result<Vec<T>, FinderError> {
        let Finder {
            name,
            sequence,
            trail,
            ..
        } = self;
        let list = sequence.collect::<Result<Vec<_>, _>>()?;
        evaluated(name, &trail, list.len());
        Ok(list)
    }

    /// Collect every remaining candidate, failing if there are none
    pub fn to_list_non_empty(self) -> Result<Vec<T>, FinderError> {
        let Finder {
            name,
            sequence,
            trail,
            separator,
        } = self;
        let list = sequence.collect::<Result<Vec<_>, _>>()?;
        evaluated(name, &trail, list.len());
        if list.is_empty() {
            return Err(no_candidate(name, &trail, &separator));
        }
        Ok(list)
    }

    /// First remaining candidate, failing if there is none
    pub fn first(self) -> Result<T, FinderError> {
        let Finder {
            name,
            mut sequence,
            trail,
            separator,
        } = self;
        match sequence.next() {
            Some(Ok(candidate)) => {
                evaluated(name, &trail, 1);
                Ok(candidate)
            }
            Some(Err(error)) => Err(error),
            None => {
                evaluated(name, &trail, 0);
                Err(no_candidate(name, &trail, &separator))
            }
        }
    }

    /// First remaining candidate, or `None`
    pub fn first_or_none(self) -> Result<Option<T>, FinderError> {
        let Finder {
            name,
            mut sequence,
            trail,
            ..
        } = self;
        let first = sequence.next().transpose()?;
        evaluated(name, &trail, usize::from(first.is_some()));
        Ok(first)
    }

    /// Number of remaining candidates
    pub fn count(self) -> Result<usize, FinderError> {
        let Finder {
            name,
            mut sequence,
            trail,
            ..
        } = self;
        let count = sequence.try_fold(0usize, |n, candidate| candidate.map(|_| n + 1))?;
        evaluated(name, &trail, count);
        Ok(count)
    }
}

impl<T> fmt::Debug for Finder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("name", &self.name)
            .field("trail", &self.trail)
            .finish_non_exhaustive()
    }
}

fn evaluated(name: &'static str, trail: &DiagnosticsTrail, found: usize) {
    debug!(
        finder = name,
        filters = trail.len() - 1,
        found,
        "finder evaluated"
    );
}

fn no_candidate(name: &'static str, trail: &DiagnosticsTrail, separator: &str) -> FinderError {
    let message = trail.render(separator);
    debug!(finder = name, %message, "no candidate found");
    FinderError::NoCandidate {
        finder: name,
        message,
    }
}
