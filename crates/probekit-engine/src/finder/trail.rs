//! Diagnostics trail
//!
//! Append-only record of how a finder was built: entry 0 describes the
//! candidate source, every later entry describes one filter in the order it
//! was applied. The trail is only rendered when a required-result terminal
//! comes back empty.

/// Default separator between rendered trail entries
pub const DEFAULT_SEPARATOR: &str = " / ";

/// Ordered log of source and filter descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsTrail {
    entries: Vec<String>,
}

impl DiagnosticsTrail {
    /// Start a trail with the source description
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            entries: vec![source.into()],
        }
    }

    /// Append a filter description
    pub fn record(&mut self, description: impl Into<String>) {
        self.entries.push(description.into());
    }

    /// Source description (entry 0)
    pub fn source(&self) -> &str {
        &self.entries[0]
    }

    /// All entries in order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries (source included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a trail carries at least its source entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the failure message for an empty result
    pub fn render(&self, separator: &str) -> String {
        format!("{} -> 0 candidates", self.entries.join(separator))
    }
}
