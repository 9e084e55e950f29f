//! Access and kind modifiers
//!
//! Classes and members carry a single flag set. The bit values follow the
//! usual class-file access flag layout so host tables can copy them as-is.
//!
//! In metadata table files modifiers are written as a space or `|`
//! separated list:
//!
//! ```toml
//! modifiers = "public abstract"
//! ```

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Modifier flags (bitflags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self(0x0000);
    /// Public visibility
    pub const PUBLIC: Self = Self(0x0001);
    /// Private visibility
    pub const PRIVATE: Self = Self(0x0002);
    /// Protected visibility
    pub const PROTECTED: Self = Self(0x0004);
    /// Static member or nested class
    pub const STATIC: Self = Self(0x0008);
    /// Final (not overridable / not subclassable)
    pub const FINAL: Self = Self(0x0010);
    /// Interface type
    pub const INTERFACE: Self = Self(0x0200);
    /// Abstract class or method
    pub const ABSTRACT: Self = Self(0x0400);
    /// Compiler generated
    pub const SYNTHETIC: Self = Self(0x1000);
    /// Annotation type
    pub const ANNOTATION: Self = Self(0x2000);
    /// Enum type
    pub const ENUM: Self = Self(0x4000);

    const NAMED: [(&'static str, Self); 10] = [
        ("public", Self::PUBLIC),
        ("private", Self::PRIVATE),
        ("protected", Self::PROTECTED),
        ("static", Self::STATIC),
        ("final", Self::FINAL),
        ("interface", Self::INTERFACE),
        ("abstract", Self::ABSTRACT),
        ("synthetic", Self::SYNTHETIC),
        ("annotation", Self::ANNOTATION),
        ("enum", Self::ENUM),
    ];

    /// Create from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if all flags of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of flags
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove flags
    pub const fn difference(&self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Check if no flag is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Parse a single modifier keyword
    pub fn from_keyword(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, flag)| *flag)
    }

    /// Parse a combined list such as `"public final"` or `"public | static"`
    pub fn parse(s: &str) -> Option<Self> {
        let mut result = Self::NONE;
        for part in s.split(|c: char| c == '|' || c.is_whitespace()) {
            if part.is_empty() {
                continue;
            }
            result = result.union(Self::from_keyword(part)?);
        }
        Some(result)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join(" "))
    }
}

impl TryFrom<String> for Modifiers {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid modifiers: {}", value))
    }
}

impl From<Modifiers> for String {
    fn from(value: Modifiers) -> Self {
        value.to_string()
    }
}
