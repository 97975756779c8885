//! Codec configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grammar dialect and separators for a [`TokenLibrary`].
///
/// [`TokenLibrary`]: crate::TokenLibrary
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodecConfig {
    /// Whether trailing prerequisite clauses are accepted.
    pub allow_prerequisites: bool,

    /// Joins the tokens of several providers stored in one slot.
    pub value_separator: String,

    /// Reject single references unknown at parse time.
    ///
    /// Off by default: while loading, a token may name an object defined
    /// later, and unresolved names are reported by validation instead.
    pub strict_references: bool,
}

/// The data-file column separator.
pub const DEFAULT_VALUE_SEPARATOR: &str = "\t";

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            allow_prerequisites: true,
            value_separator: DEFAULT_VALUE_SEPARATOR.to_string(),
            strict_references: false,
        }
    }
}

impl CodecConfig {
    /// The data-file dialect: prerequisites allowed, tab separated.
    #[must_use]
    pub fn lst() -> Self {
        Self::default()
    }

    /// Like [`CodecConfig::lst`], but every single reference must already
    /// be registered when the token is parsed.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_references: true,
            ..Self::default()
        }
    }

    /// Builder method to allow or forbid prerequisite clauses.
    #[must_use]
    pub fn with_prerequisites(mut self, allow: bool) -> Self {
        self.allow_prerequisites = allow;
        self
    }

    /// Builder method to set the value separator.
    ///
    /// An empty separator falls back to [`DEFAULT_VALUE_SEPARATOR`].
    #[must_use]
    pub fn with_value_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        self.value_separator = if separator.is_empty() {
            DEFAULT_VALUE_SEPARATOR.to_string()
        } else {
            separator
        };
        self
    }

    /// The separator actually used to split and join values.
    ///
    /// Same as `value_separator`, except that an empty one (set directly
    /// or deserialized) reads as [`DEFAULT_VALUE_SEPARATOR`].
    #[must_use]
    pub fn separator(&self) -> &str {
        if self.value_separator.is_empty() {
            DEFAULT_VALUE_SEPARATOR
        } else {
            &self.value_separator
        }
    }

    /// Builder method to enable or disable strict references.
    #[must_use]
    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }
}
