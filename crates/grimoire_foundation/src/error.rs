//! Error types for the Grimoire system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every [`ErrorKind`] belongs to exactly one [`Severity`]: author errors are
//! problems in content text and are reported back to whoever wrote it; faults
//! mean something upstream stored the wrong kind of value and must never be
//! swallowed.

use std::fmt;

use thiserror::Error;

use crate::kind::ObjectKind;

/// Result alias used throughout Grimoire.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Grimoire operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<Box<ErrorContext>>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    /// Creates a malformed token error.
    #[must_use]
    pub fn malformed(
        discriminator: impl Into<String>,
        segment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MalformedToken {
            discriminator: discriminator.into(),
            segment: segment.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unknown discriminator error.
    #[must_use]
    pub fn unknown_discriminator(discriminator: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDiscriminator(discriminator.into()))
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference {
            kind,
            name: name.into(),
        })
    }

    /// Creates an object not found error.
    #[must_use]
    pub fn not_found(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            kind,
            name: name.into(),
        })
    }

    /// Creates a duplicate object error.
    #[must_use]
    pub fn duplicate(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateObject {
            kind,
            name: name.into(),
        })
    }

    /// Creates a slot type mismatch error.
    #[must_use]
    pub fn slot_type_mismatch(slot: impl Into<String>, expected: &'static str) -> Self {
        Self::new(ErrorKind::SlotTypeMismatch {
            slot: slot.into(),
            expected,
        })
    }

    /// Returns who this error should be surfaced to.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Returns true if this is an internal-consistency fault.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        self.severity() == Severity::Fault
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Token text does not follow the grammar.
    #[error("malformed {discriminator} token at '{segment}': {reason}")]
    MalformedToken {
        /// Discriminator of the token being parsed (empty if missing).
        discriminator: String,
        /// The offending segment.
        segment: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No token family is registered for this discriminator.
    #[error("unknown discriminator: {0}")]
    UnknownDiscriminator(String),

    /// A single reference still names nothing after loading finished.
    #[error("unresolved {kind} reference: {name}")]
    UnresolvedReference {
        /// Kind the reference targets.
        kind: ObjectKind,
        /// The name that matched nothing.
        name: String,
    },

    /// A strict lookup found no object.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Kind that was searched.
        kind: ObjectKind,
        /// The name that was looked up.
        name: String,
    },

    /// An object with the same key is already registered.
    #[error("duplicate {kind}: {name}")]
    DuplicateObject {
        /// Kind of the object.
        kind: ObjectKind,
        /// The duplicated key.
        name: String,
    },

    /// A list slot holds a value that is not the slot's declared type.
    #[error("slot {slot} holds a value that is not a {expected}")]
    SlotTypeMismatch {
        /// The slot that was read.
        slot: String,
        /// Name of the type the slot is declared to hold.
        expected: &'static str,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns who this kind of error should be surfaced to.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::MalformedToken { .. }
            | Self::UnknownDiscriminator(_)
            | Self::UnresolvedReference { .. }
            | Self::NotFound { .. }
            | Self::DuplicateObject { .. } => Severity::Author,
            Self::SlotTypeMismatch { .. } | Self::Internal(_) => Severity::Fault,
        }
    }
}

/// Who an error is reported to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A content author can fix this by editing source text.
    Author,
    /// A programming fault; fail fast.
    Fault,
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or definition name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Tokens being processed, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
