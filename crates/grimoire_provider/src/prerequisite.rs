//! Prerequisite guards.
//!
//! The clauses are kept as opaque text. Evaluating them belongs to the
//! prerequisite engine, reached through [`PrerequisiteTester`].

use std::fmt;

use crate::entity::Character;

/// Prerequisite clauses attached to a provider, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrerequisiteGuard {
    clauses: Vec<String>,
}

impl PrerequisiteGuard {
    /// Creates a guard from clauses such as `PRELEVEL:MIN=2`.
    #[must_use]
    pub fn new(clauses: Vec<String>) -> Self {
        Self { clauses }
    }

    /// Creates a guard with one clause.
    #[must_use]
    pub fn single(clause: impl Into<String>) -> Self {
        Self::new(vec![clause.into()])
    }

    /// The clauses, in source order.
    #[must_use]
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Returns true if the segment is written as a prerequisite clause.
    ///
    /// A clause is `PRE<NAME>:<body>` or `!PRE<NAME>:<body>`, with `<NAME>`
    /// made of ASCII uppercase letters (possibly empty).
    #[must_use]
    pub fn is_clause(segment: &str) -> bool {
        let body = segment.strip_prefix('!').unwrap_or(segment);
        let Some((head, _)) = body.split_once(':') else {
            return false;
        };
        head.strip_prefix("PRE")
            .is_some_and(|name| name.bytes().all(|b| b.is_ascii_uppercase()))
    }
}

impl fmt::Display for PrerequisiteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join("|"))
    }
}

/// Decides whether a guarded provider may be granted to a character.
pub trait PrerequisiteTester {
    /// Returns true if `character` satisfies `guard`.
    fn passes(&self, guard: &PrerequisiteGuard, character: &Character) -> bool;
}

/// A tester that accepts every guard.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysPass;

impl PrerequisiteTester for AlwaysPass {
    fn passes(&self, _guard: &PrerequisiteGuard, _character: &Character) -> bool {
        true
    }
}

impl<F> PrerequisiteTester for F
where
    F: Fn(&PrerequisiteGuard, &Character) -> bool,
{
    fn passes(&self, guard: &PrerequisiteGuard, character: &Character) -> bool {
        self(guard, character)
    }
}
