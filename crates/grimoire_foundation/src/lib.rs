//! Core error types, object kinds, and tag sets for Grimoire.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context and a severity split
//! - [`ObjectKind`] - The closed set of content kinds a reference can target
//! - [`Loadable`] - The contract every registered content object satisfies
//! - [`TagSet`] - Ordered, case-insensitively matched classification tags
//! - [`SortKeyed`] - Stable ordering for reports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod kind;
pub mod tags;

pub use error::{Error, ErrorContext, ErrorKind, Result, Severity};
pub use kind::{Loadable, ObjectKind, SortKeyed};
pub use tags::TagSet;
