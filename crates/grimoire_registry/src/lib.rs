//! Symbolic references and the reference registry for Grimoire.
//!
//! This crate provides:
//! - [`Reference`] - A symbolic description of zero or more objects of one kind
//! - [`ReferenceRegistry`] - Live object storage queried lazily through references
//! - [`content`] - The concrete content kinds ([`ShieldProf`], [`ArmorProf`], [`Equipment`])
//!
//! References never cache what they resolve to. Every query runs against
//! the registry as it is at call time, so objects registered after a
//! reference was built are picked up by the next query.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod content;
pub mod reference;
pub mod registry;

pub use content::{ArmorProf, Derive, Equipment, ShieldProf};
pub use reference::{Reference, Selector};
pub use registry::ReferenceRegistry;
