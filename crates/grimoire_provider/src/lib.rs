//! Providers, typed list slots, characters, and effect actors for Grimoire.
//!
//! This crate provides:
//! - [`Provider`] - An immutable aggregate of direct and derived references
//! - [`ListStore`] - Ordered list slots keyed by [`ListKey`]
//! - [`Definition`] and [`Character`] - The entities that own list slots
//! - [`EffectActor`] - Applies and reverses the effect of a granted provider
//! - [`PrerequisiteGuard`] - Opaque prerequisite clauses attached to a provider
//!
//! # Flow
//!
//! ```text
//! Definition slot ──(choice grants)──► EffectActor::apply ──► Character
//!                 ◄─(choice revokes)── EffectActor::remove ◄──
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod entity;
pub mod list;
pub mod prerequisite;
pub mod provider;

pub use actor::{EffectActor, ProficiencyActor};
pub use entity::{Character, Definition, HasLists};
pub use list::{ListKey, ListKeyId, ListStore, SlotValue, downcast_slot};
pub use prerequisite::{AlwaysPass, PrerequisiteGuard, PrerequisiteTester};
pub use provider::{ArmorProfProvider, Provider, ShieldProfProvider};
