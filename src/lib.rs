//! Grimoire - Symbolic content references and a round-trip token codec
//!
//! This crate re-exports all layers of the Grimoire system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: grimoire_token      — Token grammar, codecs, grant/revoke, validation
//! Layer 2: grimoire_provider   — Providers, list slots, characters, effect actors
//! Layer 1: grimoire_registry   — References, content kinds, reference registry
//! Layer 0: grimoire_foundation — Core types (Error, ObjectKind, TagSet)
//! ```

pub use grimoire_foundation as foundation;
pub use grimoire_provider as provider;
pub use grimoire_registry as registry;
pub use grimoire_token as token;
