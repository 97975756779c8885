//! Token codec, effect actor table, and post-load validation for Grimoire.
//!
//! Tokens are compact, pipe-delimited text:
//!
//! ```text
//! SHIELD|TYPE=Heavy.Tower|MyCustomShield|PRELEVEL:MIN=4
//! ──┬─── ───────┬──────── ──────┬─────── ───────┬──────
//!   │           │               │               └─ prerequisite clauses (trailing)
//!   │           │               └─ direct references, or the family wildcard
//!   │           └─ tag filter over equipment (derived references)
//!   └─ discriminator: picks the token family
//! ```
//!
//! # Modules
//!
//! - [`config`] - Dialect and separator settings
//! - [`codec`] - Grammar splitting and the [`TokenCodec`] trait
//! - [`family`] - Proficiency token families (`SHIELD`, `ARMOR`)
//! - [`library`] - Discriminator tables, load, grant/revoke, unparse, validation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod config;
pub mod family;
pub mod library;

pub use codec::{ParsedToken, TokenCodec};
pub use config::{CodecConfig, DEFAULT_VALUE_SEPARATOR};
pub use family::ProficiencyToken;
pub use library::{GrantOutcome, LoadReport, LoadedToken, TokenLibrary};
