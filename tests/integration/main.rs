//! Cross-layer integration tests for Grimoire
//!
//! Tests that verify correct interaction between multiple crates.

mod choices;
