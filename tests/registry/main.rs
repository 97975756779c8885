//! Integration tests for Layer 1: Registry
//!
//! Tests for references, content kinds, and lazy resolution.

mod references;
mod resolution;
