//! Test utilities for the newsletter service.
//!
//! Provides in-memory repository implementations that honor the same
//! uniqueness and compare-and-swap rules as the database-backed ones,
//! plus fixture builders. Import in `#[cfg(test)]` blocks and
//! integration tests only — never in production code.

pub mod fixtures;
pub mod mocks;
