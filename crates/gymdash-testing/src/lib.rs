//! Test utilities for Gymdash services.
//!
//! Provides `MockSession` for minting session tokens in integration tests.
//! Use from `[dev-dependencies]` only — never in production code.

pub mod auth;
