//! Session types shared across Gymdash services.
//!
//! Provides session-token validation, session token lookup in cookies/headers,
//! and the `SessionIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
