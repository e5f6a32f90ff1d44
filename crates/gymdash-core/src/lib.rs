//! Service plumbing shared by Gymdash services: configuration loading, health
//! handlers, request-id middleware, tracing setup and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
