//! Shared service plumbing for Plume services: health endpoints,
//! tracing setup, request-id middleware, timestamp serialization, and
//! trigger authorization.

pub mod auth;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
