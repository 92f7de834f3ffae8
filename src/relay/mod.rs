//! # Relay Module
//!
//! This module bridges FinSync's own bearer-token authentication to the
//! upstream finance API's email/password login:
//! - escrow token generation and validation (24h HS256 tokens)
//! - the per-user session record store (volatile, process-lifetime)
//! - credential resolution with cached-cookie lookup
//! - MaybeCredentials extractor for routes that degrade to anonymous

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use extractors::MaybeCredentials;
pub use models::{ResolvedCredentials, SessionRecord};
pub use routes::relay_routes;
pub use service::SessionRelay;
pub use store::{MemorySessionStore, SessionStore};
