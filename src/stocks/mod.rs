//! # Stocks Module
//!
//! Market data routes backed by the upstream finance API:
//! - single and batch quote reads
//! - prediction reads
//!
//! Every handler runs the relay re-authentication protocol: resolve the
//! escrow token, log in upstream for a fresh session cookie, and degrade
//! to an unauthenticated read when either step fails.

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::stocks_routes;
