// src/upstream/mod.rs
//
// Client for the upstream finance API. All data reads accept an optional
// session cookie and work unauthenticated without one.

pub mod client;
pub mod models;

pub use client::{UpstreamClient, UpstreamError};
pub use models::{Prediction, Quote};
