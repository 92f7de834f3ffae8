//! # Tax Module
//!
//! Slab-based marginal income tax computation. Pure functions in
//! `slabs.rs`, exposed through a single POST endpoint. No upstream calls.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod slabs;

pub use routes::tax_routes;
pub use slabs::{compute_tax, TaxRegime};
