//! Tax routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the tax router
///
/// # Routes
/// - `POST /api/tax/calculate` - Slab-wise marginal tax computation
pub fn tax_routes() -> Router {
    Router::new().route("/api/tax/calculate", post(handlers::calculate_tax))
}
