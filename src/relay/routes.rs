//! Relay routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the relay router
///
/// # Routes
/// - `POST /api/relay/link` - Link an upstream account and obtain an escrow token
pub fn relay_routes() -> Router {
    Router::new().route("/api/relay/link", post(handlers::link_account))
}
