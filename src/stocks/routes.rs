//! Stocks routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the stocks router
///
/// # Routes
/// - `GET /api/stocks?symbols=AAA,BBB` - Batch quote fetch (successes only)
/// - `GET /api/stocks/:symbol` - Single quote
/// - `GET /api/predictions/:symbol` - Price prediction
pub fn stocks_routes() -> Router {
    Router::new()
        .route("/api/stocks", get(handlers::get_quotes))
        .route("/api/stocks/:symbol", get(handlers::get_quote))
        .route("/api/predictions/:symbol", get(handlers::get_prediction))
}
