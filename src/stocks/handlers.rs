//! Stocks handlers
//!
//! Each handler follows the same shape: acquire a fresh upstream session
//! cookie for the caller (if any credentials resolved), perform the data
//! read with it, and retry unauthenticated before giving up. End users
//! see a successful response, a degraded public response, or a generic
//! "failed to fetch" only when both paths fail.

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::{QuotesQueryParams, QuotesResponse};
use crate::common::{ApiError, AppState};
use crate::relay::{MaybeCredentials, ResolvedCredentials};
use crate::upstream::{Prediction, Quote, UpstreamError};

/// Upper bound on symbols per batch request
const MAX_BATCH_SYMBOLS: usize = 50;

/// Re-authenticate upstream with the resolved credentials and return a
/// fresh session cookie.
///
/// Upstream sessions are assumed short-lived, so a fresh login happens on
/// every protected request instead of replaying the cached cookie. On
/// success the cache is refreshed best-effort for future reads; on
/// failure the request continues unauthenticated.
async fn acquire_session_cookie(
    state: &AppState,
    creds: Option<&ResolvedCredentials>,
) -> Option<String> {
    let creds = creds?;

    match state.upstream.login(&creds.email, &creds.password).await {
        Ok(cookie) => {
            state.relay.refresh_cookies(&creds.user_id, &cookie).await;
            debug!(user_id = %creds.user_id, "Upstream session refreshed");
            Some(cookie)
        }
        Err(e) => {
            warn!(
                user_id = %creds.user_id,
                error = %e,
                "Upstream login failed, continuing unauthenticated"
            );
            None
        }
    }
}

/// GET /api/stocks/:symbol - Fetch a single quote
pub async fn get_quote(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeCredentials(creds): MaybeCredentials,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let state = state_lock.read().await.clone();

    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(ApiError::ValidationError("symbol: must not be empty".to_string()));
    }

    let cookie = acquire_session_cookie(&state, creds.as_ref()).await;

    let quote = match state.upstream.fetch_quote(&symbol, cookie.as_deref()).await {
        Ok(quote) => quote,
        Err(UpstreamError::Status { status }) if status == StatusCode::NOT_FOUND => {
            return Err(ApiError::NotFound(format!("unknown symbol: {}", symbol)));
        }
        Err(e) if cookie.is_some() => {
            // Authenticated read failed; fall back to the public path
            warn!(symbol = %symbol, error = %e, "Authenticated quote read failed, retrying unauthenticated");
            state.upstream.fetch_quote(&symbol, None).await.map_err(|e| {
                error!(symbol = %symbol, error = %e, "Quote read failed on both paths");
                ApiError::ServiceUnavailable("failed to fetch".to_string())
            })?
        }
        Err(e) => {
            error!(symbol = %symbol, error = %e, "Quote read failed");
            return Err(ApiError::ServiceUnavailable("failed to fetch".to_string()));
        }
    };

    Ok(Json(quote))
}

/// GET /api/stocks?symbols=AAA,BBB,CCC - Fetch quotes for many symbols
///
/// Symbols are fetched concurrently and independently; the response
/// contains only the successes.
pub async fn get_quotes(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeCredentials(creds): MaybeCredentials,
    Query(params): Query<QuotesQueryParams>,
) -> Result<Json<QuotesResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut symbols: Vec<String> = params
        .symbols
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(ApiError::ValidationError(
            "symbols: at least one symbol is required".to_string(),
        ));
    }
    if symbols.len() > MAX_BATCH_SYMBOLS {
        warn!(
            requested = symbols.len(),
            max = MAX_BATCH_SYMBOLS,
            "Truncating oversized batch request"
        );
        symbols.truncate(MAX_BATCH_SYMBOLS);
    }

    // One login covers the whole batch; the data reads fan out from it
    let cookie = acquire_session_cookie(&state, creds.as_ref()).await;

    let quotes = state.upstream.fetch_quotes(&symbols, cookie.as_deref()).await;

    debug!(
        requested = symbols.len(),
        returned = quotes.len(),
        "Batch quote fetch complete"
    );

    Ok(Json(QuotesResponse {
        requested: symbols.len(),
        returned: quotes.len(),
        quotes,
    }))
}

/// GET /api/predictions/:symbol - Fetch a price prediction
pub async fn get_prediction(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeCredentials(creds): MaybeCredentials,
    Path(symbol): Path<String>,
) -> Result<Json<Prediction>, ApiError> {
    let state = state_lock.read().await.clone();

    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(ApiError::ValidationError("symbol: must not be empty".to_string()));
    }

    let cookie = acquire_session_cookie(&state, creds.as_ref()).await;

    let prediction = match state
        .upstream
        .fetch_prediction(&symbol, cookie.as_deref())
        .await
    {
        Ok(prediction) => prediction,
        Err(UpstreamError::Status { status }) if status == StatusCode::NOT_FOUND => {
            return Err(ApiError::NotFound(format!("unknown symbol: {}", symbol)));
        }
        Err(e) if cookie.is_some() => {
            warn!(symbol = %symbol, error = %e, "Authenticated prediction read failed, retrying unauthenticated");
            state
                .upstream
                .fetch_prediction(&symbol, None)
                .await
                .map_err(|e| {
                    error!(symbol = %symbol, error = %e, "Prediction read failed on both paths");
                    ApiError::ServiceUnavailable("failed to fetch".to_string())
                })?
        }
        Err(e) => {
            error!(symbol = %symbol, error = %e, "Prediction read failed");
            return Err(ApiError::ServiceUnavailable("failed to fetch".to_string()));
        }
    };

    Ok(Json(prediction))
}
