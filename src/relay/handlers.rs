//! Relay handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::models::{LinkAccountRequest, LinkAccountResponse};
use super::service::SessionRelay;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};
use crate::upstream::UpstreamError;

/// POST /api/relay/link
/// Links an upstream finance account to a FinSync user and returns an
/// escrow token for subsequent requests
///
/// # Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "...",
///   "user_id": "U_K7NP3X"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<escrow token>",
///   "user_id": "U_K7NP3X",
///   "expires_in": 86400
/// }
/// ```
pub async fn link_account(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LinkAccountRequest>,
) -> Result<Json<LinkAccountResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let email = payload.email.trim();
    let password = payload.password.as_str();

    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::ValidationError(
            "email: must be a valid email address".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(ApiError::ValidationError(
            "password: must not be empty".to_string(),
        ));
    }

    info!(
        email = %safe_email_log(email),
        "Received account link request"
    );

    // Validate the credentials against the upstream login endpoint and
    // capture the session cookie it hands back
    let cookie = match state.upstream.login(email, password).await {
        Ok(cookie) => cookie,
        Err(UpstreamError::Status { status }) => {
            warn!(
                http_status = %status,
                email = %safe_email_log(email),
                "Upstream rejected login during account link"
            );
            return Err(ApiError::Unauthorized(
                "upstream rejected the credentials".to_string(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Upstream login unreachable during account link");
            return Err(ApiError::ServiceUnavailable(
                "upstream login unavailable".to_string(),
            ));
        }
    };

    let user_id = payload
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_user_id);

    let token = state
        .relay
        .issue_token(email, password, &user_id, Some(cookie))
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "Failed to sign escrow token");
            ApiError::InternalServer("failed to issue token".to_string())
        })?;

    info!(
        user_id = %user_id,
        email = %safe_email_log(email),
        "Linked upstream account"
    );

    Ok(Json(LinkAccountResponse {
        token,
        user_id,
        expires_in: SessionRelay::token_ttl_seconds(),
    }))
}
