//! Credential extractor for Axum
//!
//! Unlike a conventional auth extractor this one never rejects: a
//! missing or invalid token yields `MaybeCredentials(None)` and the
//! handler proceeds as an anonymous request against the upstream API.

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::ResolvedCredentials;
use crate::common::{safe_token_log, ApiError, AppState};

/// Optional upstream credentials resolved from a bearer escrow token
#[derive(Debug)]
pub struct MaybeCredentials(pub Option<ResolvedCredentials>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeCredentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // No Authorization header: the relay path is skipped entirely
        let token = match parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        {
            Some(t) => t.to_string(),
            None => {
                debug!("No Authorization header, proceeding anonymously");
                return Ok(MaybeCredentials(None));
            }
        };

        // Handle "Bearer <token>" format or raw token
        let bare_token = token.strip_prefix("Bearer ").unwrap_or(&token);

        let creds = app_state.relay.resolve_credentials(bare_token).await;
        if creds.is_none() {
            debug!(
                token = %safe_token_log(bare_token),
                "Escrow token did not resolve, proceeding anonymously"
            );
        }

        Ok(MaybeCredentials(creds))
    }
}
