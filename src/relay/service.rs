//! Session relay service
//!
//! Given an application token, produce the upstream credentials needed to
//! act on the user's behalf, and keep the cached upstream session cookie
//! fresh after each re-authentication.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;

use super::models::{EscrowClaims, ResolvedCredentials, SessionRecord};
use super::store::SessionStore;
use crate::common::safe_email_log;

/// Fixed escrow token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

pub struct SessionRelay {
    store: Arc<dyn SessionStore>,
    jwt_secret: String,
}

impl SessionRelay {
    pub fn new(store: Arc<dyn SessionStore>, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    /// Token lifetime in seconds, for response bodies
    pub fn token_ttl_seconds() -> u64 {
        (TOKEN_TTL_HOURS * 3600) as u64
    }

    /// Create or overwrite the session record for `user_id` and sign an
    /// escrow token over the credentials.
    ///
    /// The caller is expected to have already validated the credentials
    /// against the upstream API; `cookies` carries the session cookie
    /// obtained during that validation, if any.
    pub async fn issue_token(
        &self,
        email: &str,
        password: &str,
        user_id: &str,
        cookies: Option<String>,
    ) -> Result<String, RelayError> {
        let record = SessionRecord {
            email: email.to_string(),
            password: password.to_string(),
            cookies: cookies.unwrap_or_default(),
            updated_at: Utc::now(),
        };
        self.store.put(user_id, record).await;

        let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
        let claims = EscrowClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            exp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        debug!(
            user_id = %user_id,
            email = %safe_email_log(email),
            "Issued escrow token"
        );

        Ok(token)
    }

    /// Verify an escrow token and return the credentials to act with.
    ///
    /// Cookies come from the cached session record when one exists
    /// (possibly an empty string); email/password prefer the cached
    /// record, falling back to the values embedded in the token when the
    /// store has no record (e.g. after a restart).
    ///
    /// Any verification failure, including expiry, yields `None` rather
    /// than an error: callers treat absence as "proceed unauthenticated".
    pub async fn resolve_credentials(&self, token: &str) -> Option<ResolvedCredentials> {
        let decoded = match decode::<EscrowClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        ) {
            Ok(d) => d,
            Err(e) => {
                debug!(error = %e, "Escrow token rejected");
                return None;
            }
        };

        let claims = decoded.claims;
        match self.store.get(&claims.sub).await {
            Some(record) => Some(ResolvedCredentials {
                user_id: claims.sub,
                email: record.email,
                password: record.password,
                cookies: record.cookies,
            }),
            None => Some(ResolvedCredentials {
                user_id: claims.sub,
                email: claims.email,
                password: claims.password,
                cookies: String::new(),
            }),
        }
    }

    /// Overwrite the cached cookie for an existing session record.
    ///
    /// A record can only be created through `issue_token`, so this is a
    /// silent no-op when none exists for `user_id`.
    pub async fn refresh_cookies(&self, user_id: &str, cookies: &str) {
        match self.store.get(user_id).await {
            Some(mut record) => {
                record.cookies = cookies.to_string();
                record.updated_at = Utc::now();
                self.store.put(user_id, record).await;
                debug!(user_id = %user_id, "Refreshed cached session cookie");
            }
            None => {
                debug!(user_id = %user_id, "No session record to refresh");
            }
        }
    }
}
