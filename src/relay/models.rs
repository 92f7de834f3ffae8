//! Relay data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Escrow claims embedded in the application token.
///
/// The token carries the upstream email/password so credentials can be
/// recovered even when the in-process session store is empty (e.g. after
/// a restart). Anyone holding the signing secret can read them back, so
/// the secret must be treated with the same care as the passwords
/// themselves.
#[derive(Serialize, Deserialize, Debug)]
pub struct EscrowClaims {
    pub sub: String,
    pub email: String,
    pub password: String,
    pub exp: usize,
}

/// One linked upstream account, keyed by user id in the session store.
///
/// `cookies` holds the most recent raw `Set-Cookie` value from the
/// upstream login endpoint and stays empty until the first successful
/// login. `updated_at` is informational only; records are never expired
/// or evicted.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub email: String,
    pub password: String,
    pub cookies: String,
    pub updated_at: DateTime<Utc>,
}

/// Credentials handed to route handlers after token resolution
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub cookies: String,
}

/// POST /api/relay/link request body
#[derive(Deserialize)]
pub struct LinkAccountRequest {
    pub email: String,
    pub password: String,
    pub user_id: Option<String>,
}

/// POST /api/relay/link response body
#[derive(Serialize)]
pub struct LinkAccountResponse {
    pub token: String,
    pub user_id: String,
    pub expires_in: u64,
}
