//! Tests for relay module
//!
//! These tests verify the credential relay contract:
//! - issue/resolve round-trips
//! - cookie refresh visibility through still-valid tokens
//! - absence semantics for expired, tampered and unknown tokens
//! - no-op refresh for users that never linked

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::relay::models::EscrowClaims;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use std::sync::Arc;

    const SECRET: &str = "test_secret_key";

    fn relay_with_store() -> (Arc<MemorySessionStore>, SessionRelay) {
        let store = Arc::new(MemorySessionStore::new());
        let relay = SessionRelay::new(store.clone(), SECRET.to_string());
        (store, relay)
    }

    fn expired_token(user_id: &str, email: &str, password: &str) -> String {
        let claims = EscrowClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            exp: (chrono::Utc::now().timestamp() - 7200) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    #[tokio::test]
    async fn test_issue_then_resolve_round_trips() {
        let (_, relay) = relay_with_store();

        let token = relay
            .issue_token("a@x.com", "p1", "u1", None)
            .await
            .expect("Failed to issue token");

        let creds = relay
            .resolve_credentials(&token)
            .await
            .expect("Token should resolve");

        assert_eq!(creds.user_id, "u1");
        assert_eq!(creds.email, "a@x.com");
        assert_eq!(creds.password, "p1");
        assert_eq!(creds.cookies, "");
    }

    #[tokio::test]
    async fn test_refresh_is_visible_through_valid_token() {
        let (_, relay) = relay_with_store();

        let token = relay
            .issue_token("a@x.com", "p1", "u1", None)
            .await
            .expect("Failed to issue token");

        let creds = relay.resolve_credentials(&token).await.unwrap();
        assert_eq!(creds.cookies, "");

        relay.refresh_cookies("u1", "sid=123").await;

        let creds = relay.resolve_credentials(&token).await.unwrap();
        assert_eq!(creds.email, "a@x.com");
        assert_eq!(creds.password, "p1");
        assert_eq!(creds.cookies, "sid=123");
    }

    #[tokio::test]
    async fn test_refresh_overwrites_cookie_captured_at_link_time() {
        let (_, relay) = relay_with_store();

        let token = relay
            .issue_token("a@x.com", "p1", "u1", Some("sid=first".to_string()))
            .await
            .unwrap();

        assert_eq!(relay.resolve_credentials(&token).await.unwrap().cookies, "sid=first");

        relay.refresh_cookies("u1", "sid=second").await;

        assert_eq!(relay.resolve_credentials(&token).await.unwrap().cookies, "sid=second");
    }

    #[tokio::test]
    async fn test_expired_token_resolves_to_absence() {
        let (_, relay) = relay_with_store();

        // A fresh record exists for the user, but an expired token must
        // never surface it
        relay.issue_token("a@x.com", "p1", "u1", None).await.unwrap();
        relay.refresh_cookies("u1", "sid=stale").await;

        let token = expired_token("u1", "a@x.com", "p1");
        assert!(relay.resolve_credentials(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_tampered_token_resolves_to_absence() {
        let (_, relay) = relay_with_store();
        relay.issue_token("a@x.com", "p1", "u1", None).await.unwrap();

        let claims = EscrowClaims {
            sub: "u1".to_string(),
            email: "a@x.com".to_string(),
            password: "p1".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"wrong_secret_key"),
        )
        .unwrap();

        assert!(relay.resolve_credentials(&forged).await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_without_link_is_a_noop() {
        let (store, relay) = relay_with_store();

        relay.refresh_cookies("u-ghost", "sid=zzz").await;
        assert!(store.get("u-ghost").await.is_none());

        // A later link for the same user starts from an empty cookie value
        let token = relay
            .issue_token("a@x.com", "p1", "u-ghost", None)
            .await
            .unwrap();
        let creds = relay.resolve_credentials(&token).await.unwrap();
        assert_eq!(creds.cookies, "");
    }

    #[tokio::test]
    async fn test_token_falls_back_to_escrow_when_store_is_empty() {
        let (_, relay) = relay_with_store();
        let token = relay
            .issue_token("a@x.com", "p1", "u1", Some("sid=abc".to_string()))
            .await
            .unwrap();

        // Same signing secret, fresh store: simulates a process restart
        let relay_after_restart =
            SessionRelay::new(Arc::new(MemorySessionStore::new()), SECRET.to_string());

        let creds = relay_after_restart
            .resolve_credentials(&token)
            .await
            .expect("Token should still resolve from escrow claims");
        assert_eq!(creds.email, "a@x.com");
        assert_eq!(creds.password, "p1");
        assert_eq!(creds.cookies, "");
    }

    #[tokio::test]
    async fn test_relink_overwrites_prior_record() {
        let (store, relay) = relay_with_store();

        relay
            .issue_token("a@x.com", "p1", "u1", Some("sid=old".to_string()))
            .await
            .unwrap();
        relay.issue_token("b@x.com", "p2", "u1", None).await.unwrap();

        let record = store.get("u1").await.unwrap();
        assert_eq!(record.email, "b@x.com");
        assert_eq!(record.password, "p2");
        assert_eq!(record.cookies, "");
    }

    #[tokio::test]
    async fn test_garbage_token_resolves_to_absence() {
        let (_, relay) = relay_with_store();
        assert!(relay.resolve_credentials("not-a-token").await.is_none());
        assert!(relay.resolve_credentials("").await.is_none());
    }
}
