//! Session record storage
//!
//! Stores are injectable so a shared backend (e.g. a distributed
//! key-value store) can replace the in-memory map in a multi-process
//! deployment. The in-memory store lives for the process lifetime and
//! never persists or evicts records.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::models::SessionRecord;

/// Key-value storage for session records, keyed by application user id.
///
/// At most one record exists per user id; `put` overwrites any prior
/// record for the same user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Option<SessionRecord>;
    async fn put(&self, user_id: &str, record: SessionRecord);
}

/// In-memory session store backing a single-process deployment
#[derive(Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: &str) -> Option<SessionRecord> {
        self.records.read().await.get(user_id).cloned()
    }

    async fn put(&self, user_id: &str, record: SessionRecord) {
        self.records.write().await.insert(user_id.to_string(), record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(email: &str, cookies: &str) -> SessionRecord {
        SessionRecord {
            email: email.to_string(),
            password: "secret".to_string(),
            cookies: cookies.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_returns_none_for_unknown_user() {
        let store = MemorySessionStore::new();
        assert!(store.get("u1").await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = MemorySessionStore::new();
        store.put("u1", record("a@x.com", "")).await;

        let stored = store.get("u1").await.expect("record should exist");
        assert_eq!(stored.email, "a@x.com");
        assert_eq!(stored.cookies, "");
    }

    #[tokio::test]
    async fn test_put_overwrites_prior_record() {
        let store = MemorySessionStore::new();
        store.put("u1", record("a@x.com", "sid=old")).await;
        store.put("u1", record("b@x.com", "sid=new")).await;

        let stored = store.get("u1").await.expect("record should exist");
        assert_eq!(stored.email, "b@x.com");
        assert_eq!(stored.cookies, "sid=new");
    }

    #[tokio::test]
    async fn test_records_are_keyed_per_user() {
        let store = MemorySessionStore::new();
        store.put("u1", record("a@x.com", "sid=1")).await;
        store.put("u2", record("b@x.com", "sid=2")).await;

        assert_eq!(store.get("u1").await.unwrap().cookies, "sid=1");
        assert_eq!(store.get("u2").await.unwrap().cookies, "sid=2");
    }
}
