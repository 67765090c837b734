//! In-memory session store for OAuth access tokens.
//!
//! Replaces a single process-wide token slot with per-session state keyed by
//! a server-issued UUID, so concurrent users cannot clobber each other's
//! tokens. Sessions expire after a configurable TTL and are dropped lazily
//! on lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session ID
pub const SESSION_COOKIE: &str = "fanscore_session";

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    created_at: Instant,
}

/// Shared store mapping session IDs to access tokens
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store an access token under a fresh session ID
    pub async fn issue(&self, access_token: String) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            access_token,
            created_at: Instant::now(),
        };
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Look up the access token for a session, removing it if expired
    pub async fn access_token(&self, id: Uuid) -> Option<String> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                Some(session) if session.created_at.elapsed() < self.ttl => {
                    return Some(session.access_token.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it
        self.sessions.write().await.remove(&id);
        None
    }

    /// Number of live sessions (expired entries may still be counted until
    /// their next lookup)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_lookup() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.issue("token-abc".to_string()).await;

        assert_eq!(store.access_token(id).await.as_deref(), Some("token-abc"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.access_token(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.issue("token-1".to_string()).await;
        let second = store.issue("token-2".to_string()).await;

        assert_ne!(first, second);
        assert_eq!(store.access_token(first).await.as_deref(), Some("token-1"));
        assert_eq!(store.access_token(second).await.as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = SessionStore::new(Duration::ZERO);
        let id = store.issue("token-abc".to_string()).await;

        assert!(store.access_token(id).await.is_none());
        assert_eq!(store.len().await, 0);
    }
}
