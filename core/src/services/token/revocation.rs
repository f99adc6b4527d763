//! In-memory revocation registry.
//!
//! Maps a token's `jti` to the moment its revocation stops mattering, which
//! is always the token's own expiry. Entries past that point are dropped by
//! [`RevocationRegistry::sweep`] and on every `revoke`, so the map only ever
//! holds live revocations.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Concurrent set of revoked token ids
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `token_key` as revoked until `expires_at`.
    ///
    /// Revoking an already revoked key keeps the later expiry. A key whose
    /// expiry has already passed is not stored.
    pub async fn revoke(&self, token_key: &str, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, until| *until > now);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "Dropped expired revocations while revoking");
        }

        if expires_at <= now {
            return;
        }

        entries
            .entry(token_key.to_string())
            .and_modify(|until| *until = (*until).max(expires_at))
            .or_insert(expires_at);
    }

    /// True iff `token_key` has an entry that is still live at `now`
    pub async fn is_revoked(&self, token_key: &str, now: DateTime<Utc>) -> bool {
        let entries = self.entries.read().await;
        entries.get(token_key).is_some_and(|until| now < *until)
    }

    /// Removes every entry with `revoked_until <= now`, returning how many went
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, until| *until > now);
        before - entries.len()
    }

    /// Number of stored entries, live or not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
