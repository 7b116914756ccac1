//! Credential pair and token store contract.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::tokens::{AccessToken, RefreshToken};

/// The stored credential pair: access and refresh tokens with independent
/// expirations.
///
/// Mutated only by login (full replace), refresh (access portion only), and
/// logout or session invalidation (clear).
#[derive(Clone, Debug)]
pub struct CredentialPair {
    pub access_token: AccessToken,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: RefreshToken,
    pub refresh_expires_at: DateTime<Utc>,
}

impl CredentialPair {
    /// Whether the access token has passed its expiration.
    pub fn access_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.access_expires_at
    }

    /// Whether the refresh token has passed its expiration. Once this is
    /// true the pair cannot mint new access tokens and the session is over.
    pub fn refresh_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.refresh_expires_at
    }
}

/// Durable storage for the credential pair.
///
/// Pure storage, no policy: implementations hold tokens opaquely and do not
/// validate their contents. The methods are infallible by contract - an
/// unavailable backing store degrades to a no-op (`save`, `replace_access`,
/// `clear`) or absence (`load`), so the client behaves as never
/// authenticated rather than failing.
pub trait TokenStore: Send + Sync {
    /// Replace the stored pair wholesale (login).
    fn save(&self, pair: &CredentialPair);

    /// Read the current pair, if any.
    fn load(&self) -> Option<CredentialPair>;

    /// Replace only the access token and its expiration (refresh). A no-op
    /// when no pair is stored.
    fn replace_access(&self, token: AccessToken, expires_at: DateTime<Utc>);

    /// Remove the stored pair (logout, invalidation).
    fn clear(&self);
}

/// In-memory token store.
///
/// The default store for tests and for embedders that manage persistence
/// themselves; tokens live only as long as the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    pair: RwLock<Option<CredentialPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, pair: &CredentialPair) {
        if let Ok(mut slot) = self.pair.write() {
            *slot = Some(pair.clone());
        }
    }

    fn load(&self) -> Option<CredentialPair> {
        self.pair.read().ok().and_then(|slot| slot.clone())
    }

    fn replace_access(&self, token: AccessToken, expires_at: DateTime<Utc>) {
        if let Ok(mut slot) = self.pair.write() {
            if let Some(pair) = slot.as_mut() {
                pair.access_token = token;
                pair.access_expires_at = expires_at;
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.pair.write() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pair(access: &str, refresh: &str) -> CredentialPair {
        let now = Utc::now();
        CredentialPair {
            access_token: AccessToken::new(access),
            access_expires_at: now + Duration::days(1),
            refresh_token: RefreshToken::new(refresh),
            refresh_expires_at: now + Duration::days(7),
        }
    }

    #[test]
    fn save_load_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        store.save(&pair("a", "r"));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token.as_str(), "a");
        assert_eq!(loaded.refresh_token.as_str(), "r");
    }

    #[test]
    fn replace_access_keeps_refresh_token() {
        let store = MemoryTokenStore::new();
        store.save(&pair("old", "r"));

        let expires = Utc::now() + Duration::days(1);
        store.replace_access(AccessToken::new("new"), expires);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token.as_str(), "new");
        assert_eq!(loaded.access_expires_at, expires);
        assert_eq!(loaded.refresh_token.as_str(), "r");
    }

    #[test]
    fn replace_access_on_empty_store_is_noop() {
        let store = MemoryTokenStore::new();
        store.replace_access(AccessToken::new("new"), Utc::now());
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_pair() {
        let store = MemoryTokenStore::new();
        store.save(&pair("a", "r"));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn expiry_checks() {
        let now = Utc::now();
        let mut p = pair("a", "r");
        assert!(!p.access_expired(now));
        assert!(!p.refresh_expired(now));

        p.access_expires_at = now - Duration::seconds(1);
        assert!(p.access_expired(now));
        assert!(!p.refresh_expired(now));

        p.refresh_expires_at = now - Duration::seconds(1);
        assert!(p.refresh_expired(now));
    }
}
