//! Disk-backed token store.
//!
//! Persists the credential pair (and a cached copy of the signed-in
//! identity for fast display) in a JSON file under the platform data
//! directory. Storage failures degrade to "no stored session" rather than
//! erroring: the store contract is infallible, and a CLI that cannot write
//! its data directory still works signed out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use coinlens_core::{AccessToken, CredentialPair, RefreshToken, TokenStore, User};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    access_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    refresh_expires_at: Option<DateTime<Utc>>,
}

/// Token store backed by a `session.json` file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "coinlens").context("Could not determine data directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache the signed-in identity alongside the tokens.
    ///
    /// The cache is display-only; the identity endpoint remains the
    /// authority whenever it is reachable.
    pub fn cache_identity(&self, user: &User) {
        let mut session = self.read().unwrap_or_default();
        session.user = Some(user.clone());
        self.write(&session);
    }

    /// The cached identity, if any.
    pub fn cached_identity(&self) -> Option<User> {
        self.read().and_then(|session| session.user)
    }

    fn read(&self) -> Option<StoredSession> {
        if !self.path.exists() {
            return None;
        }

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "session file is not valid JSON");
                None
            }
        }
    }

    fn write(&self, session: &StoredSession) {
        let json = match serde_json::to_string_pretty(session) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize session");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, &json) {
            warn!(error = %err, path = %self.path.display(), "failed to write session file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            if let Err(err) = fs::set_permissions(&self.path, perms) {
                warn!(error = %err, "failed to restrict session file permissions");
            }
        }
    }

    fn remove(&self) {
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!(error = %err, path = %self.path.display(), "failed to remove session file");
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, pair: &CredentialPair) {
        let mut session = self.read().unwrap_or_default();
        session.access_token = Some(pair.access_token.as_str().to_string());
        session.access_expires_at = Some(pair.access_expires_at);
        session.refresh_token = Some(pair.refresh_token.as_str().to_string());
        session.refresh_expires_at = Some(pair.refresh_expires_at);
        self.write(&session);
    }

    fn load(&self) -> Option<CredentialPair> {
        let session = self.read()?;
        Some(CredentialPair {
            access_token: AccessToken::new(session.access_token?),
            access_expires_at: session.access_expires_at?,
            refresh_token: RefreshToken::new(session.refresh_token?),
            refresh_expires_at: session.refresh_expires_at?,
        })
    }

    fn replace_access(&self, token: AccessToken, expires_at: DateTime<Utc>) {
        let Some(mut session) = self.read() else {
            return;
        };
        if session.refresh_token.is_none() {
            return;
        }
        session.access_token = Some(token.as_str().to_string());
        session.access_expires_at = Some(expires_at);
        self.write(&session);
    }

    fn clear(&self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use coinlens_core::{Role, UserId};
    use tempfile::TempDir;

    fn store() -> (TempDir, FileTokenStore) {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::at_path(dir.path().join("session.json"));
        (dir, store)
    }

    fn pair() -> CredentialPair {
        let now = Utc::now();
        CredentialPair {
            access_token: AccessToken::new("access"),
            access_expires_at: now + Duration::days(1),
            refresh_token: RefreshToken::new("refresh"),
            refresh_expires_at: now + Duration::days(7),
        }
    }

    #[test]
    fn save_load_round_trip() {
        let (_dir, store) = store();
        assert!(store.load().is_none());

        store.save(&pair());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token.as_str(), "access");
        assert_eq!(loaded.refresh_token.as_str(), "refresh");
    }

    #[test]
    fn replace_access_keeps_refresh_and_identity() {
        let (_dir, store) = store();
        store.save(&pair());
        store.cache_identity(&User {
            id: UserId(1),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Member,
        });

        store.replace_access(AccessToken::new("rotated"), Utc::now() + Duration::days(1));

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token.as_str(), "rotated");
        assert_eq!(loaded.refresh_token.as_str(), "refresh");
        assert_eq!(store.cached_identity().unwrap().name, "Alice");
    }

    #[test]
    fn corrupt_file_degrades_to_absent() {
        let (_dir, store) = store();
        fs::write(&store.path, "not json {").unwrap();
        assert!(store.load().is_none());
        assert!(store.cached_identity().is_none());

        // And it is still usable for a fresh save.
        store.save(&pair());
        assert!(store.load().is_some());
    }

    #[test]
    fn clear_removes_file() {
        let (_dir, store) = store();
        store.save(&pair());
        store.clear();
        assert!(store.load().is_none());
        assert!(!store.path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        let (_dir, store) = store();
        store.save(&pair());
        let mode = fs::metadata(&store.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
