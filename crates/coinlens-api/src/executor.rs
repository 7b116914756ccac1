//! Authenticated request execution with silent token refresh.

use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use coinlens_core::error::AuthError;
use coinlens_core::{AccessToken, Error, Result, TokenStore};

use crate::client::{ApiClient, ApiRequest};
use crate::config::ClientConfig;
use crate::endpoints::{self, RefreshResponse};

/// Where a request is in the attempt pipeline.
///
/// A request is retried at most once, and only after a refresh; the variant
/// carries that invariant instead of a resettable flag.
enum Attempt {
    First,
    Refreshed,
}

/// Executes requests against protected endpoints.
///
/// Attaches the stored access token as a bearer credential; on a 401 it
/// runs the refresh protocol once and retries the request once with the
/// rotated token. Refreshes are serialized: concurrent callers that hit a
/// 401 at the same time share one in-flight refresh rather than each
/// issuing their own.
///
/// When the refresh itself fails, the stored credential pair is cleared and
/// a session-invalidation signal is broadcast so the session manager can
/// drop to anonymous; the failing call gets [`AuthError::SessionExpired`].
///
/// Cheap to clone; clones share the store, the refresh lock, and the
/// invalidation channel.
#[derive(Clone)]
pub struct AuthExecutor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    refresh_lock: Mutex<()>,
    invalidations: watch::Sender<u64>,
    access_ttl: chrono::Duration,
}

impl AuthExecutor {
    /// Create an executor over the given client and token store.
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>, config: &ClientConfig) -> Self {
        let (invalidations, _) = watch::channel(0);
        Self {
            inner: Arc::new(ExecutorInner {
                client,
                store,
                refresh_lock: Mutex::new(()),
                invalidations,
                access_ttl: config.access_token_ttl,
            }),
        }
    }

    /// Subscribe to session-invalidation events. The value is a counter
    /// that increments on every forced invalidation.
    pub fn subscribe_invalidations(&self) -> watch::Receiver<u64> {
        self.inner.invalidations.subscribe()
    }

    /// Execute a request against a protected endpoint.
    ///
    /// With no stored credential the request goes out unauthenticated and
    /// the server's rejection is returned as-is.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let mut token = self.inner.store.load().map(|pair| pair.access_token);
        let mut attempt = Attempt::First;

        loop {
            let response = self
                .inner
                .client
                .send(&request, token.as_ref().map(AccessToken::as_str))
                .await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            match attempt {
                Attempt::Refreshed => {
                    warn!("request unauthorized after token refresh");
                    self.invalidate();
                    return Err(AuthError::SessionExpired.into());
                }
                Attempt::First => {
                    debug!("unauthorized response, attempting silent refresh");
                    match self.refreshed_access(token.as_ref()).await {
                        Ok(fresh) => {
                            token = Some(fresh);
                            attempt = Attempt::Refreshed;
                        }
                        Err(Error::Auth(AuthError::NotAuthenticated)) => {
                            return Err(AuthError::NotAuthenticated.into());
                        }
                        Err(err) => {
                            warn!(error = %err, "token refresh failed");
                            self.invalidate();
                            return Err(AuthError::SessionExpired.into());
                        }
                    }
                }
            }
        }
    }

    /// Execute a request and decode a JSON response.
    pub async fn execute_json<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let response = self.execute(request).await?;
        self.inner.client.read_json(response).await
    }

    /// Refresh the stored access token immediately, regardless of whether
    /// it has been rejected yet.
    pub async fn refresh_now(&self) -> Result<AccessToken> {
        let current = self
            .inner
            .store
            .load()
            .map(|pair| pair.access_token)
            .ok_or(Error::Auth(AuthError::NotAuthenticated))?;
        self.refreshed_access(Some(&current)).await
    }

    /// Obtain a usable access token after `failed` was rejected.
    ///
    /// Serialized on the refresh lock. A caller that acquires the lock
    /// after another caller already rotated the token reuses the stored
    /// token instead of issuing a redundant refresh, so N concurrent 401s
    /// produce exactly one refresh request.
    async fn refreshed_access(&self, failed: Option<&AccessToken>) -> Result<AccessToken> {
        let _guard = self.inner.refresh_lock.lock().await;

        let pair = self
            .inner
            .store
            .load()
            .ok_or(Error::Auth(AuthError::NotAuthenticated))?;

        match failed {
            // Still holding the rejected token: a refresh is actually due.
            Some(failed) if pair.access_token == *failed => {}
            // The stored token is newer than the one that failed (or the
            // request went out with none at all); reuse it.
            _ => return Ok(pair.access_token),
        }

        let now = Utc::now();
        if pair.refresh_expired(now) {
            debug!("refresh token expired locally, skipping refresh call");
            return Err(AuthError::SessionExpired.into());
        }

        info!("refreshing access token");
        let response: RefreshResponse = self
            .inner
            .client
            .bearer_post(endpoints::REFRESH, pair.refresh_token.as_str())
            .await
            .map_err(|err| match err {
                Error::Api(_) => Error::Auth(AuthError::RefreshRejected),
                other => other,
            })?;

        let fresh = AccessToken::new(response.access_token);
        self.inner
            .store
            .replace_access(fresh.clone(), now + self.inner.access_ttl);
        debug!("access token refreshed");
        Ok(fresh)
    }

    /// Clear the stored credentials and broadcast the invalidation.
    fn invalidate(&self) {
        self.inner.store.clear();
        self.inner.invalidations.send_modify(|count| *count += 1);
    }
}
