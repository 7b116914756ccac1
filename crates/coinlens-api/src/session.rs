//! Session management.
//!
//! The session manager owns the authoritative notion of "current user". It
//! publishes complete [`SessionSnapshot`] values through a watch channel;
//! consumers (the route gate, views) only ever observe a finished
//! transition, never an intermediate one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use coinlens_core::error::ErrorBody;
use coinlens_core::{
    AccessToken, CredentialPair, Credentials, Error, FormOutcome, Identity, RefreshToken, Result,
    SessionSnapshot, TokenStore, User,
};

use crate::client::{ApiClient, ApiRequest, form_outcome, json_body};
use crate::config::ClientConfig;
use crate::endpoints::{self, LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest};
use crate::executor::AuthExecutor;

/// Owns the session state machine: bootstrap on start, login, logout, and
/// forced invalidation when the executor exhausts a refresh.
///
/// Overlapping operations are ordered by a generation counter: every
/// transition-producing call draws a generation when it starts, and a
/// completion whose generation is no longer current is discarded. A login
/// response that arrives after a later logout therefore cannot resurrect
/// the session.
///
/// Cheap to clone; clones share all state. Requires a tokio runtime (a
/// background task applies executor invalidations).
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: ApiClient,
    executor: AuthExecutor,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionSnapshot>,
    generation: AtomicU64,
    // Guards the generation check plus store mutation plus publication as
    // one transition.
    apply: StdMutex<()>,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl SessionManager {
    /// Create a session manager over the given executor and store.
    pub fn new(
        client: ApiClient,
        executor: AuthExecutor,
        store: Arc<dyn TokenStore>,
        config: &ClientConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::Uninitialized);
        let inner = Arc::new(SessionInner {
            client,
            executor,
            store,
            state,
            generation: AtomicU64::new(0),
            apply: StdMutex::new(()),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        });

        let mut invalidations = inner.executor.subscribe_invalidations();
        let weak = Arc::downgrade(&inner);
        tokio::spawn(async move {
            while invalidations.changed().await.is_ok() {
                let Some(inner) = weak.upgrade() else { break };
                inner.force_anonymous("refresh exhausted");
            }
        });

        Self { inner }
    }

    /// Subscribe to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// The current session snapshot.
    pub fn current(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Resolve the session from any stored credential.
    ///
    /// With no stored credential this resolves to anonymous without a
    /// network call. Otherwise the identity endpoint decides: an
    /// authorization failure (after the executor's one silent refresh)
    /// clears the credential, while a transport failure resolves to
    /// anonymous but keeps the credential so a later bootstrap can recover.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<SessionSnapshot> {
        let inner = &self.inner;
        let generation = inner.begin();
        inner.commit(generation, SessionSnapshot::Loading, || {});

        let snapshot = match inner.store.load() {
            None => {
                debug!("no stored credential, starting signed out");
                SessionSnapshot::Ready(Identity::Anonymous)
            }
            Some(_) => match self.fetch_identity().await {
                Ok(user) => {
                    info!(user = %user.id, "session restored");
                    SessionSnapshot::Ready(Identity::User(user))
                }
                Err(Error::Auth(err)) => {
                    debug!(error = %err, "stored credential rejected");
                    inner.store.clear();
                    SessionSnapshot::Ready(Identity::Anonymous)
                }
                Err(Error::Api(failure)) if failure.is_unauthorized() => {
                    inner.store.clear();
                    SessionSnapshot::Ready(Identity::Anonymous)
                }
                Err(err) => {
                    // Fail safe to signed-out rather than blocking the app;
                    // the credential stays for the next attempt.
                    warn!(error = %err, "identity check failed, continuing signed out");
                    SessionSnapshot::Ready(Identity::Anonymous)
                }
            },
        };

        if inner.commit(generation, snapshot.clone(), || {}) {
            Ok(snapshot)
        } else {
            Ok(self.current())
        }
    }

    /// Authenticate with the given credentials.
    ///
    /// Locally-missing fields and server-side rejections come back as
    /// [`FormOutcome::Rejected`] with field errors for inline display; the
    /// session state is untouched in both cases.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: Credentials) -> Result<FormOutcome<User>> {
        if let Err(fields) = credentials.validate() {
            return Ok(FormOutcome::Rejected(ErrorBody::Validation(fields)));
        }

        let inner = &self.inner;
        let generation = inner.begin();
        info!("logging in");

        let request = ApiRequest::post(
            endpoints::LOGIN,
            json_body(&LoginRequest {
                email: credentials.email(),
                password: credentials.password(),
            })?,
        );

        match form_outcome(inner.client.request_json::<LoginResponse>(&request, None).await)? {
            FormOutcome::Accepted(response) => {
                let now = Utc::now();
                let pair = CredentialPair {
                    access_token: AccessToken::new(response.access_token),
                    access_expires_at: now + inner.access_ttl,
                    refresh_token: RefreshToken::new(response.refresh_token),
                    refresh_expires_at: now + inner.refresh_ttl,
                };
                let user = response.user;

                let applied = inner.commit(
                    generation,
                    SessionSnapshot::Ready(Identity::User(user.clone())),
                    || inner.store.save(&pair),
                );
                if applied {
                    info!(user = %user.id, role = %user.role, "logged in");
                } else {
                    debug!("login completed after a newer transition, result discarded");
                }
                Ok(FormOutcome::Accepted(user))
            }
            FormOutcome::Rejected(body) => {
                debug!("login rejected by server");
                Ok(FormOutcome::Rejected(body))
            }
        }
    }

    /// Sign out.
    ///
    /// The server-side revocation is best effort: a failure is logged and
    /// the local session is cleared regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let inner = &self.inner;
        let generation = inner.begin();

        if let Some(pair) = inner.store.load() {
            let request = ApiRequest::delete(endpoints::LOGOUT);
            match inner.client.send(&request, Some(pair.access_token.as_str())).await {
                Ok(response) if response.status().is_success() => {
                    debug!("logout acknowledged by server");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "logout rejected by server");
                }
                Err(err) => {
                    warn!(error = %err, "logout request failed");
                }
            }
        }

        inner.commit(generation, SessionSnapshot::Ready(Identity::Anonymous), || {
            inner.store.clear();
        });
        info!("logged out");
        Ok(())
    }

    /// Create a new account. Does not sign the new user in.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<FormOutcome<String>> {
        let request = ApiRequest::post(
            endpoints::REGISTER,
            json_body(&RegisterRequest { name, email, password })?,
        );

        let outcome = form_outcome(
            self.inner
                .client
                .request_json::<MessageResponse>(&request, None)
                .await,
        )?;
        Ok(match outcome {
            FormOutcome::Accepted(response) => FormOutcome::Accepted(response.message),
            FormOutcome::Rejected(body) => FormOutcome::Rejected(body),
        })
    }

    async fn fetch_identity(&self) -> Result<User> {
        let response: MeResponse = self
            .inner
            .executor
            .execute_json(ApiRequest::get(endpoints::ME))
            .await?;
        Ok(response.user)
    }
}

impl SessionInner {
    /// Start a transition-producing operation.
    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a transition unless a newer operation has started since.
    /// Returns whether the transition was applied.
    fn commit(&self, generation: u64, snapshot: SessionSnapshot, effect: impl FnOnce()) -> bool {
        let _guard = self.apply.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        effect();
        self.state.send_replace(snapshot);
        true
    }

    /// Drop to anonymous from any state, superseding in-flight operations.
    fn force_anonymous(&self, reason: &str) {
        let _guard = self.apply.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store.clear();
        self.state.send_replace(SessionSnapshot::Ready(Identity::Anonymous));
        info!(reason, "session invalidated");
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}
