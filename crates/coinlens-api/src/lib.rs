//! coinlens-api - HTTP client for the coinlens market API.
//!
//! All traffic flows through two layers: [`ApiClient`] is a thin JSON client
//! over reqwest, and [`AuthExecutor`] wraps it for protected endpoints,
//! attaching the current access token and transparently refreshing it once
//! when the server rejects it. [`SessionManager`] owns the session state
//! machine on top of the executor.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use coinlens_api::{ApiClient, AuthExecutor, ClientConfig, SessionManager};
//! use coinlens_core::{ApiUrl, Credentials, MemoryTokenStore};
//!
//! # async fn example() -> Result<(), coinlens_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("https://api.coinlens.dev/api/v1")?);
//! let store = Arc::new(MemoryTokenStore::new());
//! let client = ApiClient::new(&config);
//! let executor = AuthExecutor::new(client.clone(), store.clone(), &config);
//! let session = SessionManager::new(client, executor, store, &config);
//!
//! session.bootstrap().await?;
//! session
//!     .login(Credentials::new("alice@example.com", "app-password"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod executor;
pub mod market;
pub mod news;
pub mod session;
pub mod watchlist;

pub use client::{ApiClient, ApiRequest};
pub use config::ClientConfig;
pub use executor::AuthExecutor;
pub use market::MarketApi;
pub use news::{AdminNewsApi, NewsApi};
pub use session::SessionManager;
pub use watchlist::WatchlistApi;
