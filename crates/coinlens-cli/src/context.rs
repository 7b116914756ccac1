//! Shared command context: the configured client stack.

use std::sync::Arc;

use anyhow::{Context, Result};

use coinlens_api::{
    AdminNewsApi, ApiClient, AuthExecutor, ClientConfig, MarketApi, NewsApi, SessionManager,
    WatchlistApi,
};
use coinlens_core::ApiUrl;

use crate::session::storage::FileTokenStore;

/// The assembled client stack every command runs against.
pub struct AppContext {
    pub client: ApiClient,
    pub executor: AuthExecutor,
    pub session: SessionManager,
    pub store: Arc<FileTokenStore>,
}

impl AppContext {
    pub fn new(api: &str) -> Result<Self> {
        let base_url = ApiUrl::new(api).context("Invalid API URL")?;
        let config = ClientConfig::new(base_url);

        let store = Arc::new(FileTokenStore::open_default()?);
        let client = ApiClient::new(&config);
        let executor = AuthExecutor::new(client.clone(), store.clone(), &config);
        let session = SessionManager::new(client.clone(), executor.clone(), store.clone(), &config);

        Ok(Self {
            client,
            executor,
            session,
            store,
        })
    }

    pub fn market(&self) -> MarketApi {
        MarketApi::new(self.client.clone())
    }

    pub fn news(&self) -> NewsApi {
        NewsApi::new(self.client.clone())
    }

    pub fn admin(&self) -> AdminNewsApi {
        AdminNewsApi::new(self.executor.clone())
    }

    pub fn watchlist(&self) -> WatchlistApi {
        WatchlistApi::new(self.executor.clone())
    }
}
