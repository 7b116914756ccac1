//! Market data endpoints.
//!
//! Listings, per-coin detail and search are public; no credential is
//! attached.

use tracing::{debug, instrument};

use coinlens_core::Result;

use crate::client::{ApiClient, ApiRequest};
use crate::endpoints::{self, CoinDetail, CoinPage};

/// Client for the public market-data endpoints.
#[derive(Debug, Clone)]
pub struct MarketApi {
    client: ApiClient,
}

impl MarketApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a page of market listings.
    #[instrument(skip(self))]
    pub async fn listings(&self, page: Option<u32>, limit: Option<u32>) -> Result<CoinPage> {
        debug!("fetching market listings");
        let request = ApiRequest::get(endpoints::LISTINGS)
            .with_query_opt("page", page)
            .with_query_opt("limit", limit);
        self.client.request_json(&request, None).await
    }

    /// Fetch detail metadata for a single coin.
    #[instrument(skip(self))]
    pub async fn coin(&self, id: u64) -> Result<CoinDetail> {
        debug!("fetching coin detail");
        let request = ApiRequest::get(endpoints::coin_path(id));
        self.client.request_json(&request, None).await
    }

    /// Search listings by name, symbol or slug.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<CoinPage> {
        debug!("searching listings");
        let request = ApiRequest::get(endpoints::SEARCH)
            .with_query("q", query)
            .with_query_opt("page", page)
            .with_query_opt("limit", limit);
        self.client.request_json(&request, None).await
    }
}
