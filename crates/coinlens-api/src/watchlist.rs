//! Per-user watchlist endpoints. All of them require authentication.

use tracing::{debug, instrument};

use coinlens_core::{FormOutcome, Result};

use crate::client::{ApiRequest, form_outcome, json_body};
use crate::endpoints::{self, Coin, MessageResponse, Paged, WatchlistAddRequest};
use crate::executor::AuthExecutor;

/// Client for the current user's watchlist.
#[derive(Clone)]
pub struct WatchlistApi {
    executor: AuthExecutor,
}

impl WatchlistApi {
    pub fn new(executor: AuthExecutor) -> Self {
        Self { executor }
    }

    /// Fetch a page of watched coins with their market data.
    #[instrument(skip(self))]
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Paged<Coin>> {
        debug!("fetching watchlist");
        let request = ApiRequest::get(endpoints::WATCHLIST)
            .with_query_opt("page", page)
            .with_query_opt("limit", limit);
        self.executor.execute_json(request).await
    }

    /// Add a coin to the watchlist.
    ///
    /// Rejections (unknown coin, already watched) come back as
    /// [`FormOutcome::Rejected`].
    #[instrument(skip(self))]
    pub async fn add(&self, coin_id: u64) -> Result<FormOutcome<String>> {
        debug!("adding watchlist entry");
        let request = ApiRequest::post(
            endpoints::WATCHLIST,
            json_body(&WatchlistAddRequest { coin_id })?,
        );
        let outcome: FormOutcome<MessageResponse> =
            form_outcome(self.executor.execute_json(request).await)?;
        Ok(match outcome {
            FormOutcome::Accepted(response) => FormOutcome::Accepted(response.message),
            FormOutcome::Rejected(body) => FormOutcome::Rejected(body),
        })
    }

    /// Remove a coin from the watchlist.
    #[instrument(skip(self))]
    pub async fn remove(&self, coin_id: u64) -> Result<String> {
        debug!("removing watchlist entry");
        let request = ApiRequest::delete(endpoints::watchlist_coin_path(coin_id));
        let response: MessageResponse = self.executor.execute_json(request).await?;
        Ok(response.message)
    }
}
