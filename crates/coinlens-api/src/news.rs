//! News/tips endpoints.
//!
//! Reading the published feed is public; the admin surface (drafting,
//! editing, removing, and listing unpublished tips) goes through the
//! authenticated executor and is role-gated server-side.

use tracing::{debug, instrument};

use coinlens_core::{FormOutcome, Result};

use crate::client::{ApiClient, ApiRequest, form_outcome, json_body};
use crate::endpoints::{self, MessageResponse, Paged, Tip, TipCreated, TipDraft};
use crate::executor::AuthExecutor;

/// Client for the public news feed.
#[derive(Debug, Clone)]
pub struct NewsApi {
    client: ApiClient,
}

impl NewsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a page of published tips.
    #[instrument(skip(self))]
    pub async fn tips(&self, page: Option<u32>, limit: Option<u32>) -> Result<Paged<Tip>> {
        debug!("fetching tips");
        let request = ApiRequest::get(endpoints::TIPS)
            .with_query_opt("page", page)
            .with_query_opt("limit", limit);
        self.client.request_json(&request, None).await
    }

    /// Fetch a single tip.
    #[instrument(skip(self))]
    pub async fn tip(&self, id: u64) -> Result<Tip> {
        debug!("fetching tip");
        let request = ApiRequest::get(endpoints::tip_path(id));
        self.client.request_json(&request, None).await
    }
}

/// Client for the admin content-management endpoints.
#[derive(Clone)]
pub struct AdminNewsApi {
    executor: AuthExecutor,
}

impl AdminNewsApi {
    pub fn new(executor: AuthExecutor) -> Self {
        Self { executor }
    }

    /// Fetch a page of tips including unpublished ones.
    #[instrument(skip(self))]
    pub async fn tips(&self, page: Option<u32>, limit: Option<u32>) -> Result<Paged<Tip>> {
        debug!("fetching admin tip listing");
        let request = ApiRequest::get(endpoints::ADMIN_TIPS)
            .with_query_opt("page", page)
            .with_query_opt("limit", limit);
        self.executor.execute_json(request).await
    }

    /// Create a tip.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_tip(&self, draft: &TipDraft<'_>) -> Result<FormOutcome<TipCreated>> {
        debug!("creating tip");
        let request = ApiRequest::post(endpoints::ADMIN_CREATE_TIP, json_body(draft)?);
        form_outcome(self.executor.execute_json(request).await)
    }

    /// Update an existing tip.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn edit_tip(&self, id: u64, draft: &TipDraft<'_>) -> Result<FormOutcome<String>> {
        debug!("editing tip");
        let request = ApiRequest::put(endpoints::admin_edit_tip_path(id), json_body(draft)?);
        let outcome: FormOutcome<MessageResponse> =
            form_outcome(self.executor.execute_json(request).await)?;
        Ok(match outcome {
            FormOutcome::Accepted(response) => FormOutcome::Accepted(response.message),
            FormOutcome::Rejected(body) => FormOutcome::Rejected(body),
        })
    }

    /// Remove a tip.
    #[instrument(skip(self))]
    pub async fn delete_tip(&self, id: u64) -> Result<String> {
        debug!("deleting tip");
        let request = ApiRequest::delete(endpoints::admin_delete_tip_path(id));
        let response: MessageResponse = self.executor.execute_json(request).await?;
        Ok(response.message)
    }
}
