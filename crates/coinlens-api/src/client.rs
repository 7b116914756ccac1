//! Low-level HTTP client.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use coinlens_core::error::{ApiFailure, ErrorBody, FormOutcome, InvalidInputError, TransportError};
use coinlens_core::{ApiUrl, Error, Result};

use crate::config::ClientConfig;

/// A request against the API, relative to the configured base URL.
///
/// Built by the typed endpoint modules and executed either directly (public
/// endpoints) or through the authenticated executor (protected endpoints).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter when present.
    pub fn with_query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }
}

/// HTTP client for API requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the configured API.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coinlens/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base: config.base_url.clone(),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Issue a request, optionally with a bearer credential attached.
    ///
    /// Returns the raw response; status handling is the caller's concern so
    /// the authenticated executor can observe a 401 before the body is read.
    #[instrument(skip(self, request, token), fields(base = %self.base, method = %request.method, path = %request.path))]
    pub async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<reqwest::Response> {
        let url = self.base.endpoint_url(&request.path);
        debug!(authenticated = token.is_some(), "API request");
        trace!(query = ?request.query, "query parameters");

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.headers(auth_headers(token));
        }

        builder.send().await.map_err(transport_error)
    }

    /// Issue a request and decode a JSON response, normalizing failures.
    pub async fn request_json<R>(&self, request: &ApiRequest, token: Option<&str>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request, token).await?;
        self.read_json(response).await
    }

    /// Issue a bodyless POST authenticated with the given bearer token.
    /// Used by the refresh endpoint, where the refresh token is the bearer.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn bearer_post<R>(&self, path: &str, token: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!("bearer-authenticated POST");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(transport_error)?;

        self.read_json(response).await
    }

    /// Decode a response body, or normalize the error payload.
    pub async fn read_json<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(Error::Api(read_failure(response).await))
        }
    }

    /// Check a response for success, discarding any body.
    pub async fn expect_success(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Api(read_failure(response).await))
        }
    }
}

/// Authorization headers for authenticated requests.
fn auth_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = format!("Bearer {}", token);
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth_value).expect("invalid token characters"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Normalize a non-success response into an [`ApiFailure`].
async fn read_failure(response: reqwest::Response) -> ApiFailure {
    let status = response.status().as_u16();

    let body = match response.json::<serde_json::Value>().await {
        Ok(value) => ErrorBody::from_json(&value),
        Err(_) => ErrorBody::Empty,
    };

    ApiFailure::new(status, body)
}

/// Map a reqwest error onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout { duration_ms: 0 }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Serialize a request body to JSON.
pub(crate) fn json_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|err| {
        Error::InvalidInput(InvalidInputError::Other {
            message: err.to_string(),
        })
    })
}

/// Fold a client-error response into a form rejection.
///
/// Server-side validation and auth rejections (4xx) are ordinary outcomes
/// the caller displays inline; everything else stays an error.
pub fn form_outcome<T>(result: Result<T>) -> Result<FormOutcome<T>> {
    match result {
        Ok(value) => Ok(FormOutcome::Accepted(value)),
        Err(Error::Api(failure)) if (400..500).contains(&failure.status) => {
            Ok(FormOutcome::Rejected(failure.body))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinlens_core::ErrorBody;

    #[test]
    fn client_creation() {
        let base = ApiUrl::new("https://api.coinlens.dev").unwrap();
        let config = ClientConfig::new(base.clone());
        let client = ApiClient::new(&config);
        assert_eq!(client.base().as_str(), base.as_str());
    }

    #[test]
    fn request_builder_accumulates_query() {
        let request = ApiRequest::get(crate::endpoints::TIPS)
            .with_query("page", 2)
            .with_query_opt("limit", Some(20))
            .with_query_opt("q", None::<&str>);
        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query[0], ("page".to_string(), "2".to_string()));
    }

    #[test]
    fn form_outcome_folds_client_errors() {
        let rejected: FormOutcome<()> = form_outcome(Err(Error::Api(ApiFailure::new(
            400,
            ErrorBody::Message("bad".to_string()),
        ))))
        .unwrap();
        assert!(matches!(rejected, FormOutcome::Rejected(_)));

        let server_error: Result<FormOutcome<()>> =
            form_outcome(Err(Error::Api(ApiFailure::new(500, ErrorBody::Empty))));
        assert!(server_error.is_err());
    }
}
