//! Client configuration.

use std::time::Duration;

use chrono::Duration as ChronoDuration;

use coinlens_core::ApiUrl;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the API client and session manager.
///
/// The token lifetimes mirror the server's issue policy: the server returns
/// bare tokens without expirations, so the client tracks them from issue
/// time using these TTLs (access one day, refresh seven days by default).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the API, including any path prefix.
    pub base_url: ApiUrl,
    /// Per-request timeout; an exceeded timeout surfaces as a transport
    /// error, never a hung call.
    pub timeout: Duration,
    /// Lifetime applied to newly issued access tokens.
    pub access_token_ttl: ChronoDuration,
    /// Lifetime applied to newly issued refresh tokens.
    pub refresh_token_ttl: ChronoDuration,
}

impl ClientConfig {
    /// Configuration with default timeout and token lifetimes.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            access_token_ttl: ChronoDuration::days(1),
            refresh_token_ttl: ChronoDuration::days(7),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the token lifetimes.
    pub fn with_token_ttls(mut self, access: ChronoDuration, refresh: ChronoDuration) -> Self {
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new(ApiUrl::new("https://api.coinlens.dev").unwrap());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.access_token_ttl, ChronoDuration::days(1));
        assert_eq!(config.refresh_token_ttl, ChronoDuration::days(7));
    }

    #[test]
    fn overrides() {
        let config = ClientConfig::new(ApiUrl::new("https://api.coinlens.dev").unwrap())
            .with_timeout(Duration::from_millis(250))
            .with_token_ttls(ChronoDuration::minutes(15), ChronoDuration::days(30));
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.access_token_ttl, ChronoDuration::minutes(15));
    }
}
