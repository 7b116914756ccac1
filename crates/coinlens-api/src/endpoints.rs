//! Endpoint paths and request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coinlens_core::User;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST: authenticate and obtain a credential pair.
pub const LOGIN: &str = "/auth/login";

/// POST: create a new account.
pub const REGISTER: &str = "/auth/register";

/// POST: mint a new access token (refresh token as bearer).
pub const REFRESH: &str = "/auth/refresh";

/// GET: the identity behind the presented access token.
pub const ME: &str = "/auth/me";

/// DELETE: revoke the presented access token.
pub const LOGOUT: &str = "/auth/logout";

/// GET: paginated market listings.
pub const LISTINGS: &str = "/";

/// GET: search listings by name, symbol or slug.
pub const SEARCH: &str = "/search";

/// GET: paginated published tips.
pub const TIPS: &str = "/tips";

/// GET: paginated tips including unpublished ones (admin).
pub const ADMIN_TIPS: &str = "/admin/tips";

/// POST: create a tip (admin).
pub const ADMIN_CREATE_TIP: &str = "/admin/create_tip";

/// GET: paginated watchlist entries for the current user.
pub const WATCHLIST: &str = "/user/watchlist";

/// Detail path for a single coin.
pub fn coin_path(id: u64) -> String {
    format!("/coin/{}", id)
}

/// Detail path for a single tip.
pub fn tip_path(id: u64) -> String {
    format!("/tips/{}", id)
}

/// PUT: edit a tip (admin).
pub fn admin_edit_tip_path(id: u64) -> String {
    format!("/admin/edit_tip/{}", id)
}

/// DELETE: remove a tip (admin).
pub fn admin_delete_tip_path(id: u64) -> String {
    format!("/admin/delete_tip/{}", id)
}

/// DELETE: remove a coin from the watchlist.
pub fn watchlist_coin_path(coin_id: u64) -> String {
    format!("/user/watchlist/{}", coin_id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Request body for account registration.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from the refresh endpoint.
/// Note: refresh takes no request body; the refresh token rides in the
/// Authorization header, and only a new access token comes back.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Response from the identity endpoint.
#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Generic message-only response body.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A market listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
}

/// Detail metadata for a single coin. The upstream data source attaches a
/// variable set of descriptive fields; the known ones are typed and the
/// rest are preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Market listing page: `{page, limit, total, data}`.
#[derive(Debug, Deserialize)]
pub struct CoinPage {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub data: Vec<Coin>,
}

/// Shared page envelope for tips and watchlist responses:
/// `{page, total_pages, total_items, limit, data}`.
#[derive(Debug, Deserialize)]
pub struct Paged<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub limit: u32,
    pub data: Vec<T>,
}

/// A news/tip entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request body for tip creation and edits.
#[derive(Debug, Clone, Serialize)]
pub struct TipDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'a str>,
}

/// Response from tip creation.
#[derive(Debug, Deserialize)]
pub struct TipCreated {
    pub message: String,
    /// Id of the created tip.
    pub tip: u64,
}

/// Request body for adding a watchlist entry.
#[derive(Debug, Serialize)]
pub struct WatchlistAddRequest {
    pub coin_id: u64,
}
