//! coinlens-core - Core types and authorization logic for the coinlens client.
//!
//! This crate holds the pure, I/O-free half of the client: opaque bearer
//! token types, the credential store contract, the session snapshot consumed
//! by authorization decisions, the route gate, and the unified error type.
//! The HTTP half lives in `coinlens-api`.

pub mod credentials;
pub mod error;
pub mod route;
pub mod session;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::{ApiFailure, AuthError, Error, ErrorBody, FieldErrors, FormOutcome, TransportError};
pub use route::{RouteDecision, RouteRequirement, authorize};
pub use session::{Identity, SessionSnapshot};
pub use store::{CredentialPair, MemoryTokenStore, TokenStore};
pub use tokens::{AccessToken, RefreshToken};
pub use types::{ApiUrl, Role, User, UserId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
