//! Authentication: credential hashing, bearer tokens and the request gate.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id password digests
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token issuing and verification
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware gating every route but login
//!
//! # Security Properties
//!
//! - **Password digests**: Argon2id PHC strings with a fresh random salt per hash
//! - **Tokens**: stateless HS256 JWTs carrying `{id, iat, exp}`, valid for one hour
//! - **No server-side sessions**: validity is signature + expiry only
//!
//! # Usage
//!
//! ```ignore
//! use stockroom::auth::{jwt::TokenService, middleware::auth_gate};
//!
//! let tokens = Arc::new(TokenService::new(&secret, 3600));
//! let app = Router::new()
//!     .route("/api/v1/stores", get(list_stores))
//!     .layer(middleware::from_fn_with_state(tokens, auth_gate));
//! ```
//!
//! # Configuration
//!
//! Configure via `stockroom.toml`; the `SECRET` environment variable wins
//! over the file value:
//! ```toml
//! [auth]
//! secret_env = "SECRET"
//! token_ttl_secs = 3600
//! ```

/// Bearer token issuing and verification.
pub mod jwt;
/// Authentication gate for protected routes.
pub mod middleware;
/// Password hashing and verification.
pub mod password;
