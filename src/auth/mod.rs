//! Authentication module
//!
//! The client itself only sends a token it is given. This module obtains one:
//! a resource-owner password grant against the Accela OAuth2 endpoint, plus
//! the refresh-token grant to renew it.
//!
//! ```rust,ignore
//! let grant = PasswordGrant::new(id, secret, "jdoe", "pw", "ISLANDTON", "TEST", "records");
//! let token = fetch_access_token(&grant).await?;
//! let client = AccelaClient::builder(token.access_token.clone())
//!     .agency("ISLANDTON")
//!     .environment("TEST")
//!     .build()?;
//! ```

mod exchange;
mod types;

pub use exchange::{fetch_access_token, TokenClient};
pub use types::{AccessToken, PasswordGrant, DEFAULT_TOKEN_URL};
