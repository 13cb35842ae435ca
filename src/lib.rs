// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # Accela Client
//!
//! A typed async client for the Accela Civic Platform REST API.
//!
//! ## Features
//!
//! - **Typed entities**: camelCase wire objects decoded into structs, with
//!   `Y`/`N` flags as `bool`, naive timestamps as [`Timestamp`] and the raw
//!   payload kept alongside
//! - **Lazy pagination**: [`ListResponse`] streams every page on demand
//! - **Tenant checks**: resources that need an agency or environment refuse
//!   to build without one
//! - **Token exchange**: password and refresh-token grants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use accela_client::{AccelaClient, RecordListParams, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AccelaClient::builder("access-token")
//!         .agency("ISLANDTON")
//!         .environment("TEST")
//!         .timezone(chrono_tz::America::Los_Angeles)
//!         .build()?;
//!
//!     let params = RecordListParams {
//!         module: Some("Building".to_string()),
//!         ..Default::default()
//!     };
//!     let records = client.records()?.list(&params).await?.collect_all().await?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  AccelaClient (auth context)                 │
//! │   records()  my_records()  record_activities()  ...          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────────┬────────────────────┐
//! │  Resources   │       Pagination         │     Transport      │
//! ├──────────────┼──────────────────────────┼────────────────────┤
//! │ Records      │ PageEnvelope             │ Transport trait    │
//! │ MyRecords    │ ListResponse<E>          │ ReqwestTransport   │
//! │ Activities   │ auto_paging_stream()     │ QueryParams        │
//! └──────────────┴──────────────────────────┴────────────────────┘
//!                               │
//! ┌──────────────────────────────────────────────────────────────┐
//! │       Entity / FieldMapping / coercion (pure decoding)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Wire value coercion
pub mod coerce;

/// Declarative field mapping
pub mod mapping;

/// Entity trait and decoding
pub mod entity;

/// HTTP transport
pub mod http;

/// Paged list responses
pub mod pagination;

/// Authenticated API client
pub mod client;

/// Resource catalog
pub mod resources;

/// OAuth2 token exchange
pub mod auth;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{AccelaClient, AccelaClientBuilder};
pub use coerce::Timestamp;
pub use config::ClientConfig;
pub use entity::Entity;
pub use error::{Error, Result};
pub use pagination::ListResponse;
pub use resources::{
    ApiResource, DateParam, ListOptions, MyRecordListParams, Record, RecordActivity,
    RecordListParams, RecordWorkflowTaskHistory, RetrieveOptions, SearchOptions,
};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
