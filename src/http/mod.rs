//! HTTP transport module
//!
//! The transport is the only component that performs network I/O. Everything
//! above it builds an [`ApiRequest`] and receives an [`ApiResponse`].
//!
//! # Features
//!
//! - **Pluggable transport**: the [`Transport`] trait, with a reqwest-backed
//!   default
//! - **Typed failures**: non-2xx responses become `Error::HttpStatus` with the
//!   status, headers and a best-effort parsed body
//! - **No retries**: a failed request is reported once

mod client;
mod query;

pub use client::{
    ApiRequest, ApiResponse, HttpClientConfig, HttpClientConfigBuilder, ReqwestTransport,
    Transport,
};
pub use query::QueryParams;
