//! Async client for the entity REST API of the reports backend.
//!
//! # Overview
//! Fetches a single `dart_report` record by id, or the whole collection,
//! and hands back the decoded JSON. Records are opaque `serde_json::Value`s
//! unless the caller asks for a typed decode.
//!
//! # Design
//! - `DartClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Transport` executes requests; `ReqwestTransport` is the default.
//! - `DartService` returns a [`Fetch`] per call. A `Fetch` is cold: no I/O
//!   until it is awaited or sent, and each send is a fresh request.
//! - No retry, caching or recovery. Every failure reaches the caller as an
//!   `ApiError`.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::DartClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetch::Fetch;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::DartService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Record, RecordId, DART_REPORT};
