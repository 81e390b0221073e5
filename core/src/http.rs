//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `DartClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. Executing the request is left to a
//! [`Transport`](crate::transport::Transport) or to the caller.

/// HTTP method for a request. The entity API is read-only, so only `GET`
/// is ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data. `path` holds the absolute URL.
///
/// The entity reads never set `headers` or `body`; transports still forward
/// them so any `HttpRequest` executes faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a transport after executing an `HttpRequest`, then handed to
/// `DartClient::parse_*` for decoding. `headers` are collected for callers
/// driving a transport directly; the parsers only read `status` and `body`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
