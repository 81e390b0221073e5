//! Lazily started, re-runnable fetches.
//!
//! A `Fetch` describes one read against the backend but performs no I/O
//! until it is sent or awaited. Each `send` issues a fresh request: nothing
//! is cached or shared between sends, and concurrent sends are independent.

use std::future::{Future, IntoFuture};
use std::pin::Pin;

use tracing::debug;

use crate::client::DartClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

type Parser<R> = fn(&DartClient, HttpResponse) -> Result<R, ApiError>;

/// A cold request producing a single `R`.
///
/// Await it once with `.await`, or call [`Fetch::send`] as often as needed;
/// every call is a separate round-trip. Dropping an in-flight send aborts
/// the request.
#[must_use = "a Fetch does nothing until it is sent or awaited"]
pub struct Fetch<'a, T, R> {
    client: &'a DartClient,
    transport: &'a T,
    request: HttpRequest,
    parse: Parser<R>,
}

impl<'a, T, R> Fetch<'a, T, R> {
    pub(crate) fn new(
        client: &'a DartClient,
        transport: &'a T,
        request: HttpRequest,
        parse: Parser<R>,
    ) -> Self {
        Self {
            client,
            transport,
            request,
            parse,
        }
    }

    /// The request every send will issue.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

impl<T: Transport + Sync, R> Fetch<'_, T, R> {
    pub async fn send(&self) -> Result<R, ApiError> {
        let response = self.transport.execute(self.request.clone()).await;
        let result = response.and_then(|response| (self.parse)(self.client, response));
        if let Err(err) = &result {
            debug!(url = %self.request.path, error = %err, "fetch failed");
        }
        result
    }
}

impl<'a, T, R> IntoFuture for Fetch<'a, T, R>
where
    T: Transport + Sync,
    R: Send + 'a,
{
    type Output = Result<R, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<R, ApiError>> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.send().await })
    }
}
