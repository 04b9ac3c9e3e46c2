//! HTTP client and response abstractions.
//!
//! The negotiation never talks to a concrete HTTP library. Callers supply an
//! [`HttpClient`] (a `reqwest` implementation is provided behind the
//! `http-client-reqwest-0_13` feature) and timeouts, proxies and TLS are
//! configured there. A request is the single I/O boundary of a negotiation
//! step.

mod get;
#[cfg(all(not(target_arch = "wasm32"), feature = "http-client-reqwest-0_13"))]
mod reqwest_0_13;

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};

use crate::platform::{MaybeSend, MaybeSendSync};

pub use get::GetError;
pub(crate) use get::get_json;

/// Defines the common interface for HTTP requests.
pub trait HttpClient: MaybeSendSync {
    /// The error type returned by the client for a failed request.
    type Error: crate::Error;

    /// The associated response type returned by this HTTP client.
    type Response: HttpResponse;

    /// Executes an HTTP request and returns an owned response.
    ///
    /// Dropping the returned future must abandon the request.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + MaybeSend;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    type Error = C::Error;
    type Response = C::Response;

    async fn execute(&self, request: Request<Bytes>) -> Result<Self::Response, Self::Error> {
        self.as_ref().execute(request).await
    }
}

/// Defines the common interface for HTTP responses.
pub trait HttpResponse: MaybeSendSync {
    /// The error type when getting the response body.
    type Error: crate::Error;

    /// Returns the HTTP status code of the response.
    fn status(&self) -> StatusCode;

    /// Returns the response's HTTP headers.
    fn headers(&self) -> HeaderMap;

    /// Consumes the response and returns its body.
    fn body(self) -> impl Future<Output = Result<Bytes, Self::Error>> + MaybeSend;
}
