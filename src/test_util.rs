//! A scripted in-memory [`HttpClient`] for unit tests.

use std::{collections::VecDeque, sync::Mutex};

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Request, StatusCode, Uri, header::CONTENT_TYPE};
use snafu::Snafu;

use crate::http::{HttpClient, HttpResponse};

#[derive(Debug, Snafu)]
pub(crate) enum MockError {
    #[snafu(display("no scripted response left"))]
    NoResponse,
    #[snafu(display("connection refused"))]
    ConnectionRefused,
}

impl crate::Error for MockError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionRefused)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl MockResponse {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    pub(crate) fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self
    }
}

impl HttpResponse for MockResponse {
    type Error = MockError;

    fn status(&self) -> StatusCode {
        self.status
    }

    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }

    async fn body(self) -> Result<Bytes, Self::Error> {
        Ok(self.body)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

#[derive(Debug, Default)]
pub(crate) struct MockHttpClient {
    script: Mutex<VecDeque<Result<MockResponse, MockError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    pub(crate) fn new(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        Self::scripted(responses.into_iter().map(Ok))
    }

    pub(crate) fn scripted(
        script: impl IntoIterator<Item = Result<MockResponse, MockError>>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;
    type Response = MockResponse;

    async fn execute(&self, request: Request<Bytes>) -> Result<Self::Response, Self::Error> {
        let (parts, body) = request.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        });

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(MockError::NoResponse))
    }
}
