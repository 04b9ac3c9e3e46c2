use bytes::Bytes;
use http::{HeaderValue, StatusCode, Uri, header::ACCEPT};
use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::{
    codec::JsonCodec,
    http::{HttpClient, HttpResponse},
    problem_details::{ProblemDetails, ProblemDetailsDecoder},
};

/// Errors from fetching a JSON document.
#[derive(Debug, Snafu)]
pub enum GetError<
    HttpReqErr: crate::Error + 'static,
    HttpRespErr: crate::Error + 'static,
    DecodeErr: crate::Error + 'static,
> {
    /// The request could not be sent.
    #[snafu(display("Failed to make HTTP request"))]
    Request {
        /// The underlying transport error.
        source: HttpReqErr,
    },
    /// The response body could not be read.
    #[snafu(display("Failed to read response body"))]
    Response {
        /// The underlying transport error.
        source: HttpRespErr,
    },
    /// A 200 response could not be decoded.
    #[snafu(display("Failed to decode response body"))]
    Deserialize {
        /// The underlying codec error.
        source: DecodeErr,
    },
    /// The server answered with something other than 200.
    #[snafu(display("Unexpected response status {status}: {problem}"))]
    BadStatus {
        /// The observed status.
        status: StatusCode,
        /// Problem details decoded from the body, or a blank description.
        problem: ProblemDetails,
    },
}

/// Issues a GET with `Accept: application/json` and decodes a 200 body.
///
/// Any other status is an error. The body of a failed response is decoded as
/// problem details on a best-effort basis.
pub(crate) async fn get_json<C: HttpClient, J: JsonCodec, T: DeserializeOwned>(
    http_client: &C,
    codec: &J,
    uri: Uri,
) -> Result<T, GetError<C::Error, <C::Response as HttpResponse>::Error, J::Error>> {
    let (mut parts, ()) = http::Request::new(()).into_parts();
    parts.uri = uri;
    parts
        .headers
        .insert(ACCEPT, HeaderValue::from_static("application/json"));
    let request = http::Request::from_parts(parts, Bytes::new());

    let response = http_client.execute(request).await.context(RequestSnafu)?;
    let status = response.status();
    let headers = response.headers();
    let body = response.body().await.context(ResponseSnafu)?;

    if status == StatusCode::OK {
        codec.decode(&body).context(DeserializeSnafu)
    } else {
        let problem = ProblemDetailsDecoder::new(codec).decode(status, &headers, &body);
        BadStatusSnafu { status, problem }.fail()
    }
}

impl<HttpReqErr: crate::Error, HttpRespErr: crate::Error, DecodeErr: crate::Error> crate::Error
    for GetError<HttpReqErr, HttpRespErr, DecodeErr>
{
    fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source } => source.is_retryable(),
            Self::Response { source } => source.is_retryable(),
            Self::Deserialize { .. } => false,
            Self::BadStatus { status, .. } => status.is_server_error(),
        }
    }
}
