//! RFC 9457 - Problem Details for HTTP APIs.
//!
//! Best-effort decoding of structured error bodies. A response that is not
//! `application/problem+json`, or that cannot be decoded, still produces a
//! [`ProblemDetails`] carrying the observed status, so callers always have
//! something to display. Nothing here is a hard failure path.

use std::fmt;

use http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{
    codec::{JsonCodec, SerdeJson},
    http::HttpResponse,
};

/// A normalized problem description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    /// A URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// A short summary of the problem type.
    pub title: Option<String>,
    /// An explanation specific to this occurrence.
    pub details: Option<String>,
    /// The HTTP status for this occurrence.
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// A URI reference identifying this occurrence.
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// The problem details media type.
    pub const MIME_TYPE: &'static str = "application/problem+json";

    /// The problem type used when none is given.
    pub const DEFAULT_TYPE: &'static str = "about:blank";

    /// A problem with only the status known.
    #[must_use]
    pub fn blank(status: StatusCode) -> Self {
        Self {
            problem_type: Self::DEFAULT_TYPE.to_string(),
            title: None,
            details: None,
            status,
            instance: None,
        }
    }

    /// Returns `true` if the problem type is the `about:blank` placeholder.
    #[must_use]
    pub fn is_blank_type(&self) -> bool {
        self.problem_type == Self::DEFAULT_TYPE
    }
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        match &self.title {
            Some(title) => write!(f, " {title}")?,
            None if !self.is_blank_type() => write!(f, " {}", self.problem_type)?,
            None => {}
        }
        if let Some(details) = &self.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

fn serialize_status<S: serde::Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Wire representation; only used for decoding.
#[derive(Debug, Deserialize)]
struct ProblemDetailsData {
    #[serde(rename = "type")]
    problem_type: Option<String>,
    title: Option<String>,
    #[serde(alias = "detail")]
    details: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_status")]
    status: Option<u16>,
    instance: Option<String>,
}

/// Reads `status` without failing the whole document on a bad value.
///
/// Negative, fractional, out-of-range and non-numeric values become `None`.
fn deserialize_lenient_status<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|s| u16::try_from(s).ok()))
}

/// Decodes problem details from error responses.
///
/// The decoder may be constructed without a codec, in which case every
/// response decodes to [`ProblemDetails::blank`].
#[derive(Debug, Clone, Copy)]
pub struct ProblemDetailsDecoder<J = SerdeJson> {
    codec: Option<J>,
}

impl Default for ProblemDetailsDecoder<SerdeJson> {
    fn default() -> Self {
        Self::new(SerdeJson)
    }
}

impl ProblemDetailsDecoder<SerdeJson> {
    /// A decoder with no JSON codec available.
    #[must_use]
    pub fn without_codec() -> Self {
        Self { codec: None }
    }
}

impl<J: JsonCodec> ProblemDetailsDecoder<J> {
    /// A decoder using `codec`.
    pub fn new(codec: J) -> Self {
        Self { codec: Some(codec) }
    }

    /// Decodes a problem description from a response's parts.
    pub fn decode(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]) -> ProblemDetails {
        let Some(codec) = &self.codec else {
            return ProblemDetails::blank(status);
        };

        if !is_problem_json(headers) {
            return ProblemDetails::blank(status);
        }

        match codec.decode::<ProblemDetailsData>(body) {
            Ok(data) => ProblemDetails {
                problem_type: data
                    .problem_type
                    .unwrap_or_else(|| ProblemDetails::DEFAULT_TYPE.to_string()),
                title: data.title,
                details: data.details,
                // Zero (or any other out-of-range value) means the field was absent or bogus.
                status: data
                    .status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(status),
                instance: data.instance,
            },
            Err(err) => {
                tracing::debug!(%status, error = %err, "Ignoring undecodable problem details body");
                ProblemDetails::blank(status)
            }
        }
    }

    /// Reads the body of `response` and decodes it.
    ///
    /// A failure to read the body yields [`ProblemDetails::blank`].
    pub async fn decode_response<R: HttpResponse>(&self, response: R) -> ProblemDetails {
        let status = response.status();
        let headers = response.headers();
        match response.body().await {
            Ok(body) => self.decode(status, &headers, &body),
            Err(err) => {
                tracing::debug!(%status, error = %err, "Failed to read problem details body");
                ProblemDetails::blank(status)
            }
        }
    }
}

fn is_problem_json(headers: &HeaderMap) -> bool {
    headers.get_all(CONTENT_TYPE).iter().any(|value| {
        value.to_str().is_ok_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|media_type| {
                    media_type.trim().eq_ignore_ascii_case(ProblemDetails::MIME_TYPE)
                })
        })
    })
}
