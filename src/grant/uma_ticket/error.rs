use std::fmt;

use http::StatusCode;
use snafu::Snafu;

/// Why a negotiation ended in denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialCause {
    /// The server answered `request_denied`.
    NotAuthorized,
    /// The server answered `need_info` without a usable ticket.
    MalformedChallenge,
    /// The claim supplier returned no claim token.
    ClaimsUnavailable,
}

impl fmt::Display for DenialCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotAuthorized => "The client is not authorized for the requested permissions",
            Self::MalformedChallenge => "Invalid need_info error response",
            Self::ClaimsUnavailable => "The client is unable to negotiate an access token",
        })
    }
}

/// The terminal state a failed negotiation ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request was denied.
    Denied(DenialCause),
    /// The server answered `invalid_grant`.
    InvalidGrant,
    /// The server answered `invalid_scope`.
    InvalidScope,
    /// Claims gathering hit the configured maximum number of rounds.
    Exhausted,
    /// Sending the request or reading a successful answer failed.
    Transport,
    /// The server answered with an error the grant does not define, or one that could not be decoded.
    Unexpected,
}

/// Errors that end a token negotiation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum NegotiationError<
    HttpReqErr: crate::Error + 'static,
    HttpRespErr: crate::Error + 'static,
    DecodeErr: crate::Error + 'static,
> {
    /// The configured number of claims-gathering rounds was used up.
    #[snafu(display("Claim gathering stages exceeded configured maximum of {max_iterations}"))]
    Exhausted {
        /// The configured maximum.
        max_iterations: u32,
    },
    /// The request was denied.
    #[snafu(display("{cause}"))]
    RequestDenied {
        /// Why.
        cause: DenialCause,
        /// The status of the response that led to the denial.
        status: StatusCode,
        /// The server's `error_description`, if any.
        description: Option<String>,
    },
    /// The server answered `invalid_grant`.
    #[snafu(display("Invalid grant provided"))]
    InvalidGrant {
        /// The response status.
        status: StatusCode,
        /// The server's `error_description`, if any.
        description: Option<String>,
    },
    /// The server answered `invalid_scope`.
    #[snafu(display("Invalid scope provided"))]
    InvalidScope {
        /// The response status.
        status: StatusCode,
        /// The server's `error_description`, if any.
        description: Option<String>,
    },
    /// The server answered with an error code the grant does not define, or none.
    #[snafu(display("Unexpected error response while performing token negotiation: {status}"))]
    UnexpectedResponse {
        /// The response status.
        status: StatusCode,
        /// The error code, if one was present.
        error: Option<String>,
    },
    /// An error response could not be decoded.
    #[snafu(display("Unexpected error response body while performing token negotiation: {status}"))]
    UnparseableErrorResponse {
        /// The response status.
        status: StatusCode,
        /// The start of the response body, truncated to [`MAX_ERROR_BODY_EXCERPT`](super::MAX_ERROR_BODY_EXCERPT) bytes.
        body: String,
        /// The underlying codec error.
        source: DecodeErr,
    },
    /// A 200 response could not be decoded as a token response.
    #[snafu(display("Failed to decode the token response"))]
    UnparseableSuccessResponse {
        /// The underlying codec error.
        source: DecodeErr,
    },
    /// The token request could not be form encoded.
    #[snafu(display("Failed to encode the token request"))]
    SerializeForm {
        /// The underlying error.
        source: serde_html_form::ser::Error,
    },
    /// An error occurred when making the HTTP request.
    #[snafu(display("Failed to make HTTP request"))]
    Request {
        /// The underlying transport error.
        source: HttpReqErr,
    },
    /// An error occurred when reading the response body.
    #[snafu(display("Failed to read response body"))]
    ResponseBodyRead {
        /// The underlying transport error.
        source: HttpRespErr,
    },
    /// The runtime backing a blocking call could not be started.
    #[snafu(display("Failed to start a runtime for a blocking call"))]
    Runtime {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl<HttpReqErr: crate::Error, HttpRespErr: crate::Error, DecodeErr: crate::Error>
    NegotiationError<HttpReqErr, HttpRespErr, DecodeErr>
{
    /// The terminal state this error represents.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Exhausted { .. } => FailureKind::Exhausted,
            Self::RequestDenied { cause, .. } => FailureKind::Denied(*cause),
            Self::InvalidGrant { .. } => FailureKind::InvalidGrant,
            Self::InvalidScope { .. } => FailureKind::InvalidScope,
            Self::UnexpectedResponse { .. } | Self::UnparseableErrorResponse { .. } => {
                FailureKind::Unexpected
            }
            Self::UnparseableSuccessResponse { .. }
            | Self::SerializeForm { .. }
            | Self::Request { .. }
            | Self::ResponseBodyRead { .. }
            | Self::Runtime { .. } => FailureKind::Transport,
        }
    }

    /// The HTTP status of the response that ended the negotiation, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestDenied { status, .. }
            | Self::InvalidGrant { status, .. }
            | Self::InvalidScope { status, .. }
            | Self::UnexpectedResponse { status, .. }
            | Self::UnparseableErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl<HttpReqErr: crate::Error, HttpRespErr: crate::Error, DecodeErr: crate::Error> crate::Error
    for NegotiationError<HttpReqErr, HttpRespErr, DecodeErr>
{
    fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source } => source.is_retryable(),
            Self::ResponseBodyRead { source } => source.is_retryable(),
            Self::UnparseableErrorResponse { status, .. } => status.is_server_error(),
            Self::Exhausted { .. }
            | Self::RequestDenied { .. }
            | Self::InvalidGrant { .. }
            | Self::InvalidScope { .. }
            | Self::UnexpectedResponse { .. }
            | Self::UnparseableSuccessResponse { .. }
            | Self::SerializeForm { .. }
            | Self::Runtime { .. } => false,
        }
    }
}
