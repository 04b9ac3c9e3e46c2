use bon::Builder;
use http::StatusCode;
use snafu::prelude::*;

use crate::{
    EndpointUrl,
    codec::{JsonCodec, SerdeJson},
    grant::{
        core::TokenResponse,
        uma_ticket::{
            ClaimSupplier, DenialCause, ErrorOutcome, ErrorResponse, NeedInfo, TokenRequest,
            error::{
                ExhaustedSnafu, InvalidGrantSnafu, InvalidScopeSnafu, NegotiationError,
                RequestDeniedSnafu, RequestSnafu, ResponseBodyReadSnafu, SerializeFormSnafu,
                UnexpectedResponseSnafu, UnparseableErrorResponseSnafu,
                UnparseableSuccessResponseSnafu,
            },
        },
    },
    http::{HttpClient, HttpResponse},
    metadata::{Metadata, MetadataError},
};

/// The number of token requests a negotiation may make when none is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// How much of an undecodable error body is kept in the error.
pub const MAX_ERROR_BODY_EXCERPT: usize = 1024;

/// Negotiation error for a given transport and codec.
pub type NegotiationErrorFor<C, J> = NegotiationError<
    <C as HttpClient>::Error,
    <<C as HttpClient>::Response as HttpResponse>::Error,
    <J as JsonCodec>::Error,
>;

type MetadataErrorFor<C, J> = MetadataError<
    <C as HttpClient>::Error,
    <<C as HttpClient>::Response as HttpResponse>::Error,
    <J as JsonCodec>::Error,
>;

/// A client for the UMA 2.0 grant.
///
/// The client holds configuration only. The transport is passed to each call,
/// so one client can serve any number of concurrent negotiations.
///
/// ```no_run
/// # async fn run(http_client: reqwest::Client) -> Result<(), Box<dyn std::error::Error>> {
/// use uma_grant::{grant::{ClaimToken, TokenRequest, UmaClient}, prelude::*};
///
/// let client = UmaClient::builder().max_iterations(3).codec(uma_grant::codec::SerdeJson).build();
/// let metadata = client
///     .metadata(&http_client, &"https://as.example".into_endpoint_url()?)
///     .await?;
///
/// let request = TokenRequest::builder().ticket("016f84e8").scopes(["read"]).build();
/// let id_token = ClaimToken::id_token("eyJhbGciOi...");
/// let token = client
///     .negotiate(&http_client, &metadata.token_endpoint, request, &id_token)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Builder)]
pub struct UmaClient<J: JsonCodec = SerdeJson> {
    /// The maximum number of token requests in one negotiation.
    ///
    /// The first request counts, so `n` allows `n - 1` claims-gathering rounds.
    #[builder(default = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// The codec used for every JSON body.
    codec: J,
}

impl UmaClient<SerdeJson> {
    /// A client using `serde_json` and the default iteration limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_iterations(DEFAULT_MAX_ITERATIONS)
    }

    /// A client using `serde_json` and the given iteration limit.
    #[must_use]
    pub fn with_max_iterations(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            codec: SerdeJson,
        }
    }
}

impl Default for UmaClient<SerdeJson> {
    fn default() -> Self {
        Self::new()
    }
}

/// What one token request led to.
enum Step {
    Token(Box<TokenResponse>),
    GatherClaims { need_info: NeedInfo, status: StatusCode },
}

impl<J: JsonCodec> UmaClient<J> {
    /// The configured iteration limit.
    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Fetches the discovery document of `authorization_server`.
    ///
    /// # Errors
    ///
    /// See [`Metadata::from_authorization_server`].
    pub async fn metadata<C: HttpClient>(
        &self,
        http_client: &C,
        authorization_server: &EndpointUrl,
    ) -> Result<Metadata, MetadataErrorFor<C, J>> {
        Metadata::from_authorization_server(authorization_server)
            .codec(&self.codec)
            .call(http_client)
            .await
    }

    /// Negotiates a requesting party token.
    ///
    /// Sends `request` to `token_endpoint`. Each `need_info` answer is passed
    /// to `claim_supplier`, and the request is rebuilt with the new ticket and
    /// claim token, until a token is issued, the server refuses, or the
    /// iteration limit is reached. The limit is checked before every request.
    ///
    /// Dropping the returned future abandons the in-flight request or claim
    /// supplier call.
    ///
    /// # Errors
    ///
    /// Returns an error for each terminal failure: see [`NegotiationError`]
    /// and [`NegotiationError::kind`].
    #[tracing::instrument(
        name = "uma_negotiate",
        level = "debug",
        skip_all,
        fields(token_endpoint = %token_endpoint, max_iterations = self.max_iterations)
    )]
    pub async fn negotiate<C: HttpClient, S: ClaimSupplier>(
        &self,
        http_client: &C,
        token_endpoint: &EndpointUrl,
        request: TokenRequest,
        claim_supplier: &S,
    ) -> Result<TokenResponse, NegotiationErrorFor<C, J>> {
        let mut request = request;
        let mut iteration: u64 = 1;

        loop {
            if iteration > u64::from(self.max_iterations) {
                tracing::warn!(
                    max_iterations = self.max_iterations,
                    "Claim gathering stages exceeded configured maximum"
                );
                return ExhaustedSnafu {
                    max_iterations: self.max_iterations,
                }
                .fail();
            }

            tracing::debug!(iteration, "Requesting UMA token");
            match self.exchange(http_client, token_endpoint, &request).await? {
                Step::Token(token_response) => {
                    tracing::info!(iteration, upgraded = token_response.upgraded, "UMA token issued");
                    return Ok(*token_response);
                }
                Step::GatherClaims { need_info, status } => {
                    tracing::debug!(
                        iteration,
                        required_claims = need_info.required_claims().len(),
                        "Authorization server needs more claims"
                    );
                    let ticket = need_info.ticket().to_owned();

                    let Some(claim_token) = claim_supplier.supply(need_info).await else {
                        tracing::warn!(iteration, "No claim token supplied; giving up");
                        return RequestDeniedSnafu {
                            cause: DenialCause::ClaimsUnavailable,
                            status,
                            description: None::<String>,
                        }
                        .fail();
                    };

                    request = request.after_claims_gathering(ticket, claim_token);
                    iteration += 1;
                }
            }
        }
    }

    /// Sends one token request and interprets the answer.
    async fn exchange<C: HttpClient>(
        &self,
        http_client: &C,
        token_endpoint: &EndpointUrl,
        request: &TokenRequest,
    ) -> Result<Step, NegotiationErrorFor<C, J>> {
        let http_request = request
            .to_http_request(token_endpoint)
            .context(SerializeFormSnafu)?;
        let response = http_client
            .execute(http_request)
            .await
            .context(RequestSnafu)?;
        let status = response.status();
        let body = response.body().await.context(ResponseBodyReadSnafu)?;

        if status == StatusCode::OK {
            let token_response = self
                .codec
                .decode::<TokenResponse>(&body)
                .context(UnparseableSuccessResponseSnafu)?;
            return Ok(Step::Token(Box::new(token_response)));
        }

        let error_response = self.codec.decode::<ErrorResponse>(&body).context(
            UnparseableErrorResponseSnafu {
                status,
                body: body_excerpt(&body),
            },
        )?;

        let outcome = error_response.classify();
        if !matches!(outcome, ErrorOutcome::NeedInfo(_)) {
            tracing::warn!(
                %status,
                error = error_response.error.as_deref().unwrap_or_default(),
                "Token request rejected"
            );
        }

        let description = error_response.error_description;
        match outcome {
            ErrorOutcome::NeedInfo(need_info) => Ok(Step::GatherClaims { need_info, status }),
            ErrorOutcome::MalformedNeedInfo => RequestDeniedSnafu {
                cause: DenialCause::MalformedChallenge,
                status,
                description,
            }
            .fail(),
            ErrorOutcome::RequestDenied => RequestDeniedSnafu {
                cause: DenialCause::NotAuthorized,
                status,
                description,
            }
            .fail(),
            ErrorOutcome::InvalidGrant => InvalidGrantSnafu {
                status,
                description,
            }
            .fail(),
            ErrorOutcome::InvalidScope => InvalidScopeSnafu {
                status,
                description,
            }
            .fail(),
            ErrorOutcome::Unrecognized => UnexpectedResponseSnafu {
                status,
                error: error_response.error,
            }
            .fail(),
        }
    }
}

/// The leading part of `body`, lossily decoded, at most [`MAX_ERROR_BODY_EXCERPT`] bytes.
fn body_excerpt(body: &[u8]) -> String {
    let excerpt = body.get(..MAX_ERROR_BODY_EXCERPT).unwrap_or(body);
    let mut text = String::from_utf8_lossy(excerpt).into_owned();
    if excerpt.len() < body.len() {
        text.push_str("...");
    }
    text
}

#[cfg(not(target_arch = "wasm32"))]
impl<J: JsonCodec> UmaClient<J> {
    /// Blocking form of [`UmaClient::negotiate`].
    ///
    /// Runs the same negotiation on a private current-thread runtime and
    /// returns the same errors. Each call starts and stops its own runtime, so
    /// the transport must not keep tasks alive between calls. A
    /// `reqwest::Client` spawns its connection pool on the runtime that first
    /// uses it; build a new one for every blocking call.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// use uma_grant::{grant::{NoClaims, TokenRequest, UmaClient}, prelude::*};
    ///
    /// let client = UmaClient::new();
    /// let token_endpoint = "https://as.example/token".into_endpoint_url()?;
    ///
    /// for ticket in ["ticket-a", "ticket-b"] {
    ///     // A new transport per call; the previous one died with its runtime.
    ///     let http_client = reqwest::Client::new();
    ///     let request = TokenRequest::builder().ticket(ticket).build();
    ///     let token = client.negotiate_blocking(&http_client, &token_endpoint, request, &NoClaims)?;
    ///     println!("{}", token.token_type);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// As [`UmaClient::negotiate`], plus [`NegotiationError::Runtime`] if the
    /// runtime cannot be started.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn negotiate_blocking<C: HttpClient, S: ClaimSupplier>(
        &self,
        http_client: &C,
        token_endpoint: &EndpointUrl,
        request: TokenRequest,
        claim_supplier: &S,
    ) -> Result<TokenResponse, NegotiationErrorFor<C, J>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(crate::grant::uma_ticket::error::RuntimeSnafu)?;

        runtime.block_on(self.negotiate(http_client, token_endpoint, request, claim_supplier))
    }

    /// Blocking form of [`UmaClient::metadata`].
    ///
    /// The transport rules of [`UmaClient::negotiate_blocking`] apply.
    ///
    /// # Errors
    ///
    /// As [`UmaClient::metadata`], plus [`MetadataError::Runtime`] if the
    /// runtime cannot be started.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn metadata_blocking<C: HttpClient>(
        &self,
        http_client: &C,
        authorization_server: &EndpointUrl,
    ) -> Result<Metadata, MetadataErrorFor<C, J>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(crate::metadata::RuntimeSnafu)?;

        runtime.block_on(self.metadata(http_client, authorization_server))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use http::header::CONTENT_TYPE;

    use super::*;
    use crate::{
        Error as _, IntoEndpointUrl,
        grant::{ClaimToken, FailureKind, NoClaims, SyncClaims},
        test_util::{MockError, MockHttpClient, MockResponse},
    };

    const TOKEN: &str = r#"{"access_token":"rpt-value","token_type":"Bearer","expires_in":300}"#;

    fn token_endpoint() -> EndpointUrl {
        "https://as.example/token".into_endpoint_url().unwrap()
    }

    fn need_info(ticket: &str) -> MockResponse {
        MockResponse::json(
            403,
            &format!(
                r#"{{"error":"need_info","ticket":"{ticket}","required_claims":[{{"claim_token_format":["{}"]}}]}}"#,
                ClaimToken::ID_TOKEN_FORMAT
            ),
        )
    }

    fn initial_request() -> TokenRequest {
        TokenRequest::builder()
            .ticket("ticket-0")
            .persisted_claim_token("pct-0")
            .requesting_party_token("rpt-0")
            .scopes(["read", "write"])
            .build()
    }

    fn form(body: &str) -> Vec<(String, String)> {
        serde_html_form::from_str(body).unwrap()
    }

    fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_token_on_first_request() {
        let http_client = MockHttpClient::new([MockResponse::json(200, TOKEN)]);

        let token = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap();

        assert_eq!(token.access_token.expose_token(), "rpt-value");
        assert_eq!(token.expires_in, Some(300));

        let requests = http_client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::POST);
        assert_eq!(requests[0].uri.to_string(), "https://as.example/token");
        assert_eq!(
            requests[0].headers[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let pairs = form(&requests[0].body);
        assert_eq!(
            field(&pairs, "grant_type"),
            Some(crate::grant::UMA_TICKET_GRANT_TYPE)
        );
        assert_eq!(field(&pairs, "ticket"), Some("ticket-0"));
        assert_eq!(field(&pairs, "pct"), Some("pct-0"));
        assert_eq!(field(&pairs, "rpt"), Some("rpt-0"));
        assert_eq!(field(&pairs, "scope"), Some("read write"));
    }

    #[tokio::test]
    async fn test_claims_gathering_rebuilds_request() {
        let http_client =
            MockHttpClient::new([need_info("ticket-1"), MockResponse::json(200, TOKEN)]);
        let seen = Arc::new(AtomicUsize::new(0));
        let supplier = {
            let seen = seen.clone();
            move |need_info: NeedInfo| {
                seen.fetch_add(1, Ordering::SeqCst);
                async move {
                    assert_eq!(need_info.ticket(), "ticket-1");
                    Some(ClaimToken::id_token("id-token"))
                }
            }
        };

        let token = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &supplier)
            .await
            .unwrap();
        assert_eq!(token.access_token.expose_token(), "rpt-value");
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        let requests = http_client.requests();
        assert_eq!(requests.len(), 2);
        let pairs = form(&requests[1].body);
        assert_eq!(field(&pairs, "ticket"), Some("ticket-1"));
        assert_eq!(field(&pairs, "claim_token"), Some("id-token"));
        assert_eq!(
            field(&pairs, "claim_token_format"),
            Some(ClaimToken::ID_TOKEN_FORMAT)
        );
        assert_eq!(field(&pairs, "scope"), Some("read write"));
        assert_eq!(field(&pairs, "pct"), None);
        assert_eq!(field(&pairs, "rpt"), None);
    }

    #[tokio::test]
    async fn test_exhausted_without_extra_request() {
        let max = 3;
        let http_client = MockHttpClient::new(
            (0..max).map(|i| need_info(&format!("ticket-{i}"))),
        );

        let err = UmaClient::with_max_iterations(max)
            .negotiate(
                &http_client,
                &token_endpoint(),
                initial_request(),
                &ClaimToken::id_token("id-token"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Exhausted);
        assert!(matches!(err, NegotiationError::Exhausted { max_iterations: 3 }));
        assert_eq!(http_client.request_count(), max as usize);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_zero_iterations_makes_no_request() {
        let http_client = MockHttpClient::new([MockResponse::json(200, TOKEN)]);

        let err = UmaClient::with_max_iterations(0)
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Exhausted);
        assert_eq!(http_client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_claims_is_denial() {
        let http_client =
            MockHttpClient::new([need_info("ticket-1"), MockResponse::json(200, TOKEN)]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(
            err.kind(),
            FailureKind::Denied(DenialCause::ClaimsUnavailable)
        );
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(http_client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_scope_keeps_status() {
        let http_client = MockHttpClient::new([MockResponse::json(
            400,
            r#"{"error":"invalid_scope","error_description":"no such scope"}"#,
        )]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidScope);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(matches!(
            &err,
            NegotiationError::InvalidScope { description: Some(d), .. } if d == "no such scope"
        ));
    }

    #[tokio::test]
    async fn test_terminal_error_codes() {
        let cases = [
            (
                r#"{"error":"request_denied"}"#,
                FailureKind::Denied(DenialCause::NotAuthorized),
            ),
            (r#"{"error":"invalid_grant"}"#, FailureKind::InvalidGrant),
            (
                r#"{"error":"need_info"}"#,
                FailureKind::Denied(DenialCause::MalformedChallenge),
            ),
            (r#"{"error":"slow_down"}"#, FailureKind::Unexpected),
            (r#"{"detail":"no error field"}"#, FailureKind::Unexpected),
        ];

        for (body, kind) in cases {
            let http_client = MockHttpClient::new([MockResponse::json(403, body)]);
            let err = UmaClient::new()
                .negotiate(
                    &http_client,
                    &token_endpoint(),
                    initial_request(),
                    &ClaimToken::id_token("unused"),
                )
                .await
                .unwrap_err();

            assert_eq!(err.kind(), kind, "{body}");
            assert_eq!(err.status(), Some(StatusCode::FORBIDDEN), "{body}");
            assert!(!err.is_retryable(), "{body}");
            assert_eq!(http_client.request_count(), 1, "{body}");
        }
    }

    #[tokio::test]
    async fn test_undecodable_error_body() {
        let http_client = MockHttpClient::new([MockResponse::json(502, "<html>Bad Gateway</html>")
            .with_content_type("text/html")]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Unexpected);
        assert!(matches!(
            &err,
            NegotiationError::UnparseableErrorResponse { body, .. } if body.contains("Bad Gateway")
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_large_error_body_is_truncated() {
        let page = format!("<html>{}</html>", "x".repeat(64 * 1024));
        let http_client =
            MockHttpClient::new([MockResponse::json(500, &page).with_content_type("text/html")]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        let NegotiationError::UnparseableErrorResponse { body, status, .. } = &err else {
            unreachable!("expected an undecodable error body, got {err:?}");
        };
        assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("<html>xxx"));
        assert!(body.ends_with("..."));
        assert_eq!(body.len(), MAX_ERROR_BODY_EXCERPT + "...".len());
    }

    #[test]
    fn test_body_excerpt_keeps_short_bodies() {
        assert_eq!(body_excerpt(b"oops"), "oops");
        assert_eq!(body_excerpt(b""), "");
    }

    #[tokio::test]
    async fn test_undecodable_token_is_transport_failure() {
        let http_client = MockHttpClient::new([MockResponse::json(200, r#"{"token_type":1}"#)]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(matches!(
            err,
            NegotiationError::UnparseableSuccessResponse { .. }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let http_client = MockHttpClient::scripted([Err(MockError::ConnectionRefused)]);

        let err = UmaClient::new()
            .negotiate(&http_client, &token_endpoint(), initial_request(), &NoClaims)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(matches!(
            err,
            NegotiationError::Request {
                source: MockError::ConnectionRefused
            }
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_metadata_then_negotiate() {
        let http_client = MockHttpClient::new([
            MockResponse::json(
                200,
                r#"{"issuer":"https://as.example","token_endpoint":"https://as.example/token"}"#,
            ),
            MockResponse::json(200, TOKEN),
        ]);
        let client = UmaClient::new();

        let metadata = client
            .metadata(
                &http_client,
                &"https://as.example".into_endpoint_url().unwrap(),
            )
            .await
            .unwrap();
        let token = client
            .negotiate(
                &http_client,
                &metadata.token_endpoint,
                initial_request(),
                &NoClaims,
            )
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(
            http_client.requests()[1].uri.to_string(),
            "https://as.example/token"
        );
    }

    /// Scripts used to compare the blocking and asynchronous entry points.
    fn scenarios() -> Vec<Vec<MockResponse>> {
        vec![
            vec![MockResponse::json(200, TOKEN)],
            vec![need_info("ticket-1"), MockResponse::json(200, TOKEN)],
            vec![need_info("ticket-1"), need_info("ticket-2")],
            vec![MockResponse::json(400, r#"{"error":"invalid_grant"}"#)],
            vec![MockResponse::json(403, r#"{"error":"request_denied"}"#)],
        ]
    }

    fn outcome(
        result: Result<TokenResponse, NegotiationErrorFor<MockHttpClient, SerdeJson>>,
    ) -> Result<String, FailureKind> {
        result
            .map(|token| token.access_token.expose_token().to_owned())
            .map_err(|err| err.kind())
    }

    #[test]
    fn test_blocking_matches_async() {
        let client = UmaClient::with_max_iterations(2);
        let supplier = SyncClaims(|_: NeedInfo| Some(ClaimToken::id_token("id-token")));

        for script in scenarios() {
            let blocking_http = MockHttpClient::new(script.clone());
            let blocking = outcome(client.negotiate_blocking(
                &blocking_http,
                &token_endpoint(),
                initial_request(),
                &supplier,
            ));

            let async_http = MockHttpClient::new(script);
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let asynchronous = outcome(runtime.block_on(client.negotiate(
                &async_http,
                &token_endpoint(),
                initial_request(),
                &supplier,
            )));

            assert_eq!(blocking, asynchronous);
            assert_eq!(blocking_http.request_count(), async_http.request_count());
        }
    }

    #[test]
    fn test_sequential_blocking_calls_use_fresh_transports() {
        let client = UmaClient::new();

        for ticket in ["ticket-a", "ticket-b"] {
            let http_client = MockHttpClient::new([MockResponse::json(200, TOKEN)]);
            let request = TokenRequest::builder().ticket(ticket).build();

            let token = client
                .negotiate_blocking(&http_client, &token_endpoint(), request, &NoClaims)
                .unwrap();

            assert_eq!(token.access_token.expose_token(), "rpt-value");
            let requests = http_client.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(field(&form(&requests[0].body), "ticket"), Some(ticket));
        }
    }

    #[test]
    fn test_blocking_metadata() {
        let http_client = MockHttpClient::new([MockResponse::json(404, "not found")
            .with_content_type("text/plain")]);

        let err = UmaClient::new()
            .metadata_blocking(
                &http_client,
                &"https://as.example".into_endpoint_url().unwrap(),
            )
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.problem_details().unwrap().is_blank_type());
    }
}
