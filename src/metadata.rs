//! UMA 2.0 authorization server discovery.
//!
//! An UMA authorization server publishes its configuration at
//! `/.well-known/uma2-configuration`, using the RFC 8414 document format
//! extended with the UMA grant and federated authorization endpoints.

use bon::bon;
use http::StatusCode;
use serde::Deserialize;
use snafu::prelude::*;
use tracing::Instrument as _;

use crate::{
    EndpointUrl,
    codec::JsonCodec,
    http::{GetError, HttpClient, HttpResponse},
    problem_details::ProblemDetails,
};

/// The well-known path of the UMA 2.0 discovery document.
pub const UMA2_CONFIGURATION_PATH: &str = "/.well-known/uma2-configuration";

/// Authorization server discovery metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub issuer: Option<String>,
    /// Token endpoint, where permission tickets are exchanged.
    pub token_endpoint: EndpointUrl,
    pub jwks_uri: Option<EndpointUrl>,
    #[serde(default)]
    pub grant_types_supported: Vec<String>,
    #[serde(default)]
    pub scopes_supported: Vec<String>,
    #[serde(default)]
    pub token_endpoint_auth_methods_supported: Vec<String>,
    #[serde(default)]
    pub dpop_signing_alg_values_supported: Vec<String>,
    pub introspection_endpoint: Option<EndpointUrl>,
    pub revocation_endpoint: Option<EndpointUrl>,
    /**
     * UMA 2.0 Grant for OAuth 2.0 Authorization §2
     */
    // Where the client may redirect the requesting party for interactive claims gathering.
    pub claims_interaction_endpoint: Option<EndpointUrl>,
    #[serde(default)]
    pub uma_profiles_supported: Vec<String>,
    /**
     * Federated Authorization for UMA 2.0 §2
     */
    pub permission_endpoint: Option<EndpointUrl>,
    pub resource_registration_endpoint: Option<EndpointUrl>,
    pub policy_endpoint: Option<EndpointUrl>,
}

impl Metadata {
    /// Returns `true` if the server advertises the UMA ticket grant.
    ///
    /// Servers that omit `grant_types_supported` are assumed to support it.
    #[must_use]
    pub fn supports_uma_ticket_grant(&self) -> bool {
        self.grant_types_supported.is_empty()
            || self
                .grant_types_supported
                .iter()
                .any(|g| g == crate::grant::UMA_TICKET_GRANT_TYPE)
    }
}

#[bon]
impl Metadata {
    /// Fetches the discovery document of `authorization_server`.
    ///
    /// A single request is made; nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovery URL cannot be formed, the request
    /// fails, the server does not answer 200, or the body cannot be decoded.
    #[builder]
    pub async fn from_authorization_server<C: HttpClient, J: JsonCodec>(
        #[builder(start_fn)] authorization_server: &EndpointUrl,
        #[builder(finish_fn)] http_client: &C,
        codec: J,
    ) -> Result<Self, MetadataError<C::Error, <C::Response as HttpResponse>::Error, J::Error>> {
        let configuration_endpoint = authorization_server
            .with_path_suffix(UMA2_CONFIGURATION_PATH)
            .context(BadAuthorizationServerSnafu)?;

        let span = tracing::debug_span!("uma_metadata", endpoint = %configuration_endpoint);
        async {
            let result =
                crate::http::get_json(http_client, &codec, configuration_endpoint.into_uri())
                    .await
                    .context(FetchSnafu);
            if let Err(err) = &result {
                tracing::warn!(error = %err, "UMA discovery failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Errors that can occur when fetching discovery metadata.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MetadataError<
    HttpReqErr: crate::Error + 'static,
    HttpRespErr: crate::Error + 'static,
    DecodeErr: crate::Error + 'static,
> {
    /// The discovery URL could not be built from the authorization server URL.
    #[snafu(display("Cannot derive a discovery URL from the authorization server URL"))]
    BadAuthorizationServer {
        /// The underlying URI error.
        source: http::Error,
    },
    /// The discovery document could not be fetched.
    #[snafu(display("Error performing UMA metadata discovery"))]
    Fetch {
        /// The underlying error.
        source: GetError<HttpReqErr, HttpRespErr, DecodeErr>,
    },
    /// The runtime backing a blocking call could not be started.
    #[snafu(display("Failed to start a runtime for a blocking call"))]
    Runtime {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl<HttpReqErr: crate::Error, HttpRespErr: crate::Error, DecodeErr: crate::Error>
    MetadataError<HttpReqErr, HttpRespErr, DecodeErr>
{
    /// The HTTP status, if the server answered with something other than 200.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Fetch {
                source: GetError::BadStatus { status, .. },
            } => Some(*status),
            _ => None,
        }
    }

    /// Problem details from a non-200 answer.
    #[must_use]
    pub fn problem_details(&self) -> Option<&ProblemDetails> {
        match self {
            Self::Fetch {
                source: GetError::BadStatus { problem, .. },
            } => Some(problem),
            _ => None,
        }
    }
}

impl<HttpReqErr: crate::Error, HttpRespErr: crate::Error, DecodeErr: crate::Error> crate::Error
    for MetadataError<HttpReqErr, HttpRespErr, DecodeErr>
{
    fn is_retryable(&self) -> bool {
        match self {
            Self::BadAuthorizationServer { .. } | Self::Runtime { .. } => false,
            Self::Fetch { source } => source.is_retryable(),
        }
    }
}
