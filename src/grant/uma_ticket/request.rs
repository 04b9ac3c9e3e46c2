use std::collections::BTreeSet;

use bon::Builder;
use bytes::Bytes;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    EndpointUrl,
    grant::{
        UMA_TICKET_GRANT_TYPE,
        core::{
            form::{FormParams, build_form_request, encode_form},
            mk_scopes,
        },
    },
    token::{AccessToken, PersistedClaimToken},
};

/// A claim token supplied by the client during claims gathering.
#[derive(Debug, Clone)]
pub struct ClaimToken {
    token: SecretString,
    format: String,
}

impl ClaimToken {
    /// The format identifier of an OpenID Connect ID token.
    pub const ID_TOKEN_FORMAT: &'static str =
        "http://openid.net/specs/openid-connect-core-1_0.html#IDToken";

    /// The format identifier of a generic JWT.
    pub const JWT_FORMAT: &'static str = "urn:ietf:params:oauth:token-type:jwt";

    /// Creates a claim token of the given format.
    pub fn new(token: impl Into<SecretString>, format: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            format: format.into(),
        }
    }

    /// Creates a claim token holding an OpenID Connect ID token.
    pub fn id_token(token: impl Into<SecretString>) -> Self {
        Self::new(token, Self::ID_TOKEN_FORMAT)
    }

    /// Exposes the token as a string.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }

    /// The token format, sent as `claim_token_format`.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }
}

/// Parameters for one call to the token endpoint.
///
/// A request is never modified once built. After a `need_info` answer the
/// negotiation builds a fresh one with [`TokenRequest::after_claims_gathering`].
#[derive(Debug, Clone, Builder)]
pub struct TokenRequest {
    /// The permission ticket.
    #[builder(into)]
    ticket: String,
    /// A persisted claim token from an earlier grant.
    #[builder(into)]
    persisted_claim_token: Option<PersistedClaimToken>,
    /// An existing RPT to upgrade.
    #[builder(into)]
    requesting_party_token: Option<AccessToken>,
    /// Claims pushed with the request.
    claim_token: Option<ClaimToken>,
    #[builder(default, with = |scopes: impl IntoIterator<Item = impl Into<String>>| mk_scopes(scopes))]
    scopes: BTreeSet<String>,
}

impl TokenRequest {
    /// Returns the permission ticket.
    #[must_use]
    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    /// Returns the persisted claim token, if any.
    #[must_use]
    pub fn persisted_claim_token(&self) -> Option<&PersistedClaimToken> {
        self.persisted_claim_token.as_ref()
    }

    /// Returns the requesting party token, if any.
    #[must_use]
    pub fn requesting_party_token(&self) -> Option<&AccessToken> {
        self.requesting_party_token.as_ref()
    }

    /// Returns the claim token, if any.
    #[must_use]
    pub fn claim_token(&self) -> Option<&ClaimToken> {
        self.claim_token.as_ref()
    }

    /// Returns the requested scopes.
    #[must_use]
    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// The request to send after a claims-gathering round.
    ///
    /// Only the scopes carry over. The ticket and claim token come from the
    /// round; the PCT and RPT are not sent again.
    #[must_use]
    pub fn after_claims_gathering(&self, ticket: String, claim_token: ClaimToken) -> Self {
        Self {
            ticket,
            persisted_claim_token: None,
            requesting_party_token: None,
            claim_token: Some(claim_token),
            scopes: self.scopes.clone(),
        }
    }

    /// The token endpoint form parameters, in wire order.
    pub(crate) fn form_params(&self) -> FormParams<'_> {
        let mut params: FormParams<'_> = vec![
            ("grant_type", UMA_TICKET_GRANT_TYPE.into()),
            ("ticket", self.ticket.as_str().into()),
        ];

        if let Some(pct) = &self.persisted_claim_token {
            params.push(("pct", pct.expose_token().into()));
        }
        if let Some(rpt) = &self.requesting_party_token {
            params.push(("rpt", rpt.expose_token().into()));
        }
        if let Some(claim_token) = &self.claim_token {
            params.push(("claim_token", (&claim_token.token).into()));
            params.push(("claim_token_format", claim_token.format.as_str().into()));
        }
        if !self.scopes.is_empty() {
            let scope = self
                .scopes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            params.push(("scope", scope.into()));
        }

        params
    }

    /// Encodes the request as an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters cannot be form encoded.
    pub fn to_form_body(&self) -> Result<String, serde_html_form::ser::Error> {
        encode_form(&self.form_params())
    }

    /// Builds the HTTP request against `token_endpoint`.
    pub(crate) fn to_http_request(
        &self,
        token_endpoint: &EndpointUrl,
    ) -> Result<http::Request<Bytes>, serde_html_form::ser::Error> {
        build_form_request(token_endpoint, &self.form_params())
    }
}
