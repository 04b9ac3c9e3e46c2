use serde::{Deserialize, Serialize};

/// An error body returned by the token endpoint.
///
/// The UMA grant extends the `OAuth2` error response with the fields needed
/// for claims gathering (UMA 2.0 Grant §3.3.6).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    /// The error code. Absent if the server sent some other JSON document.
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
    /// A fresh permission ticket, sent with `need_info`.
    pub ticket: Option<String>,
    /// The claims interaction endpoint the requesting party may be redirected to.
    pub redirect_user: Option<String>,
    #[serde(default)]
    pub required_claims: Vec<RequiredClaims>,
    /// Seconds to wait before polling again, sent with `request_submitted`.
    pub interval: Option<u64>,
}

/// A description of claims the authorization server requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredClaims {
    /// Acceptable `claim_token_format` values.
    #[serde(default)]
    pub claim_token_format: Vec<String>,
    pub claim_type: Option<String>,
    pub friendly_name: Option<String>,
    /// Acceptable issuers of the claim.
    #[serde(default)]
    pub issuer: Vec<String>,
    pub name: Option<String>,
}

/// A claims-gathering challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedInfo {
    ticket: String,
    redirect_user: Option<String>,
    required_claims: Vec<RequiredClaims>,
}

impl NeedInfo {
    /// Derives a challenge from a `need_info` error body.
    ///
    /// Returns `None` if the body carries no ticket, since the negotiation
    /// cannot continue without one.
    #[must_use]
    pub fn from_error_response(response: &ErrorResponse) -> Option<Self> {
        let ticket = response.ticket.as_ref().filter(|t| !t.is_empty())?;
        Some(Self {
            ticket: ticket.clone(),
            redirect_user: response.redirect_user.clone(),
            required_claims: response.required_claims.clone(),
        })
    }

    /// The ticket to present with the gathered claims.
    #[must_use]
    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    /// Where to redirect the requesting party for interactive gathering, if offered.
    #[must_use]
    pub fn redirect_user(&self) -> Option<&str> {
        self.redirect_user.as_deref()
    }

    #[must_use]
    pub fn required_claims(&self) -> &[RequiredClaims] {
        &self.required_claims
    }

    /// Returns `true` if a claim token of `format` could satisfy the challenge.
    ///
    /// A challenge that names no formats accepts any.
    #[must_use]
    pub fn accepts_format(&self, format: &str) -> bool {
        let mut formats = self
            .required_claims
            .iter()
            .flat_map(|c| c.claim_token_format.iter())
            .peekable();
        formats.peek().is_none() || formats.any(|f| f == format)
    }
}

/// The classified outcome of a token endpoint error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// The server needs more claims.
    NeedInfo(NeedInfo),
    /// `need_info` without a usable ticket.
    MalformedNeedInfo,
    /// `request_denied`.
    RequestDenied,
    /// `invalid_grant`.
    InvalidGrant,
    /// `invalid_scope`.
    InvalidScope,
    /// Any other code, or no code at all.
    Unrecognized,
}

impl ErrorResponse {
    /// Classifies the error by its `error` code.
    ///
    /// The dispatch is closed: a code outside the UMA grant's set is
    /// [`ErrorOutcome::Unrecognized`] and is never treated as transient.
    #[must_use]
    pub fn classify(&self) -> ErrorOutcome {
        match self.error.as_deref() {
            Some("need_info") => NeedInfo::from_error_response(self)
                .map_or(ErrorOutcome::MalformedNeedInfo, ErrorOutcome::NeedInfo),
            Some("request_denied") => ErrorOutcome::RequestDenied,
            Some("invalid_grant") => ErrorOutcome::InvalidGrant,
            Some("invalid_scope") => ErrorOutcome::InvalidScope,
            _ => ErrorOutcome::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ErrorResponse {
        serde_json::from_str(body).unwrap()
    }

    /// The `need_info` example from UMA 2.0 Grant §3.3.6.
    #[test]
    fn test_need_info_from_grant_example() {
        let response = parse(
            r#"{
                "error": "need_info",
                "ticket": "ZXJyb3JfZGV0YWlscw==",
                "redirect_user": "https://as.example.com/rqp_claims?id=2346576421",
                "required_claims": [
                    {
                        "claim_token_format": [
                            "http://openid.net/specs/openid-connect-core-1_0.html#IDToken"
                        ],
                        "claim_type": "urn:oid:0.9.2342.19200300.100.1.3",
                        "friendly_name": "email",
                        "issuer": ["https://example.com/idp"],
                        "name": "email23423453ou453"
                    }
                ]
            }"#,
        );

        let need_info = match response.classify() {
            ErrorOutcome::NeedInfo(need_info) => need_info,
            other => unreachable!("expected need_info, got {other:?}"),
        };
        assert_eq!(need_info.ticket(), "ZXJyb3JfZGV0YWlscw==");
        assert_eq!(
            need_info.redirect_user(),
            Some("https://as.example.com/rqp_claims?id=2346576421")
        );
        assert_eq!(need_info.required_claims().len(), 1);
        assert_eq!(
            need_info.required_claims()[0].friendly_name.as_deref(),
            Some("email")
        );
        assert!(need_info.accepts_format(crate::grant::ClaimToken::ID_TOKEN_FORMAT));
        assert!(!need_info.accepts_format("urn:example:other"));
    }

    #[test]
    fn test_need_info_without_ticket_is_malformed() {
        assert_eq!(
            parse(r#"{"error":"need_info"}"#).classify(),
            ErrorOutcome::MalformedNeedInfo
        );
        assert_eq!(
            parse(r#"{"error":"need_info","ticket":""}"#).classify(),
            ErrorOutcome::MalformedNeedInfo
        );
    }

    #[test]
    fn test_need_info_without_formats_accepts_anything() {
        let need_info = NeedInfo::from_error_response(&parse(
            r#"{"error":"need_info","ticket":"t","required_claims":[{"name":"x"}]}"#,
        ))
        .unwrap();
        assert!(need_info.accepts_format("anything"));
    }

    #[test]
    fn test_terminal_codes() {
        assert_eq!(
            parse(r#"{"error":"request_denied"}"#).classify(),
            ErrorOutcome::RequestDenied
        );
        assert_eq!(
            parse(r#"{"error":"invalid_grant","error_description":"expired ticket"}"#).classify(),
            ErrorOutcome::InvalidGrant
        );
        assert_eq!(
            parse(r#"{"error":"invalid_scope"}"#).classify(),
            ErrorOutcome::InvalidScope
        );
    }

    #[test]
    fn test_unknown_or_missing_code() {
        for body in [
            r#"{"error":"request_submitted","ticket":"t","interval":5}"#,
            r#"{"error":"temporarily_unavailable"}"#,
            r#"{"message":"not an oauth error"}"#,
            "{}",
        ] {
            assert_eq!(parse(body).classify(), ErrorOutcome::Unrecognized, "{body}");
        }
    }
}
