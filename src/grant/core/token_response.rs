use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::token::{AccessToken, PersistedClaimToken, RefreshToken};

/// The response from the token endpoint.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The requesting party token.
    #[builder(into)]
    pub access_token: AccessToken,
    /// The token type.
    #[builder(into)]
    pub token_type: String,
    /// Number of seconds until token expiry.
    pub expires_in: Option<u64>,
    /// The refresh token.
    #[builder(into)]
    pub refresh_token: Option<RefreshToken>,
    /// The granted scopes, space separated, usually provided if different to requested scopes.
    #[builder(into)]
    pub scope: Option<String>,
    /// A persisted claim token to present in later requests.
    #[builder(into)]
    pub pct: Option<PersistedClaimToken>,
    /// Whether a presented RPT was upgraded rather than a new one issued.
    #[serde(default)]
    #[builder(default)]
    pub upgraded: bool,
    /// A synthetic field which is set to the received time.
    #[builder(skip = crate::platform::SystemTime::now())]
    #[serde(skip, default = "crate::platform::SystemTime::now")]
    pub received_at: crate::platform::SystemTime,
    /// Other fields received from the token endpoint.
    #[serde(flatten)]
    extra: Option<HashMap<String, Value>>,
}

impl TokenResponse {
    /// Gets a value from the "extra" token fields.
    #[must_use]
    pub fn get_extra(&self, key: &str) -> Option<&Value> {
        self.extra.as_ref().and_then(|extra| extra.get(key))
    }

    /// Iterates over the granted scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.iter().flat_map(|s| s.split_whitespace())
    }

    /// Returns `true` if the access token has expired.
    ///
    /// A lifetime too large to represent as a point in time never expires. A
    /// margin reaching back past the earliest representable time counts as
    /// expired.
    #[must_use]
    pub fn is_expired(
        &self,
        default_expires_in: crate::platform::Duration,
        expires_margin: crate::platform::Duration,
    ) -> bool {
        let expires_in = self
            .expires_in
            .map_or(default_expires_in, crate::platform::Duration::from_secs);

        let Some(expires_at) = self.received_at.checked_add(expires_in) else {
            return false;
        };
        expires_at
            .checked_sub(expires_margin)
            .is_none_or(|deadline| crate::platform::SystemTime::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Duration;

    #[test]
    fn test_decode_uma_token_response() {
        let response: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "sbjsbhs(/SSJHBSUSSJHVhjsgvhsgvshgsv",
                "token_type": "Bearer",
                "expires_in": 300,
                "scope": "read  write",
                "pct": "c2F2ZWRjb25zZW50",
                "upgraded": true,
                "issued_by": "test"
            }"#,
        )
        .unwrap();

        assert_eq!(
            response.access_token.expose_token(),
            "sbjsbhs(/SSJHBSUSSJHVhjsgvhsgvshgsv"
        );
        assert_eq!(response.scopes().collect::<Vec<_>>(), ["read", "write"]);
        assert_eq!(
            response.pct.as_ref().map(PersistedClaimToken::expose_token),
            Some("c2F2ZWRjb25zZW50")
        );
        assert!(response.upgraded);
        assert_eq!(
            response.get_extra("issued_by"),
            Some(&Value::String("test".into()))
        );
        assert!(!response.is_expired(Duration::from_secs(60), Duration::from_secs(10)));
    }

    #[test]
    fn test_upgraded_defaults_to_false() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"t","token_type":"Bearer"}"#).unwrap();
        assert!(!response.upgraded);
        assert_eq!(response.scopes().count(), 0);
    }

    #[test]
    fn test_expired_with_zero_lifetime() {
        let response = TokenResponse::builder()
            .access_token("t")
            .token_type("Bearer")
            .expires_in(0)
            .build();
        assert!(response.is_expired(Duration::from_secs(60), Duration::ZERO));
    }

    #[test]
    fn test_huge_lifetime_never_expires() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"t","token_type":"Bearer","expires_in":18446744073709551615}"#,
        )
        .unwrap();
        assert!(!response.is_expired(Duration::from_secs(60), Duration::ZERO));
        assert!(!response.is_expired(Duration::from_secs(60), Duration::from_secs(30)));
    }

    #[test]
    fn test_huge_margin_is_expired() {
        let response = TokenResponse::builder()
            .access_token("t")
            .token_type("Bearer")
            .expires_in(300)
            .build();
        assert!(response.is_expired(Duration::ZERO, Duration::MAX));
    }
}
