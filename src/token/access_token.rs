use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// An access token.
///
/// In UMA this is the requesting party token (RPT): it is what a successful
/// negotiation returns, and a previously issued one may be presented in a
/// later [`TokenRequest`](crate::grant::TokenRequest) to be upgraded.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Exposes the token as a string.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Serialize for AccessToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.expose_token())
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<SecretString> for AccessToken {
    fn from(value: SecretString) -> Self {
        Self(value)
    }
}
