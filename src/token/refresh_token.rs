use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

/// A refresh token, if the authorization server chooses to issue one with an RPT.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshToken(SecretString);

impl RefreshToken {
    /// Exposes the token as a string.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Serialize for RefreshToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose_token())
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for RefreshToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}
