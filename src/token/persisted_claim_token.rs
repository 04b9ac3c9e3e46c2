use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

/// A persisted claim token (PCT).
///
/// Issued alongside an RPT to stand for claims the requesting party has
/// already satisfied, so they need not be gathered again.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedClaimToken(SecretString);

impl PersistedClaimToken {
    /// Exposes the token as a string.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Serialize for PersistedClaimToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose_token())
    }
}

impl From<&str> for PersistedClaimToken {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for PersistedClaimToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}
