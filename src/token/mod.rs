//! Tokens exchanged with an UMA authorization server.
//!
//! Each token is a newtype over a secret string: `Debug` output is redacted
//! and the raw value is only reachable through an explicit `expose_token`.

mod access_token;
mod persisted_claim_token;
mod refresh_token;

pub use access_token::AccessToken;
pub use persisted_claim_token::PersistedClaimToken;
pub use refresh_token::RefreshToken;
