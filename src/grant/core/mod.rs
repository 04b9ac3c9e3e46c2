//! Shared token endpoint infrastructure.
//!
//! Form encoding of token requests and the token response type.

pub(crate) mod form;
mod token_response;

use std::collections::BTreeSet;

pub use token_response::TokenResponse;

/// Collects scopes into a set, dropping blank entries.
pub(crate) fn mk_scopes(scopes: impl IntoIterator<Item = impl Into<String>>) -> BTreeSet<String> {
    scopes
        .into_iter()
        .filter_map(|s| {
            let s = s.into();
            (!s.trim().is_empty()).then_some(s)
        })
        .collect()
}
