//! JSON decoding abstraction.
//!
//! The client and the problem details decoder take a [`JsonCodec`] when they
//! are constructed instead of looking one up at runtime. [`SerdeJson`] is the
//! default and is what almost every caller wants; the trait exists so a
//! different backend (or an instrumented one in tests) can be substituted.

use serde::de::DeserializeOwned;

use crate::platform::MaybeSendSync;

/// Decodes JSON documents into typed values.
pub trait JsonCodec: MaybeSendSync {
    /// The error returned when a document cannot be decoded.
    type Error: crate::Error;

    /// Decodes `bytes` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not valid JSON or does not match `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

impl<J: JsonCodec> JsonCodec for &J {
    type Error = J::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        (**self).decode(bytes)
    }
}

/// A [`JsonCodec`] backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJson;

impl JsonCodec for SerdeJson {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

impl crate::Error for serde_json::Error {
    fn is_retryable(&self) -> bool {
        false
    }
}
