//! The [`Error`] trait shared by every failure in the crate.
//!
//! Transports, codecs and the negotiation itself all report errors through
//! [`Error`], which adds a retry hint to [`std::error::Error`]. Protocol
//! outcomes from the authorization server are never retryable; whether a
//! transport failure is retryable is left to the transport. [`BoxedError`]
//! erases the type parameters while keeping that hint.

use std::convert::Infallible;

use snafu::{AsErrorSource, Snafu};

use crate::platform::MaybeSendSync;

/// Errors that may occur in the library.
pub trait Error: std::error::Error + AsErrorSource + MaybeSendSync + 'static {
    /// If true, the same request may succeed if it is sent again.
    fn is_retryable(&self) -> bool;
}

impl Error for Infallible {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// A boxed error that can be used without type parameters.
#[derive(Debug, Snafu)]
#[snafu(transparent)]
pub struct BoxedError {
    source: Box<dyn Error>,
}

impl BoxedError {
    /// Boxes any crate [`Error`].
    pub fn from_err<E: Error + 'static>(err: E) -> Self {
        Self {
            source: Box::new(err),
        }
    }

    /// Returns the boxed error.
    #[must_use]
    pub fn inner(&self) -> &(dyn Error + 'static) {
        self.source.as_ref()
    }
}

impl Error for BoxedError {
    fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
