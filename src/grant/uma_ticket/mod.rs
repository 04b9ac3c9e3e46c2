//! The UMA ticket grant (`urn:ietf:params:oauth:grant-type:uma-ticket`).
//!
//! A client holding a permission ticket exchanges it at the token endpoint for
//! a requesting party token (RPT). The authorization server may answer
//! `need_info`, in which case the client gathers claims through a
//! [`ClaimSupplier`] and tries again with the fresh ticket. [`UmaClient`]
//! drives that loop up to a configured number of requests.

mod claims;
mod client;
mod error;
mod error_response;
mod request;

pub use claims::{ClaimSupplier, NoClaims, SyncClaims};
pub use client::{DEFAULT_MAX_ITERATIONS, MAX_ERROR_BODY_EXCERPT, NegotiationErrorFor, UmaClient};
pub use error::{DenialCause, FailureKind, NegotiationError};
pub use error_response::{ErrorOutcome, ErrorResponse, NeedInfo, RequiredClaims};
pub use request::{ClaimToken, TokenRequest};
