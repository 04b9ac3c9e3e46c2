//! The UMA 2.0 grant.
//!
//! [`core`] holds the form encoding and token response shared by token
//! endpoint calls. [`uma_ticket`] implements the permission ticket exchange
//! and its claims-gathering negotiation.

pub mod core;
pub mod uma_ticket;

pub use self::core::TokenResponse;
pub use uma_ticket::{
    ClaimSupplier, ClaimToken, DenialCause, ErrorOutcome, ErrorResponse, FailureKind, NeedInfo,
    NegotiationError, NoClaims, RequiredClaims, SyncClaims, TokenRequest, UmaClient,
};

/// The grant type identifier of the UMA ticket grant.
pub const UMA_TICKET_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:uma-ticket";
