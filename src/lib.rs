//! Implements the client side of the UMA 2.0 grant.
//!
//! The crate discovers an authorization server's UMA configuration, exchanges
//! permission tickets for requesting party tokens and drives the
//! claims-gathering negotiation that follows a `need_info` answer.

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
mod endpoint_url;
mod error;
pub mod grant;
pub mod http;
pub mod metadata;
pub mod platform;
pub mod prelude;
pub mod problem_details;
#[cfg(test)]
mod test_util;
pub mod token;

pub use endpoint_url::{EndpointUrl, IntoEndpointUrl};
pub use error::{BoxedError, Error};

/// Documentation
pub mod _documentation {
    #[doc = include_str!("../README.md")]
    mod readme {}
}

/// Re-export of parts of the `secrecy` crate.
pub mod secrecy {
    pub use ::secrecy::{ExposeSecret, SecretString};
}

pub use bytes::Bytes;
