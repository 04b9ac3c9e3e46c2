//! Validated authorization server URLs.
//!
//! [`EndpointUrl`] wraps a [`Uri`] that has already been parsed, so the token
//! endpoint and authorization server base can be passed into every
//! negotiation without re-validation. [`IntoEndpointUrl`] accepts the common
//! string and URL types.

use std::{convert::Infallible, fmt};

use http::{Uri, uri::InvalidUri};
use serde::{Deserialize, Serialize};
use url::Url;

/// A validated endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrl(Uri);

impl Serialize for EndpointUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.into_endpoint_url().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl EndpointUrl {
    /// Returns the inner [`Uri`].
    #[must_use]
    pub fn as_uri(&self) -> &Uri {
        &self.0
    }

    /// Consumes the [`EndpointUrl`] and returns the inner [`Uri`].
    #[must_use]
    pub fn into_uri(self) -> Uri {
        self.0
    }

    /// Appends `suffix` to the path of this URL.
    ///
    /// A trailing slash on the existing path is dropped first, so
    /// `https://as.example/` and `https://as.example` both become
    /// `https://as.example{suffix}`. Any query string is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined path is not a valid URI path.
    pub fn with_path_suffix(&self, suffix: &str) -> Result<EndpointUrl, http::Error> {
        let path = self.0.path();
        let cleaned_path = path.strip_suffix('/').unwrap_or(path);
        let new_path = format!("{cleaned_path}{suffix}");

        let mut parts = self.0.clone().into_parts();
        parts.path_and_query = Some(new_path.try_into()?);
        Ok(EndpointUrl(Uri::from_parts(parts)?))
    }
}

/// Conversion trait for types that can be turned into an [`EndpointUrl`].
pub trait IntoEndpointUrl {
    /// The error type returned if the conversion fails.
    type Error;

    /// Attempts to convert this value into an [`EndpointUrl`].
    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error>;
}

impl IntoEndpointUrl for EndpointUrl {
    type Error = Infallible;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Ok(self)
    }
}

impl IntoEndpointUrl for Uri {
    type Error = Infallible;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Ok(EndpointUrl(self))
    }
}

impl IntoEndpointUrl for Url {
    type Error = InvalidUri;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        self.as_str().parse::<Uri>().map(EndpointUrl)
    }
}

impl IntoEndpointUrl for &str {
    type Error = InvalidUri;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        self.parse::<Uri>().map(EndpointUrl)
    }
}

impl IntoEndpointUrl for String {
    type Error = InvalidUri;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        self.parse::<Uri>().map(EndpointUrl)
    }
}
