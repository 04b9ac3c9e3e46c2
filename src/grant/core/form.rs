use std::borrow::Cow;

use bytes::Bytes;
use http::{
    HeaderValue, Method, Request,
    header::{ACCEPT, CONTENT_TYPE},
};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;

use crate::EndpointUrl;

/// A single form value, which may be a secret.
///
/// Secrets are only exposed when the form is serialized, so a `Debug` dump of
/// the parameters never leaks a token.
#[derive(Debug, Clone)]
pub(crate) enum FormValue<'a> {
    NonSensitive(Cow<'a, str>),
    Sensitive(&'a SecretString),
}

impl From<String> for FormValue<'_> {
    fn from(value: String) -> Self {
        Self::NonSensitive(Cow::Owned(value))
    }
}

impl<'a> From<&'a str> for FormValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::NonSensitive(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a SecretString> for FormValue<'a> {
    fn from(value: &'a SecretString) -> Self {
        Self::Sensitive(value)
    }
}

impl Serialize for FormValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FormValue::NonSensitive(cow) => cow.serialize(serializer),
            FormValue::Sensitive(secret) => secret.expose_secret().serialize(serializer),
        }
    }
}

/// Ordered form parameters.
pub(crate) type FormParams<'a> = Vec<(&'static str, FormValue<'a>)>;

/// Encodes parameters as `application/x-www-form-urlencoded`.
///
/// Names and values are encoded individually and joined in the given order.
pub(crate) fn encode_form(params: &FormParams<'_>) -> Result<String, serde_html_form::ser::Error> {
    serde_html_form::to_string(params)
}

/// Builds a form `POST` to `uri` that expects a JSON answer.
pub(crate) fn build_form_request(
    uri: &EndpointUrl,
    params: &FormParams<'_>,
) -> Result<Request<Bytes>, serde_html_form::ser::Error> {
    let body = encode_form(params)?;

    let (mut parts, ()) = http::Request::new(()).into_parts();
    parts.method = Method::POST;
    parts.uri = uri.as_uri().clone();
    parts.headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    parts
        .headers
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(Request::from_parts(parts, body.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntoEndpointUrl as _;

    #[test]
    fn test_values_are_encoded_individually() {
        let secret = SecretString::from("a&b=c");
        let params: FormParams<'_> = vec![
            ("grant_type", "urn:x:y".into()),
            ("secret", (&secret).into()),
            ("scope", "read write".into()),
        ];
        assert_eq!(
            encode_form(&params).unwrap(),
            "grant_type=urn%3Ax%3Ay&secret=a%26b%3Dc&scope=read+write"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let secret = SecretString::from("hunter2");
        let value = FormValue::from(&secret);
        assert!(!format!("{value:?}").contains("hunter2"));
    }

    #[test]
    fn test_request_headers() {
        let uri = "https://as.example/token".into_endpoint_url().unwrap();
        let request = build_form_request(&uri, &vec![("a", "b".into())]).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(request.headers()[ACCEPT], "application/json");
        assert_eq!(request.body().as_ref(), b"a=b");
    }
}
