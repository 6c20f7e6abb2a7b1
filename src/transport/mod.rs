//! HTTP transport layer, content type encoding, and client abstraction.
use base64::{Engine, prelude::BASE64_STANDARD};
use http::HeaderValue;
use serde::Serialize;

use crate::client::OAuth2ClientError;

mod client;

pub use client::*;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Trait for encoding request bodies with a specific content type.
pub trait ContentType {
	/// The `Content-Type` header value, or `None` for requests with no body.
	const VALUE: Option<HeaderValue>;

	/// Serializes the given value into a byte vector using this content type's
	/// encoding.
	fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, OAuth2ClientError>;
}

/// No request body. Used for `GET` requests.
pub struct NoContent;

impl ContentType for NoContent {
	const VALUE: Option<HeaderValue> = None;

	fn encode<T: Serialize>(_value: &T) -> Result<Vec<u8>, OAuth2ClientError> {
		Ok(Vec::new())
	}
}

/// URL-encoded form (`application/x-www-form-urlencoded`) content type
/// encoding.
///
/// `None` fields are left out of the form entirely.
pub struct WwwFormUrlEncoded;

impl ContentType for WwwFormUrlEncoded {
	const VALUE: Option<HeaderValue> = Some(APPLICATION_X_WWW_FORM_URLENCODED);

	fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, OAuth2ClientError> {
		log::debug!("serializing {}", std::any::type_name_of_val(value));
		serde_html_form::to_string(value)
			.map(String::into_bytes)
			.map_err(OAuth2ClientError::request)
	}
}

/// `Authorization: Basic` header value for the given client credentials.
///
/// Credentials are joined with `:` and base64-encoded without further
/// escaping.
pub fn basic_auth(client_id: &str, client_secret: &str) -> Result<HeaderValue, OAuth2ClientError> {
	let credentials = BASE64_STANDARD.encode(format!("{client_id}:{client_secret}"));
	let mut value = HeaderValue::try_from(format!("Basic {credentials}"))
		.map_err(OAuth2ClientError::request)?;
	value.set_sensitive(true);
	Ok(value)
}

/// `Authorization: Bearer` header value for the given access token.
pub fn bearer_auth(access_token: &str) -> Result<HeaderValue, OAuth2ClientError> {
	let mut value = HeaderValue::try_from(format!("Bearer {access_token}"))
		.map_err(|_| OAuth2ClientError::Request("malformed access token".to_owned()))?;
	value.set_sensitive(true);
	Ok(value)
}
