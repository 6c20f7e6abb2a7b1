//! [RFC 7662]: OAuth 2.0 Token Introspection.
//!
//! [RFC 7662]: <https://www.rfc-editor.org/rfc/rfc7662.html>
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::{Endpoint, SendRequest, basic_auth_request_builder, finish_request},
	response::decode_envelope,
	transport::WwwFormUrlEncoded,
};

/// Hint about the type of the submitted token.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7009.html#section-2.1>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
	AccessToken,
	RefreshToken,
}

impl TokenTypeHint {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::AccessToken => "access_token",
			Self::RefreshToken => "refresh_token",
		}
	}
}

impl fmt::Display for TokenTypeHint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

pub struct IntrospectionEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> Clone for IntrospectionEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for IntrospectionEndpoint<'a, C> {}

impl<'a, C> IntrospectionEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Endpoint for IntrospectionEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

/// Introspection Request.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7662.html#section-2.1>
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntrospectionRequest<'a> {
	pub token: &'a str,

	pub token_type_hint: Option<TokenTypeHint>,
}

impl<'a> IntrospectionRequest<'a> {
	pub fn new(token: &'a str, token_type_hint: Option<TokenTypeHint>) -> Self {
		Self {
			token,
			token_type_hint,
		}
	}
}

impl<'a, C: OAuth2Client> SendRequest<IntrospectionEndpoint<'a, C>> for IntrospectionRequest<'_> {
	type ContentType = WwwFormUrlEncoded;
	type RequestBody<'b>
		= &'b Self
	where
		Self: 'b;
	type Response = IntrospectionResponse;

	fn build_request(
		&self,
		endpoint: &IntrospectionEndpoint<'a, C>,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		finish_request(
			basic_auth_request_builder(endpoint, http::Method::POST)?,
			self,
		)
	}

	fn parse_response(
		&self,
		_endpoint: &IntrospectionEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		decode_envelope(&response)
	}
}

/// Introspection Response.
///
/// An inactive token usually comes with `active` alone.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7662.html#section-2.2>
#[skip_serializing_none]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
	pub active: bool,

	pub scope: Option<String>,

	pub client_id: Option<String>,

	pub username: Option<String>,

	pub token_type: Option<String>,

	/// Expiration time, in Unix seconds.
	pub exp: Option<i64>,

	pub sub: Option<String>,
}
