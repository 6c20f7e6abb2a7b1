//! [RFC 7009]: OAuth 2.0 Token Revocation.
//!
//! The server answers `200 OK` whether or not the token existed, so the
//! response body is never looked at.
//!
//! [RFC 7009]: <https://www.rfc-editor.org/rfc/rfc7009.html>
use http::StatusCode;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::{
		Endpoint, SendRequest, basic_auth_request_builder, finish_request, introspection::TokenTypeHint,
	},
	response::expect_status,
	transport::WwwFormUrlEncoded,
};

pub struct RevocationEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> Clone for RevocationEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for RevocationEndpoint<'a, C> {}

impl<'a, C> RevocationEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Endpoint for RevocationEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

/// Revocation Request.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7009.html#section-2.1>
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevocationRequest<'a> {
	pub token: &'a str,

	pub token_type_hint: Option<TokenTypeHint>,
}

impl<'a> RevocationRequest<'a> {
	pub fn new(token: &'a str, token_type_hint: Option<TokenTypeHint>) -> Self {
		Self {
			token,
			token_type_hint,
		}
	}
}

impl<'a, C: OAuth2Client> SendRequest<RevocationEndpoint<'a, C>> for RevocationRequest<'_> {
	type ContentType = WwwFormUrlEncoded;
	type RequestBody<'b>
		= &'b Self
	where
		Self: 'b;
	type Response = ();

	fn build_request(
		&self,
		endpoint: &RevocationEndpoint<'a, C>,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		finish_request(
			basic_auth_request_builder(endpoint, http::Method::POST)?,
			self,
		)
	}

	fn parse_response(
		&self,
		_endpoint: &RevocationEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		expect_status(&response, StatusCode::OK)
	}
}
