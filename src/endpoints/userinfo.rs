//! User-info endpoint.
use http::header;
use serde::{Deserialize, Serialize};

use crate::{
	client::OAuth2ClientError,
	endpoints::{Endpoint, SendRequest, finish_request, request_builder},
	response::decode_envelope,
	transport::{NoContent, bearer_auth},
};

pub struct UserInfoEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> Clone for UserInfoEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for UserInfoEndpoint<'a, C> {}

impl<'a, C> UserInfoEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Endpoint for UserInfoEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

/// Profile of the user an access token was issued to.
pub struct UserInfoRequest<'a> {
	pub access_token: &'a str,
}

impl<'a> UserInfoRequest<'a> {
	pub fn new(access_token: &'a str) -> Self {
		Self { access_token }
	}
}

impl<'a, C> SendRequest<UserInfoEndpoint<'a, C>> for UserInfoRequest<'_> {
	type ContentType = NoContent;
	type RequestBody<'b>
		= ()
	where
		Self: 'b;
	type Response = UserInfo;

	fn build_request(
		&self,
		endpoint: &UserInfoEndpoint<'a, C>,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		finish_request(
			request_builder(http::Method::GET, endpoint.uri())?
				.header(header::AUTHORIZATION, bearer_auth(self.access_token)?),
			(),
		)
	}

	fn parse_response(
		&self,
		_endpoint: &UserInfoEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		decode_envelope(&response)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
	/// Subject identifier of the user.
	pub sub: String,

	#[serde(default)]
	pub nickname: String,

	/// Avatar URL.
	#[serde(default)]
	pub picture: String,

	/// Last profile update, in Unix seconds.
	#[serde(default)]
	pub updated_at: i64,
}
