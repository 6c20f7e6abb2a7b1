//! User lookup endpoints.
//!
//! Users are addressed either by numeric id (`/api/v1/users/{id}`) or by
//! subject (`/api/v1/users/sub/{sub}`).
use http::header;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::{
	client::OAuth2ClientError,
	endpoints::{Endpoint, SendRequest, finish_request, request_builder},
	response::decode_envelope,
	transport::{NoContent, bearer_auth},
};

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

pub struct UserEndpoint<'a, C> {
	pub client: &'a C,

	/// Collection URI, without trailing `/`.
	pub uri: &'a str,
}

impl<'a, C> Clone for UserEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for UserEndpoint<'a, C> {}

impl<'a, C> UserEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Endpoint for UserEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

/// How a user is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRef<'a> {
	/// Primary key.
	Id(u64),

	/// Public subject identifier.
	Subject(&'a str),
}

impl UserRef<'_> {
	/// Path below the user collection, escaped.
	pub fn path(&self) -> String {
		match self {
			Self::Id(id) => format!("/{id}"),
			Self::Subject(sub) => format!("/sub/{}", utf8_percent_encode(sub, PATH_SEGMENT)),
		}
	}
}

pub struct UserRequest<'a> {
	pub access_token: &'a str,
	pub user: UserRef<'a>,
}

impl<'a> UserRequest<'a> {
	pub fn new(access_token: &'a str, user: UserRef<'a>) -> Self {
		Self { access_token, user }
	}
}

impl<'a, C> SendRequest<UserEndpoint<'a, C>> for UserRequest<'_> {
	type ContentType = NoContent;
	type RequestBody<'b>
		= ()
	where
		Self: 'b;
	type Response = UserDetail;

	fn build_request(
		&self,
		endpoint: &UserEndpoint<'a, C>,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		let uri = format!("{}{}", endpoint.uri(), self.user.path());

		finish_request(
			request_builder(http::Method::GET, &uri)?
				.header(header::AUTHORIZATION, bearer_auth(self.access_token)?),
			(),
		)
	}

	fn parse_response(
		&self,
		_endpoint: &UserEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		decode_envelope(&response)
	}
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UserStatus {
	Disabled,
	Active,
	Unknown(i64),
}

impl From<i64> for UserStatus {
	fn from(value: i64) -> Self {
		match value {
			0 => Self::Disabled,
			1 => Self::Active,
			other => Self::Unknown(other),
		}
	}
}

impl From<UserStatus> for i64 {
	fn from(value: UserStatus) -> Self {
		match value {
			UserStatus::Disabled => 0,
			UserStatus::Active => 1,
			UserStatus::Unknown(other) => other,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
	pub id: u64,

	/// Public identifier, preferred over `id` outside the backend.
	pub subject: String,

	#[serde(default)]
	pub username: String,

	#[serde(default)]
	pub nickname: String,

	/// Avatar URL.
	#[serde(default)]
	pub avatar: String,

	pub status: UserStatus,

	/// `user` or `admin`.
	#[serde(default)]
	pub role: String,

	/// ISO 8601.
	#[serde(default)]
	pub created_at: String,

	/// ISO 8601.
	#[serde(default)]
	pub updated_at: String,
}
