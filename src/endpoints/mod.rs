//! Backend endpoints and the request/response plumbing they share.
use http::header;
use serde::Serialize;

use crate::{
	client::{OAuth2Client, OAuth2ClientError},
	transport::{APPLICATION_JSON, ContentType, HttpClient, basic_auth},
};

pub mod authorization;
pub mod introspection;
pub mod revocation;
pub mod token;
pub mod userinfo;
pub mod users;

/// Authorization page, relative to the frontend base URL.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Token endpoint, relative to the backend base URL.
pub const TOKEN_PATH: &str = "/api/v1/oauth/token";

/// Introspection endpoint, relative to the backend base URL.
pub const INTROSPECT_PATH: &str = "/api/v1/oauth/introspect";

/// Revocation endpoint, relative to the backend base URL.
pub const REVOKE_PATH: &str = "/api/v1/oauth/revoke";

/// User-info endpoint, relative to the backend base URL.
pub const USERINFO_PATH: &str = "/api/v1/oauth/userinfo";

/// User lookups, relative to the backend base URL.
pub const USERS_PATH: &str = "/api/v1/users";

pub trait Endpoint {
	type Client;

	fn client(&self) -> &Self::Client;

	fn uri(&self) -> &str;
}

/// Request that can be sent to the endpoint `E`.
pub trait SendRequest<E>: Sized {
	type ContentType: ContentType;

	type RequestBody<'b>: Serialize
	where
		Self: 'b;

	type Response;

	/// Builds the request, without `Content-Type` and `Accept` headers.
	fn build_request(
		&self,
		endpoint: &E,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError>;

	fn parse_response(
		&self,
		endpoint: &E,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError>;

	/// Builds the request and encodes its body with [`Self::ContentType`].
	fn encode_request(&self, endpoint: &E) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
		let (mut parts, body) = self.build_request(endpoint)?.into_parts();

		if let Some(value) = <Self::ContentType as ContentType>::VALUE {
			parts.headers.insert(header::CONTENT_TYPE, value);
		}

		parts.headers.insert(header::ACCEPT, APPLICATION_JSON);

		let body = <Self::ContentType as ContentType>::encode(&body)?;
		Ok(http::Request::from_parts(parts, body))
	}

	#[allow(async_fn_in_trait)]
	async fn send(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
	) -> Result<Self::Response, OAuth2ClientError> {
		let request = self.encode_request(endpoint)?;
		let response = http_client.send(request).await?;
		self.parse_response(endpoint, response)
	}
}

/// Starts a request to `uri`, mapping a malformed URI to
/// [`OAuth2ClientError::InvalidUri`].
pub(crate) fn request_builder(
	method: http::Method,
	uri: &str,
) -> Result<http::request::Builder, OAuth2ClientError> {
	let uri: http::Uri = uri
		.parse()
		.map_err(|_| OAuth2ClientError::InvalidUri(uri.to_owned()))?;

	Ok(http::Request::builder().method(method).uri(uri))
}

/// Starts a request to the endpoint, authenticated with the client's HTTP
/// Basic credentials.
pub(crate) fn basic_auth_request_builder<E>(
	endpoint: &E,
	method: http::Method,
) -> Result<http::request::Builder, OAuth2ClientError>
where
	E: Endpoint,
	E::Client: OAuth2Client,
{
	let client = endpoint.client();
	let authorization = basic_auth(client.client_id(), client.client_secret())?;

	Ok(request_builder(method, endpoint.uri())?.header(header::AUTHORIZATION, authorization))
}

/// Finishes a request started by [`request_builder`].
pub(crate) fn finish_request<T>(
	builder: http::request::Builder,
	body: T,
) -> Result<http::Request<T>, OAuth2ClientError> {
	builder.body(body).map_err(OAuth2ClientError::request)
}
