//! Token endpoint.
//!
//! Every grant is `POST`ed as a form, authenticated with HTTP Basic client
//! credentials, and answered with an enveloped token response.
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::{Endpoint, SendRequest, basic_auth_request_builder, finish_request},
	response::decode_envelope,
	transport::{HttpClient, WwwFormUrlEncoded},
};

pub struct TokenEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> Clone for TokenEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for TokenEndpoint<'a, C> {}

impl<'a, C> TokenEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}

	pub async fn send<T>(
		self,
		request: &T,
		http_client: &impl HttpClient,
	) -> Result<T::Response, OAuth2ClientError>
	where
		C: OAuth2Client,
		T: TokenRequest,
	{
		request.send(&self, http_client).await
	}
}

impl<'a, C> Endpoint for TokenEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

/// Form-encoded token request for a given grant type.
pub trait TokenRequest: Serialize {
	type Response: DeserializeOwned;
}

impl<'a, C, T> SendRequest<TokenEndpoint<'a, C>> for T
where
	C: OAuth2Client,
	T: TokenRequest,
{
	type ContentType = WwwFormUrlEncoded;
	type RequestBody<'b>
		= &'b T
	where
		Self: 'b;
	type Response = T::Response;

	fn build_request(
		&self,
		endpoint: &TokenEndpoint<'a, C>,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		finish_request(
			basic_auth_request_builder(endpoint, http::Method::POST)?,
			self,
		)
	}

	fn parse_response(
		&self,
		_endpoint: &TokenEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		decode_envelope(&response)
	}
}

/// Access token issued to an end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenInfo {
	/// Signed JWT.
	pub access_token: String,

	/// Lifetime in seconds.
	#[serde(default)]
	pub expires_in: u64,
}

/// Refresh token issued alongside an [`AccessTokenInfo`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenInfo {
	pub refresh_token: String,

	/// Lifetime in seconds.
	#[serde(default)]
	pub expires_in: u64,
}

/// Token response of the `authorization_code` and `refresh_token` grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	pub access_token: AccessTokenInfo,

	#[serde(default)]
	pub refresh_token: RefreshTokenInfo,

	/// Usually `Bearer`.
	#[serde(default)]
	pub token_type: String,

	#[serde(default)]
	pub scope: String,
}

/// Token response of the `client_credentials` grant.
///
/// There is no end user involved, hence no refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentialsTokenResponse {
	pub access_token: String,

	#[serde(default)]
	pub expires_in: u64,

	#[serde(default)]
	pub token_type: String,

	/// Granted scope, empty when none was requested.
	#[serde(default)]
	pub scope: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_response_without_refresh_token() {
		let response: TokenResponse = serde_json::from_str(
			r#"{"access_token":{"access_token":"t","expires_in":3600},"token_type":"Bearer"}"#,
		)
		.unwrap();

		assert_eq!(response.access_token.access_token, "t");
		assert_eq!(response.access_token.expires_in, 3600);
		assert!(response.refresh_token.refresh_token.is_empty());
		assert!(response.scope.is_empty());
	}

	#[test]
	fn client_credentials_response() {
		let response: ClientCredentialsTokenResponse = serde_json::from_str(
			r#"{"access_token":"t","expires_in":7200,"token_type":"Bearer","scope":""}"#,
		)
		.unwrap();

		assert_eq!(response.access_token, "t");
		assert_eq!(response.expires_in, 7200);
		assert_eq!(response.token_type, "Bearer");
	}
}
