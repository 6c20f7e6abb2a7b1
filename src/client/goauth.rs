use iref::UriBuf;

use crate::{
	endpoints::{
		AUTHORIZE_PATH, INTROSPECT_PATH, REVOKE_PATH, SendRequest, TOKEN_PATH, USERINFO_PATH,
		USERS_PATH,
		authorization::{AuthorizationEndpoint, AuthorizationRequest},
		introspection::{
			IntrospectionEndpoint, IntrospectionRequest, IntrospectionResponse, TokenTypeHint,
		},
		revocation::{RevocationEndpoint, RevocationRequest},
		token::{ClientCredentialsTokenResponse, TokenEndpoint, TokenResponse},
		userinfo::{UserInfo, UserInfoEndpoint, UserInfoRequest},
		users::{UserDetail, UserEndpoint, UserRef, UserRequest},
	},
	grant::{
		authorization_code::AuthorizationCodeTokenRequest,
		client_credentials::ClientCredentialsTokenRequest, refresh_token::RefreshTokenRequest,
	},
	jwt::{Claims, JwtVerifier},
	transport::HttpClient,
};

use super::{Config, OAuth2ClientError};

/// Client of the authorization server.
///
/// Holds the normalized configuration, the HTTP transport and, when a token
/// secret is configured, an offline [`JwtVerifier`]. Every operation performs
/// at most one HTTP request and never retries. The client keeps no state
/// between calls and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client<H> {
	config: Config,
	http_client: H,
	jwt_verifier: Option<JwtVerifier>,
}

#[cfg(feature = "reqwest")]
impl Client<reqwest::Client> {
	/// Creates a client with a default [`reqwest::Client`] transport.
	pub fn new(config: Config) -> Result<Self, OAuth2ClientError> {
		Self::with_http_client(config, reqwest::Client::new())
	}
}

impl<H> Client<H> {
	/// Creates a client sending requests through `http_client`.
	///
	/// Fails if a required configuration field is empty.
	pub fn with_http_client(config: Config, http_client: H) -> Result<Self, OAuth2ClientError> {
		config.validate()?;
		let config = config.normalize();

		let jwt_verifier = if config.has_jwt_secret() {
			Some(JwtVerifier::new(
				config.access_token_secret.as_deref(),
				config.refresh_token_secret.as_deref(),
			)?)
		} else {
			None
		};

		log::debug!(
			"client `{}` configured for {} (offline verification: {})",
			config.client_id,
			config.backend_base_url,
			jwt_verifier.is_some()
		);

		Ok(Self {
			config,
			http_client,
			jwt_verifier,
		})
	}

	/// Normalized configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn http_client(&self) -> &H {
		&self.http_client
	}

	/// Offline verifier, present only if a token secret was configured.
	pub fn jwt_verifier(&self) -> Option<&JwtVerifier> {
		self.jwt_verifier.as_ref()
	}

	/// Builds the URI the user-agent must be redirected to in order to
	/// authorize this client.
	///
	/// `state` and `scope` are left out of the query when empty.
	pub fn build_authorization_url(
		&self,
		state: Option<&str>,
		scope: Option<&str>,
	) -> Result<UriBuf, OAuth2ClientError> {
		let uri = self.frontend_uri(AUTHORIZE_PATH);
		AuthorizationEndpoint::new(&self.config, &uri)
			.redirect_uri(&AuthorizationRequest::new(state, scope))
	}

	/// Verifies an access token offline.
	pub fn parse_access_token(&self, token: &str) -> Result<Claims, OAuth2ClientError> {
		require("token", token)?;
		self.verifier()?.parse_access_token(token)
	}

	/// Verifies a refresh token offline.
	pub fn parse_refresh_token(&self, token: &str) -> Result<Claims, OAuth2ClientError> {
		require("token", token)?;
		self.verifier()?.parse_refresh_token(token)
	}

	/// Checks that a token verifies under either configured secret.
	pub fn validate_token(&self, token: &str) -> Result<(), OAuth2ClientError> {
		require("token", token)?;
		self.verifier()?.validate_token(token)
	}

	fn verifier(&self) -> Result<&JwtVerifier, OAuth2ClientError> {
		self.jwt_verifier
			.as_ref()
			.ok_or(OAuth2ClientError::JwtNotConfigured)
	}

	fn frontend_uri(&self, path: &str) -> String {
		format!("{}{path}", self.config.frontend_base_url)
	}

	fn backend_uri(&self, path: &str) -> String {
		format!("{}{path}", self.config.backend_base_url)
	}
}

impl<H: HttpClient> Client<H> {
	/// Exchanges an authorization code for a token pair.
	pub async fn exchange_token(&self, code: &str) -> Result<TokenResponse, OAuth2ClientError> {
		require("code", code)?;

		let uri = self.backend_uri(TOKEN_PATH);
		self.dispatch(
			&TokenEndpoint::new(&self.config, &uri),
			&AuthorizationCodeTokenRequest::new(code, &self.config.redirect_uri),
		)
		.await
	}

	/// Obtains a new token pair from a refresh token.
	pub async fn refresh_token(
		&self,
		refresh_token: &str,
	) -> Result<TokenResponse, OAuth2ClientError> {
		require("refresh_token", refresh_token)?;

		let uri = self.backend_uri(TOKEN_PATH);
		self.dispatch(
			&TokenEndpoint::new(&self.config, &uri),
			&RefreshTokenRequest::new(refresh_token),
		)
		.await
	}

	/// Obtains an access token for the client itself.
	pub async fn client_credentials_token(
		&self,
		scope: Option<&str>,
	) -> Result<ClientCredentialsTokenResponse, OAuth2ClientError> {
		let uri = self.backend_uri(TOKEN_PATH);
		self.dispatch(
			&TokenEndpoint::new(&self.config, &uri),
			&ClientCredentialsTokenRequest::new(scope),
		)
		.await
	}

	pub async fn introspect_token(
		&self,
		token: &str,
	) -> Result<IntrospectionResponse, OAuth2ClientError> {
		self.introspect_token_with_hint(token, None).await
	}

	/// Asks the server whether `token` is active.
	///
	/// An unknown or expired token is not an error: the response is simply
	/// inactive.
	pub async fn introspect_token_with_hint(
		&self,
		token: &str,
		token_type_hint: Option<TokenTypeHint>,
	) -> Result<IntrospectionResponse, OAuth2ClientError> {
		require("token", token)?;

		let uri = self.backend_uri(INTROSPECT_PATH);
		self.dispatch(
			&IntrospectionEndpoint::new(&self.config, &uri),
			&IntrospectionRequest::new(token, token_type_hint),
		)
		.await
	}

	pub async fn revoke_token(&self, token: &str) -> Result<(), OAuth2ClientError> {
		self.revoke_token_with_hint(token, None).await
	}

	/// Revokes `token`.
	///
	/// Succeeds on any `200 OK`, including for tokens the server does not
	/// know about.
	pub async fn revoke_token_with_hint(
		&self,
		token: &str,
		token_type_hint: Option<TokenTypeHint>,
	) -> Result<(), OAuth2ClientError> {
		require("token", token)?;

		let uri = self.backend_uri(REVOKE_PATH);
		self.dispatch(
			&RevocationEndpoint::new(&self.config, &uri),
			&RevocationRequest::new(token, token_type_hint),
		)
		.await
	}

	/// Profile of the user `access_token` was issued to.
	pub async fn user_info(&self, access_token: &str) -> Result<UserInfo, OAuth2ClientError> {
		require("access_token", access_token)?;

		let uri = self.backend_uri(USERINFO_PATH);
		self.dispatch(
			&UserInfoEndpoint::new(&self.config, &uri),
			&UserInfoRequest::new(access_token),
		)
		.await
	}

	/// Looks a user up by numeric id.
	pub async fn get_user(
		&self,
		access_token: &str,
		user_id: u64,
	) -> Result<UserDetail, OAuth2ClientError> {
		require("access_token", access_token)?;

		if user_id == 0 {
			return Err(OAuth2ClientError::MissingArgument("user_id"));
		}

		self.send_user_request(access_token, UserRef::Id(user_id))
			.await
	}

	/// Looks a user up by subject identifier.
	pub async fn get_user_by_subject(
		&self,
		access_token: &str,
		sub: &str,
	) -> Result<UserDetail, OAuth2ClientError> {
		require("access_token", access_token)?;
		require("sub", sub)?;

		self.send_user_request(access_token, UserRef::Subject(sub))
			.await
	}

	async fn send_user_request(
		&self,
		access_token: &str,
		user: UserRef<'_>,
	) -> Result<UserDetail, OAuth2ClientError> {
		let uri = self.backend_uri(USERS_PATH);
		self.dispatch(
			&UserEndpoint::new(&self.config, &uri),
			&UserRequest::new(access_token, user),
		)
		.await
	}

	/// Encodes `request`, sends it and parses the response.
	///
	/// Only the transport future is awaited, so the call stays `Send`
	/// whenever `H` is `Sync`.
	async fn dispatch<E, R>(
		&self,
		endpoint: &E,
		request: &R,
	) -> Result<R::Response, OAuth2ClientError>
	where
		R: SendRequest<E>,
	{
		let http_request = request.encode_request(endpoint)?;
		let response = self.http_client.send(http_request).await?;
		request.parse_response(endpoint, response)
	}
}

fn require(name: &'static str, value: &str) -> Result<(), OAuth2ClientError> {
	if value.is_empty() {
		Err(OAuth2ClientError::MissingArgument(name))
	} else {
		Ok(())
	}
}
