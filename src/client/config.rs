use std::fmt;

use super::{OAuth2Client, OAuth2ClientError};

/// Client configuration.
///
/// The five required fields must be non-empty. Base URLs may be given with or
/// without a trailing `/`; the client strips it when it takes ownership of the
/// configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
	/// Frontend site hosting the authorization consent page, e.g.
	/// `https://portal.example.com`.
	pub frontend_base_url: String,

	/// Authorization server API, e.g. `https://auth.example.com`.
	pub backend_base_url: String,

	pub client_id: String,

	pub client_secret: String,

	/// Callback URI registered for this client.
	pub redirect_uri: String,

	/// Signing secret of access tokens, enables offline verification.
	pub access_token_secret: Option<String>,

	/// Signing secret of refresh tokens, enables offline verification.
	pub refresh_token_secret: Option<String>,
}

impl Config {
	pub fn new(
		frontend_base_url: impl Into<String>,
		backend_base_url: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			frontend_base_url: frontend_base_url.into(),
			backend_base_url: backend_base_url.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_uri: redirect_uri.into(),
			access_token_secret: None,
			refresh_token_secret: None,
		}
	}

	pub fn with_access_token_secret(self, secret: impl Into<String>) -> Self {
		Self {
			access_token_secret: Some(secret.into()),
			..self
		}
	}

	pub fn with_refresh_token_secret(self, secret: impl Into<String>) -> Self {
		Self {
			refresh_token_secret: Some(secret.into()),
			..self
		}
	}

	/// Sets both token signing secrets.
	pub fn with_jwt_secrets(
		self,
		access_token_secret: impl Into<String>,
		refresh_token_secret: impl Into<String>,
	) -> Self {
		self.with_access_token_secret(access_token_secret)
			.with_refresh_token_secret(refresh_token_secret)
	}

	/// Checks that every required field is set.
	pub fn validate(&self) -> Result<(), OAuth2ClientError> {
		let required = [
			("frontend_base_url", &self.frontend_base_url),
			("backend_base_url", &self.backend_base_url),
			("client_id", &self.client_id),
			("client_secret", &self.client_secret),
			("redirect_uri", &self.redirect_uri),
		];

		for (name, value) in required {
			if value.is_empty() {
				return Err(OAuth2ClientError::MissingConfig(name));
			}
		}

		Ok(())
	}

	/// Strips one trailing `/` from both base URLs and drops empty secrets.
	pub(crate) fn normalize(mut self) -> Self {
		strip_trailing_slash(&mut self.frontend_base_url);
		strip_trailing_slash(&mut self.backend_base_url);
		self.access_token_secret = self.access_token_secret.filter(|s| !s.is_empty());
		self.refresh_token_secret = self.refresh_token_secret.filter(|s| !s.is_empty());
		self
	}

	pub(crate) fn has_jwt_secret(&self) -> bool {
		self.access_token_secret.is_some() || self.refresh_token_secret.is_some()
	}
}

fn strip_trailing_slash(url: &mut String) {
	if url.ends_with('/') {
		url.pop();
	}
}

impl OAuth2Client for Config {
	fn client_id(&self) -> &str {
		&self.client_id
	}

	fn client_secret(&self) -> &str {
		&self.client_secret
	}

	fn redirect_uri(&self) -> &str {
		&self.redirect_uri
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		const REDACTED: &str = "<redacted>";

		f.debug_struct("Config")
			.field("frontend_base_url", &self.frontend_base_url)
			.field("backend_base_url", &self.backend_base_url)
			.field("client_id", &self.client_id)
			.field("client_secret", &REDACTED)
			.field("redirect_uri", &self.redirect_uri)
			.field(
				"access_token_secret",
				&self.access_token_secret.as_ref().map(|_| REDACTED),
			)
			.field(
				"refresh_token_secret",
				&self.refresh_token_secret.as_ref().map(|_| REDACTED),
			)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> Config {
		Config::new(
			"https://portal.example.com/",
			"https://auth.example.com//",
			"client",
			"secret",
			"https://app.example.com/callback",
		)
	}

	#[test]
	fn valid_config() {
		assert!(config().validate().is_ok());
	}

	#[test]
	fn reports_first_missing_field() {
		let mut cfg = config();
		cfg.client_id.clear();
		cfg.redirect_uri.clear();

		assert!(matches!(
			cfg.validate(),
			Err(OAuth2ClientError::MissingConfig("client_id"))
		));
	}

	#[test]
	fn missing_frontend_base_url() {
		let mut cfg = config();
		cfg.frontend_base_url.clear();

		assert!(matches!(
			cfg.validate(),
			Err(OAuth2ClientError::MissingConfig("frontend_base_url"))
		));
	}

	#[test]
	fn strips_trailing_slash_once() {
		let cfg = config().normalize();
		assert_eq!(cfg.frontend_base_url, "https://portal.example.com");
		assert_eq!(cfg.backend_base_url, "https://auth.example.com/");
	}

	#[test]
	fn empty_secrets_are_ignored() {
		let cfg = config().with_jwt_secrets("", "").normalize();
		assert!(!cfg.has_jwt_secret());

		let cfg = config().with_refresh_token_secret("r").normalize();
		assert!(cfg.has_jwt_secret());
	}

	#[test]
	fn debug_redacts_secrets() {
		let cfg = config().with_access_token_secret("super-secret-value");
		let debug = format!("{cfg:?}");
		assert!(!debug.contains("super-secret-value"));
		assert!(!debug.contains("\"secret\""));
		assert!(debug.contains("client"));
	}
}
