//! Client facade, configuration and error types.
use crate::response::ApiError;

mod config;
mod goauth;


pub use config::*;
pub use goauth::*;

/// Registered client credentials, as seen by the request builders.
pub trait OAuth2Client {
	fn client_id(&self) -> &str;

	fn client_secret(&self) -> &str;

	fn redirect_uri(&self) -> &str;
}

impl<T: OAuth2Client> OAuth2Client for &T {
	fn client_id(&self) -> &str {
		T::client_id(*self)
	}

	fn client_secret(&self) -> &str {
		T::client_secret(*self)
	}

	fn redirect_uri(&self) -> &str {
		T::redirect_uri(*self)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum OAuth2ClientError {
	#[error("invalid configuration: {0} is required")]
	MissingConfig(&'static str),

	#[error("{0} is required")]
	MissingArgument(&'static str),

	#[error("invalid URI: `{0}`")]
	InvalidUri(String),

	#[error("unable to send request: {0}")]
	Request(String),

	#[error("unable to receive response: {0}")]
	Response(String),

	#[error("unable to decode response: {message} (body: {preview})")]
	Decode { message: String, preview: String },

	#[error(transparent)]
	Api(#[from] ApiError),

	#[error(
		"offline token verification is not configured: access_token_secret or refresh_token_secret is required"
	)]
	JwtNotConfigured,

	#[error("invalid token: {0}")]
	InvalidToken(#[from] jsonwebtoken::errors::Error),

	#[error("unexpected token type: expected `{expected}`, found `{found}`")]
	TokenTypeMismatch {
		expected: &'static str,
		found: String,
	},
}

impl OAuth2ClientError {
	pub fn request(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("request error: {msg}");
		Self::Request(msg)
	}

	pub fn response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response error: {msg}");
		Self::Response(msg)
	}

	/// Builds a decode error, keeping a bounded preview of the offending body.
	///
	/// The body may carry tokens, so only the decoder message is logged.
	pub fn decode(e: impl ToString, body: &[u8]) -> Self {
		let message = e.to_string();
		log::debug!("unable to decode response: {message} ({} bytes)", body.len());
		Self::Decode {
			message,
			preview: crate::response::preview_body(body),
		}
	}

	/// Returns the normalized backend error, if this is one.
	pub fn api_error(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}

	/// Returns `true` if offline verification was requested without the
	/// matching secret.
	pub fn is_not_configured(&self) -> bool {
		matches!(self, Self::JwtNotConfigured)
	}
}
