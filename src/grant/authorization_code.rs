//! Authorization Code Grant.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
use serde::Serialize;

use crate::endpoints::token::{TokenRequest, TokenResponse};

/// Access Token Request exchanging an authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest<'a> {
	/// Authorization code received on the redirect URI.
	pub code: &'a str,

	/// Must be identical to the one used to obtain the code.
	pub redirect_uri: &'a str,
}

impl<'a> AuthorizationCodeTokenRequest<'a> {
	pub fn new(code: &'a str, redirect_uri: &'a str) -> Self {
		Self { code, redirect_uri }
	}
}

impl TokenRequest for AuthorizationCodeTokenRequest<'_> {
	type Response = TokenResponse;
}
