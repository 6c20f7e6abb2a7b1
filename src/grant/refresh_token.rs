//! Refreshing an Access Token.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-6>
use serde::Serialize;

use crate::endpoints::token::{TokenRequest, TokenResponse};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "refresh_token")]
pub struct RefreshTokenRequest<'a> {
	pub refresh_token: &'a str,
}

impl<'a> RefreshTokenRequest<'a> {
	pub fn new(refresh_token: &'a str) -> Self {
		Self { refresh_token }
	}
}

impl TokenRequest for RefreshTokenRequest<'_> {
	type Response = TokenResponse;
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::transport::{ContentType, WwwFormUrlEncoded};

	#[test]
	fn form_fields() {
		let body = WwwFormUrlEncoded::encode(&RefreshTokenRequest::new("r")).unwrap();

		let form: BTreeMap<String, String> = serde_html_form::from_bytes(&body).unwrap();
		assert_eq!(form.len(), 2);
		assert_eq!(form["grant_type"], "refresh_token");
		assert_eq!(form["refresh_token"], "r");
	}
}
