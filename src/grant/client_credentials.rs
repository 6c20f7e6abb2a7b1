//! Client Credentials Grant.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.4.2>
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::endpoints::token::{ClientCredentialsTokenResponse, TokenRequest};

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "client_credentials")]
pub struct ClientCredentialsTokenRequest<'a> {
	/// Space-separated scope, omitted from the form when `None`.
	pub scope: Option<&'a str>,
}

impl<'a> ClientCredentialsTokenRequest<'a> {
	/// An empty scope is the same as no scope.
	pub fn new(scope: Option<&'a str>) -> Self {
		Self {
			scope: scope.filter(|s| !s.is_empty()),
		}
	}
}

impl TokenRequest for ClientCredentialsTokenRequest<'_> {
	type Response = ClientCredentialsTokenResponse;
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::transport::{ContentType, WwwFormUrlEncoded};

	fn form(request: &ClientCredentialsTokenRequest) -> BTreeMap<String, String> {
		let body = WwwFormUrlEncoded::encode(request).unwrap();
		serde_html_form::from_bytes(&body).unwrap()
	}

	#[test]
	fn with_scope() {
		let form = form(&ClientCredentialsTokenRequest::new(Some("read write")));
		assert_eq!(form["grant_type"], "client_credentials");
		assert_eq!(form["scope"], "read write");
	}

	#[test]
	fn empty_scope_is_omitted() {
		for scope in [None, Some("")] {
			let form = form(&ClientCredentialsTokenRequest::new(scope));
			assert_eq!(form.len(), 1);
			assert!(!form.contains_key("scope"));
		}
	}
}
