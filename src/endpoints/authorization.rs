//! Authorization page of the frontend.
//!
//! No request is sent: the user-agent is redirected to the URI built here.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
use iref::UriBuf;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::Endpoint,
	util::extend_uri_query,
};

pub struct AuthorizationEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> AuthorizationEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Clone for AuthorizationEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for AuthorizationEndpoint<'a, C> {}

impl<'a, C> Endpoint for AuthorizationEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}

	fn uri(&self) -> &str {
		self.uri
	}
}

impl<'a, C: OAuth2Client> AuthorizationEndpoint<'a, C> {
	/// Builds the redirect URI for the given request.
	pub fn redirect_uri(&self, request: &AuthorizationRequest) -> Result<UriBuf, OAuth2ClientError> {
		let mut uri = UriBuf::new(self.uri().as_bytes().to_vec())
			.map_err(|_| OAuth2ClientError::InvalidUri(self.uri().to_owned()))?;

		extend_uri_query(
			&mut uri,
			AuthorizationParams {
				response_type: "code",
				client_id: self.client().client_id(),
				redirect_uri: self.client().redirect_uri(),
				scope: request.scope,
				state: request.state,
			},
		)?;

		Ok(uri)
	}
}

/// Authorization Request.
///
/// Empty values are treated as absent and left out of the query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationRequest<'a> {
	/// Space-separated scope.
	pub scope: Option<&'a str>,

	/// Opaque value echoed back on the redirect URI, used against CSRF.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
	pub state: Option<&'a str>,
}

impl<'a> AuthorizationRequest<'a> {
	pub fn new(state: Option<&'a str>, scope: Option<&'a str>) -> Self {
		Self {
			scope: scope.filter(|s| !s.is_empty()),
			state: state.filter(|s| !s.is_empty()),
		}
	}
}

#[skip_serializing_none]
#[derive(Serialize)]
struct AuthorizationParams<'a> {
	response_type: &'a str,
	client_id: &'a str,
	redirect_uri: &'a str,
	scope: Option<&'a str>,
	state: Option<&'a str>,
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;

	struct TestClient;

	impl OAuth2Client for TestClient {
		fn client_id(&self) -> &str {
			"my-client"
		}

		fn client_secret(&self) -> &str {
			"secret"
		}

		fn redirect_uri(&self) -> &str {
			"https://app.example.com/callback?x=1"
		}
	}

	fn query(uri: &UriBuf) -> BTreeMap<String, String> {
		serde_html_form::from_str(uri.query().unwrap().as_str()).unwrap()
	}

	#[test]
	fn full_request() {
		let endpoint = AuthorizationEndpoint::new(&TestClient, "https://auth.example.com/oauth/authorize");
		let uri = endpoint
			.redirect_uri(&AuthorizationRequest::new(Some("xyz"), Some("read write")))
			.unwrap();

		assert!(uri.as_str().starts_with("https://auth.example.com/oauth/authorize?"));

		let query = query(&uri);
		assert_eq!(query["response_type"], "code");
		assert_eq!(query["client_id"], "my-client");
		assert_eq!(query["redirect_uri"], "https://app.example.com/callback?x=1");
		assert_eq!(query["scope"], "read write");
		assert_eq!(query["state"], "xyz");
	}

	#[test]
	fn empty_scope_and_state_are_omitted() {
		let endpoint = AuthorizationEndpoint::new(&TestClient, "https://auth.example.com/oauth/authorize");
		let uri = endpoint
			.redirect_uri(&AuthorizationRequest::new(Some(""), Some("")))
			.unwrap();

		let query = query(&uri);
		assert_eq!(query.len(), 3);
		assert!(!query.contains_key("scope"));
		assert!(!query.contains_key("state"));
	}

	#[test]
	fn malformed_base() {
		let endpoint = AuthorizationEndpoint::new(&TestClient, "not a uri/oauth/authorize");
		assert!(matches!(
			endpoint.redirect_uri(&AuthorizationRequest::default()),
			Err(OAuth2ClientError::InvalidUri(_))
		));
	}
}
