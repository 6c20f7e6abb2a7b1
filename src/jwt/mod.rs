//! Offline verification of tokens issued by the backend.
//!
//! Access and refresh tokens are HS256 JWTs signed with two distinct secrets.
//! Holding those secrets lets a resource server check tokens without an
//! introspection round-trip.
use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::client::OAuth2ClientError;

/// `token_type` claim of access tokens.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// `token_type` claim of refresh tokens.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Claims of a verified token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
	/// Subject.
	#[serde(default)]
	pub sub: String,

	/// `access` or `refresh`, when the issuer sets it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,

	/// Expiration time, in Unix seconds.
	pub exp: i64,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iat: Option<i64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nbf: Option<i64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jti: Option<String>,

	/// Any other claim.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

/// HS256 token verifier.
///
/// Built from at least one of the access and refresh token secrets. Parsing a
/// token whose secret is missing fails with
/// [`OAuth2ClientError::JwtNotConfigured`].
#[derive(Clone)]
pub struct JwtVerifier {
	access: Option<DecodingKey>,
	refresh: Option<DecodingKey>,
	validation: Validation,
}

impl JwtVerifier {
	pub fn new(
		access_token_secret: Option<&str>,
		refresh_token_secret: Option<&str>,
	) -> Result<Self, OAuth2ClientError> {
		let access = access_token_secret
			.filter(|s| !s.is_empty())
			.map(|s| DecodingKey::from_secret(s.as_bytes()));
		let refresh = refresh_token_secret
			.filter(|s| !s.is_empty())
			.map(|s| DecodingKey::from_secret(s.as_bytes()));

		if access.is_none() && refresh.is_none() {
			return Err(OAuth2ClientError::JwtNotConfigured);
		}

		let mut validation = Validation::new(Algorithm::HS256);
		validation.validate_aud = false;

		Ok(Self {
			access,
			refresh,
			validation,
		})
	}

	pub fn has_access_secret(&self) -> bool {
		self.access.is_some()
	}

	pub fn has_refresh_secret(&self) -> bool {
		self.refresh.is_some()
	}

	/// Verifies an access token.
	pub fn parse_access_token(&self, token: &str) -> Result<Claims, OAuth2ClientError> {
		self.parse(token, self.access.as_ref(), ACCESS_TOKEN_TYPE)
	}

	/// Verifies a refresh token.
	pub fn parse_refresh_token(&self, token: &str) -> Result<Claims, OAuth2ClientError> {
		self.parse(token, self.refresh.as_ref(), REFRESH_TOKEN_TYPE)
	}

	/// Accepts a token verifying under either configured secret, whatever its
	/// type.
	pub fn validate_token(&self, token: &str) -> Result<(), OAuth2ClientError> {
		if token.is_empty() {
			return Err(OAuth2ClientError::MissingArgument("token"));
		}

		let mut last_error = OAuth2ClientError::JwtNotConfigured;

		for key in [self.access.as_ref(), self.refresh.as_ref()].into_iter().flatten() {
			match self.verify(token, key) {
				Ok(_) => return Ok(()),
				Err(e) => last_error = e,
			}
		}

		Err(last_error)
	}

	fn parse(
		&self,
		token: &str,
		key: Option<&DecodingKey>,
		expected: &'static str,
	) -> Result<Claims, OAuth2ClientError> {
		if token.is_empty() {
			return Err(OAuth2ClientError::MissingArgument("token"));
		}

		let key = key.ok_or(OAuth2ClientError::JwtNotConfigured)?;
		let claims = self.verify(token, key)?;

		match claims.token_type.as_deref() {
			Some(found) if found != expected => Err(OAuth2ClientError::TokenTypeMismatch {
				expected,
				found: found.to_owned(),
			}),
			_ => Ok(claims),
		}
	}

	fn verify(&self, token: &str, key: &DecodingKey) -> Result<Claims, OAuth2ClientError> {
		decode::<Claims>(token, key, &self.validation)
			.map(|data| data.claims)
			.map_err(|e| {
				log::debug!("token verification failed: {e}");
				OAuth2ClientError::InvalidToken(e)
			})
	}
}

impl fmt::Debug for JwtVerifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JwtVerifier")
			.field("access", &self.access.is_some())
			.field("refresh", &self.refresh.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::time::{SystemTime, UNIX_EPOCH};

	use jsonwebtoken::{EncodingKey, Header, encode};
	use serde_json::json;

	use super::*;

	const ACCESS_SECRET: &str = "access-secret";
	const REFRESH_SECRET: &str = "refresh-secret";

	fn now() -> i64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.unwrap()
			.as_secs() as i64
	}

	fn mint(secret: &str, claims: serde_json::Value) -> String {
		encode(
			&Header::default(),
			&claims,
			&EncodingKey::from_secret(secret.as_bytes()),
		)
		.unwrap()
	}

	fn verifier() -> JwtVerifier {
		JwtVerifier::new(Some(ACCESS_SECRET), Some(REFRESH_SECRET)).unwrap()
	}

	#[test]
	fn requires_a_secret() {
		assert!(matches!(
			JwtVerifier::new(None, Some("")),
			Err(OAuth2ClientError::JwtNotConfigured)
		));
	}

	#[test]
	fn parse_access_token() {
		let token = mint(
			ACCESS_SECRET,
			json!({ "sub": "42", "token_type": "access", "exp": now() + 3600, "role": "admin" }),
		);

		let claims = verifier().parse_access_token(&token).unwrap();
		assert_eq!(claims.sub, "42");
		assert_eq!(claims.token_type.as_deref(), Some("access"));
		assert_eq!(claims.extra["role"], "admin");
	}

	#[test]
	fn token_without_type_claim_is_accepted() {
		let token = mint(REFRESH_SECRET, json!({ "sub": "42", "exp": now() + 3600 }));
		assert!(verifier().parse_refresh_token(&token).is_ok());
	}

	#[test]
	fn wrong_secret_is_invalid() {
		let token = mint(REFRESH_SECRET, json!({ "sub": "42", "exp": now() + 3600 }));
		assert!(matches!(
			verifier().parse_access_token(&token),
			Err(OAuth2ClientError::InvalidToken(_))
		));
	}

	#[test]
	fn type_mismatch() {
		// Same secret for both, so only the claim tells them apart.
		let verifier = JwtVerifier::new(Some("shared"), Some("shared")).unwrap();
		let token = mint("shared", json!({ "sub": "42", "token_type": "refresh", "exp": now() + 3600 }));

		match verifier.parse_access_token(&token) {
			Err(OAuth2ClientError::TokenTypeMismatch { expected, found }) => {
				assert_eq!(expected, "access");
				assert_eq!(found, "refresh");
			}
			other => panic!("unexpected result: {other:?}"),
		}

		assert!(verifier.parse_refresh_token(&token).is_ok());
	}

	#[test]
	fn expired_token() {
		let token = mint(ACCESS_SECRET, json!({ "sub": "42", "exp": now() - 3600 }));
		assert!(matches!(
			verifier().parse_access_token(&token),
			Err(OAuth2ClientError::InvalidToken(_))
		));
	}

	#[test]
	fn missing_secret() {
		let verifier = JwtVerifier::new(Some(ACCESS_SECRET), None).unwrap();
		let token = mint(REFRESH_SECRET, json!({ "sub": "42", "exp": now() + 3600 }));

		assert!(
			verifier
				.parse_refresh_token(&token)
				.unwrap_err()
				.is_not_configured()
		);
	}

	#[test]
	fn validate_either_secret() {
		let verifier = verifier();
		let access = mint(ACCESS_SECRET, json!({ "sub": "1", "exp": now() + 60 }));
		let refresh = mint(REFRESH_SECRET, json!({ "sub": "1", "exp": now() + 60 }));
		let other = mint("other", json!({ "sub": "1", "exp": now() + 60 }));

		assert!(verifier.validate_token(&access).is_ok());
		assert!(verifier.validate_token(&refresh).is_ok());
		assert!(matches!(
			verifier.validate_token(&other),
			Err(OAuth2ClientError::InvalidToken(_))
		));
		assert!(matches!(
			verifier.validate_token(""),
			Err(OAuth2ClientError::MissingArgument("token"))
		));
	}
}
