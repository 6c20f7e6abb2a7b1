use std::fmt;

use http::StatusCode;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// Error reported by the authorization server.
///
/// Every backend failure is normalized into this shape, whether it came as a
/// non-2xx response or as a 2xx envelope carrying a non-zero business code.
/// `code` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
	/// HTTP status of the response.
	pub status: StatusCode,

	/// Business or protocol error identifier.
	pub code: String,

	/// Human-readable description.
	pub detail: String,

	/// Problem type URI, only set for RFC 7807 problem documents.
	pub r#type: Option<String>,

	/// Problem title, only set for RFC 7807 problem documents.
	pub title: Option<String>,
}

impl ApiError {
	/// Creates an error, filling an empty `code` from the title, then the
	/// status text, then the numeric status.
	pub fn new(status: StatusCode, code: impl Into<String>, detail: impl Into<String>) -> Self {
		let mut error = Self {
			status,
			code: code.into(),
			detail: detail.into(),
			r#type: None,
			title: None,
		};
		error.fill_code();
		error
	}

	/// Error for a 2xx envelope whose business code is not `0`.
	pub fn business(status: StatusCode, code: i64, message: impl Into<String>) -> Self {
		Self::new(status, code.to_string(), message)
	}

	/// Normalizes an arbitrary backend error response.
	///
	/// Tries, in order, an RFC 7807 problem document, a legacy
	/// `{code, message}` body, and finally falls back on the status itself.
	pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
		if let Some(problem) = ProblemDetails::parse(body) {
			log::debug!("HTTP {status}: problem document error");
			return problem.into_api_error(status);
		}

		if let Some(legacy) = CodeMessage::parse(body) {
			log::debug!("HTTP {status}: legacy code/message error");
			return Self::new(status, legacy.code.to_string(), legacy.message);
		}

		log::debug!("HTTP {status}: unrecognized error body");
		Self::new(
			status,
			status_text(status),
			format!("request failed with HTTP {}", status.as_u16()),
		)
	}

	fn fill_code(&mut self) {
		if self.code.is_empty() {
			if let Some(title) = self.title.as_ref().filter(|t| !t.is_empty()) {
				self.code = title.clone();
			} else {
				self.code = status_text(self.status);
			}
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.detail.is_empty() {
			f.write_str(&self.code)
		} else {
			write!(f, "{}: {}", self.code, self.detail)
		}
	}
}

impl std::error::Error for ApiError {}

/// Canonical reason phrase of the status, or its number when it has none.
fn status_text(status: StatusCode) -> String {
	match status.canonical_reason() {
		Some(reason) => reason.to_owned(),
		None => status.as_str().to_owned(),
	}
}

/// RFC 7807 problem document.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7807>
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProblemDetails {
	#[serde_as(as = "DefaultOnNull")]
	r#type: String,

	#[serde_as(as = "DefaultOnNull")]
	title: String,

	#[serde_as(as = "DefaultOnNull")]
	code: String,

	#[serde_as(as = "DefaultOnNull")]
	detail: String,
}

impl ProblemDetails {
	/// Only accepts documents carrying at least one discriminating field, so
	/// unrelated JSON objects don't match.
	fn parse(body: &[u8]) -> Option<Self> {
		serde_json::from_slice::<Self>(body)
			.ok()
			.filter(|pd| !pd.code.is_empty() || !pd.title.is_empty() || !pd.detail.is_empty())
	}

	fn into_api_error(self, status: StatusCode) -> ApiError {
		let code = if self.code.is_empty() {
			self.title.clone()
		} else {
			self.code
		};

		let mut error = ApiError {
			status,
			code,
			detail: self.detail,
			r#type: Some(self.r#type).filter(|t| !t.is_empty()),
			title: Some(self.title).filter(|t| !t.is_empty()),
		};
		error.fill_code();
		error
	}
}

/// Legacy `{code, message}` error body.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CodeMessage {
	#[serde_as(as = "DefaultOnNull")]
	code: i64,

	#[serde_as(as = "DefaultOnNull")]
	message: String,
}

impl CodeMessage {
	fn parse(body: &[u8]) -> Option<Self> {
		serde_json::from_slice::<Self>(body)
			.ok()
			.filter(|cm| cm.code != 0 || !cm.message.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn problem_document_with_code() {
		let body = br#"{"type":"about:blank","title":"UNAUTHORIZED","status":401,"code":"INVALID_TOKEN","detail":"token expired"}"#;
		let error = ApiError::from_response(StatusCode::UNAUTHORIZED, body);

		assert_eq!(error.status, StatusCode::UNAUTHORIZED);
		assert_eq!(error.code, "INVALID_TOKEN");
		assert_eq!(error.detail, "token expired");
		assert_eq!(error.r#type.as_deref(), Some("about:blank"));
		assert_eq!(error.title.as_deref(), Some("UNAUTHORIZED"));
	}

	#[test]
	fn problem_document_falls_back_on_title() {
		let body = br#"{"type":"about:blank","title":"USER_NOT_FOUND","status":404,"detail":"no such user"}"#;
		let error = ApiError::from_response(StatusCode::NOT_FOUND, body);

		assert_eq!(error.code, "USER_NOT_FOUND");
		assert_eq!(error.detail, "no such user");
	}

	#[test]
	fn problem_document_with_null_fields() {
		let body = br#"{"type":null,"title":"UNAUTHORIZED","status":401,"code":null,"detail":"token expired"}"#;
		let error = ApiError::from_response(StatusCode::UNAUTHORIZED, body);

		assert_eq!(error.code, "UNAUTHORIZED");
		assert_eq!(error.detail, "token expired");
		assert_eq!(error.title.as_deref(), Some("UNAUTHORIZED"));
		assert!(error.r#type.is_none());
	}

	#[test]
	fn legacy_body_with_null_message() {
		let body = br#"{"code":1001,"message":null}"#;
		let error = ApiError::from_response(StatusCode::BAD_REQUEST, body);

		assert_eq!(error.code, "1001");
		assert!(error.detail.is_empty());
	}

	#[test]
	fn problem_document_with_detail_only() {
		let body = br#"{"detail":"something broke"}"#;
		let error = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, body);

		assert_eq!(error.code, "Internal Server Error");
		assert_eq!(error.detail, "something broke");
		assert!(error.title.is_none());
		assert!(error.r#type.is_none());
	}

	#[test]
	fn legacy_code_message() {
		let body = br#"{"code":1001,"message":"invalid client"}"#;
		let error = ApiError::from_response(StatusCode::BAD_REQUEST, body);

		assert_eq!(error.code, "1001");
		assert_eq!(error.detail, "invalid client");
		assert!(error.r#type.is_none());
	}

	#[test]
	fn legacy_message_with_zero_code() {
		let body = br#"{"code":0,"message":"bad request"}"#;
		let error = ApiError::from_response(StatusCode::BAD_REQUEST, body);

		assert_eq!(error.code, "0");
		assert_eq!(error.detail, "bad request");
	}

	#[test]
	fn unrelated_json_falls_back_on_status() {
		let body = br#"{"type":"about:blank","status":403}"#;
		let error = ApiError::from_response(StatusCode::FORBIDDEN, body);

		assert_eq!(error.code, "Forbidden");
		assert_eq!(error.detail, "request failed with HTTP 403");
	}

	#[test]
	fn success_flag_envelope_matches_on_message() {
		let body = br#"{"success":false,"message":"nope","data":null}"#;
		let error = ApiError::from_response(StatusCode::BAD_GATEWAY, body);

		// `message` alone is enough for the legacy shape.
		assert_eq!(error.code, "0");
		assert_eq!(error.detail, "nope");
	}

	#[test]
	fn non_json_body_falls_back_on_status() {
		let error = ApiError::from_response(StatusCode::SERVICE_UNAVAILABLE, b"<html>down</html>");
		assert_eq!(error.code, "Service Unavailable");
		assert_eq!(error.detail, "request failed with HTTP 503");

		let error = ApiError::from_response(StatusCode::BAD_GATEWAY, b"");
		assert_eq!(error.code, "Bad Gateway");
	}

	#[test]
	fn unknown_status_uses_number() {
		let status = StatusCode::from_u16(599).unwrap();
		let error = ApiError::from_response(status, b"[]");
		assert_eq!(error.code, "599");
	}

	#[test]
	fn code_is_never_empty() {
		let bodies: [&[u8]; 5] = [
			br#"{"title":"","code":"","detail":"d"}"#,
			br#"{"code":7,"message":""}"#,
			br#"{"code":0,"message":""}"#,
			b"null",
			b"not json",
		];

		for body in bodies {
			let error = ApiError::from_response(StatusCode::UNAUTHORIZED, body);
			assert!(!error.code.is_empty());
		}
	}

	#[test]
	fn business_error() {
		let error = ApiError::business(StatusCode::OK, 1001, "expired code");
		assert_eq!(error.status, StatusCode::OK);
		assert_eq!(error.code, "1001");
		assert_eq!(error.detail, "expired code");
	}

	#[test]
	fn display() {
		let error = ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "token expired");
		assert_eq!(error.to_string(), "UNAUTHORIZED: token expired");

		let error = ApiError::new(StatusCode::NOT_FOUND, "", "");
		assert_eq!(error.to_string(), "Not Found");
	}
}
