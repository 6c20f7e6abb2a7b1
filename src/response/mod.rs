//! Backend response decoding.
//!
//! Successful responses are wrapped in a generic envelope:
//!
//! ```json
//! { "code": 0, "message": "", "data": { ... } }
//! ```
//!
//! A non-zero `code` is a business failure even when the HTTP status is 2xx.
//! Non-2xx responses are normalized by [`ApiError::from_response`].
use http::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};
use serde_with::{DefaultOnNull, serde_as};

use crate::client::OAuth2ClientError;

mod error;

pub use error::*;

/// Maximum number of body bytes kept in decode error messages.
pub const BODY_PREVIEW_LEN: usize = 200;

/// Generic `{code, message, data}` envelope.
///
/// `data` is kept as raw JSON until the business code is known, so failure
/// envelopes without a payload still decode. `null` scalars read as their
/// default.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Envelope {
	#[serde_as(as = "DefaultOnNull")]
	pub code: i64,

	#[serde_as(as = "DefaultOnNull")]
	#[serde(default)]
	pub message: String,

	#[serde(default)]
	pub data: Option<serde_json::Value>,
}

impl Envelope {
	/// Unwraps the payload, turning a non-zero code into a business error.
	pub fn into_data<T: DeserializeOwned>(
		self,
		status: StatusCode,
		body: &[u8],
	) -> Result<T, OAuth2ClientError> {
		if self.code != 0 {
			return Err(ApiError::business(status, self.code, self.message).into());
		}

		let data = self.data.unwrap_or(serde_json::Value::Null);
		serde_json::from_value(data).map_err(|e| OAuth2ClientError::decode(e, body))
	}
}

/// Decodes an enveloped response into its payload.
///
/// Non-2xx responses are normalized into an [`ApiError`] without looking for
/// an envelope.
pub fn decode_envelope<T: DeserializeOwned>(
	response: &http::Response<Vec<u8>>,
) -> Result<T, OAuth2ClientError> {
	let status = response.status();
	let body = response.body();

	if !status.is_success() {
		return Err(ApiError::from_response(status, body).into());
	}

	let envelope: Envelope =
		serde_json::from_slice(body).map_err(|e| OAuth2ClientError::decode(e, body))?;

	envelope.into_data(status, body)
}

/// Accepts exactly the given status, ignoring the body.
pub fn expect_status(
	response: &http::Response<Vec<u8>>,
	expected: StatusCode,
) -> Result<(), OAuth2ClientError> {
	let status = response.status();

	if status != expected {
		return Err(ApiError::from_response(status, response.body()).into());
	}

	Ok(())
}

/// Lossy UTF-8 rendering of the body, cut after [`BODY_PREVIEW_LEN`] bytes.
pub fn preview_body(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	if text.len() <= BODY_PREVIEW_LEN {
		return text.into_owned();
	}

	let mut end = BODY_PREVIEW_LEN;
	while !text.is_char_boundary(end) {
		end -= 1;
	}

	format!("{}...", &text[..end])
}
