//! URI query string utilities.
use iref::{
	UriBuf,
	uri::{Query, QueryBuf},
};
use serde::Serialize;

use crate::client::OAuth2ClientError;

/// Extends the query parameters of a URI by serializing `value` as
/// `application/x-www-form-urlencoded` and appending the result.
///
/// Existing query parameters on the URI are preserved.
pub fn extend_uri_query<T: Serialize>(uri: &mut UriBuf, value: T) -> Result<(), OAuth2ClientError> {
	let query = serialize_concat_query(
		uri.query().map(ToOwned::to_owned).unwrap_or_default(),
		value,
	)?;

	if !query.is_empty() {
		uri.set_query(Some(&query));
	}

	Ok(())
}

/// Serializes `value` as form-urlencoded data and concatenates it with the
/// existing query string.
pub fn serialize_concat_query<T>(query: QueryBuf, value: T) -> Result<QueryBuf, OAuth2ClientError>
where
	T: Serialize,
{
	let encoded = serde_html_form::to_string(value).map_err(OAuth2ClientError::request)?;
	let other = QueryBuf::new(encoded.into_bytes())
		.map_err(|_| OAuth2ClientError::request("form encoder produced an invalid query"))?;

	concat_query(query, &other)
}

/// Concatenates two query strings with `&` as separator.
///
/// If either query is empty, the other is returned as-is without a
/// separator.
pub fn concat_query(query: QueryBuf, other: &Query) -> Result<QueryBuf, OAuth2ClientError> {
	if query.is_empty() {
		return Ok(other.to_owned());
	}

	if other.is_empty() {
		return Ok(query);
	}

	let joined = format!("{}&{}", query.as_str(), other.as_str());

	QueryBuf::new(joined.clone().into_bytes()).map_err(|_| OAuth2ClientError::InvalidUri(joined))
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use serde_with::skip_serializing_none;

	use super::*;

	#[skip_serializing_none]
	#[derive(Serialize)]
	struct Params<'a> {
		a: &'a str,
		b: Option<&'a str>,
	}

	#[test]
	fn extend_empty_query() {
		let mut uri = UriBuf::new(b"https://example.com/path".to_vec()).unwrap();
		extend_uri_query(&mut uri, Params { a: "1 2", b: None }).unwrap();
		assert_eq!(uri.as_str(), "https://example.com/path?a=1+2");
	}

	#[test]
	fn extend_existing_query() {
		let mut uri = UriBuf::new(b"https://example.com/path?x=y".to_vec()).unwrap();
		extend_uri_query(&mut uri, Params { a: "1", b: Some("&") }).unwrap();

		let query: BTreeMap<String, String> =
			serde_html_form::from_str(uri.query().unwrap().as_str()).unwrap();
		assert_eq!(query["x"], "y");
		assert_eq!(query["a"], "1");
		assert_eq!(query["b"], "&");
	}

	#[test]
	fn concat_with_empty() {
		let query = QueryBuf::new(b"a=1".to_vec()).unwrap();
		let empty = QueryBuf::default();
		assert_eq!(concat_query(query.clone(), &empty).unwrap().as_str(), "a=1");
		assert_eq!(concat_query(empty, &query).unwrap().as_str(), "a=1");
	}

	#[test]
	fn concat_keeps_both_sides() {
		let query = QueryBuf::new(b"a=1&b=2".to_vec()).unwrap();
		let other = QueryBuf::new(b"c=%26".to_vec()).unwrap();
		assert_eq!(concat_query(query, &other).unwrap().as_str(), "a=1&b=2&c=%26");
	}
}
