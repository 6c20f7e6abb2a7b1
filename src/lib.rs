//! Client for a goauth [OAuth 2.0][rfc6749] authorization server.
//!
//! Covers the grants and companion endpoints a third-party application needs:
//!
//! - Authorization Code, Refresh Token and Client Credentials grants
//!   ([RFC 6749][rfc6749]);
//! - Token Introspection ([RFC 7662][rfc7662]);
//! - Token Revocation ([RFC 7009][rfc7009]);
//! - user-info and user lookups;
//! - offline verification of the server's HS256 JWTs.
//!
//! Backend failures, whatever their wire shape (RFC 7807 problem document,
//! legacy `{code, message}` body, or a `2xx` envelope with a non-zero business
//! code), surface as a single [`response::ApiError`].
//!
//! # Modules
//!
//! - [`client`]: the [`Client`](client::Client) facade, its configuration and
//!   error types.
//! - [`endpoints`]: request builders and response decoding per endpoint.
//! - [`grant`]: token request bodies of each grant type.
//! - [`jwt`]: offline token verification.
//! - [`response`]: envelope decoding and error normalization.
//! - [`transport`]: HTTP transport abstraction and content type encoding.
//! - [`util`]: URI query string utilities.
//!
//! # Transport
//!
//! Requests go through any [`HttpClient`](transport::HttpClient)
//! implementation. Enable the `reqwest` feature for an implementation on
//! [`reqwest::Client`] and the [`Client::new`](client::Client::new)
//! constructor.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
//! [rfc7662]: https://www.rfc-editor.org/rfc/rfc7662.html
//! [rfc7009]: https://www.rfc-editor.org/rfc/rfc7009.html
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;
pub use iref;

pub mod client;
pub mod endpoints;
pub mod grant;
pub mod jwt;
pub mod response;
pub mod transport;
pub mod util;

pub use client::{Client, Config, OAuth2ClientError};
pub use response::ApiError;
