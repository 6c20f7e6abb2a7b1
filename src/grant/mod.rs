//! OAuth 2.0 grant types supported by the token endpoint.
//!
//! - [`authorization_code`]: Authorization Code Grant
//!   ([RFC 6749 Section 4.1](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1)).
//! - [`refresh_token`]: Refreshing an Access Token
//!   ([RFC 6749 Section 6](https://datatracker.ietf.org/doc/html/rfc6749#section-6)).
//! - [`client_credentials`]: Client Credentials Grant
//!   ([RFC 6749 Section 4.4](https://datatracker.ietf.org/doc/html/rfc6749#section-4.4)).
pub mod authorization_code;
pub mod client_credentials;
pub mod refresh_token;
