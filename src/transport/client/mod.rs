use std::{future::Future, sync::Arc};

use crate::client::OAuth2ClientError;

#[cfg(feature = "reqwest")]
mod reqwest;

/// Minimal "send a request, get a response" capability.
///
/// Implementations must read the whole response body into the returned
/// response and release the underlying connection before returning. Timeouts
/// and cancellation are the implementation's (or the caller's) business: the
/// client never retries and never imposes its own deadline.
///
/// The returned future is `Send`, so client calls can be spawned on a
/// multi-threaded runtime. Implementations may still be written as
/// `async fn`.
pub trait HttpClient {
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> impl Future<Output = Result<http::Response<Vec<u8>>, OAuth2ClientError>> + Send;
}

impl<T> HttpClient for &T
where
	T: HttpClient,
{
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> impl Future<Output = Result<http::Response<Vec<u8>>, OAuth2ClientError>> + Send {
		T::send(*self, request)
	}
}

impl<T> HttpClient for Arc<T>
where
	T: HttpClient,
{
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> impl Future<Output = Result<http::Response<Vec<u8>>, OAuth2ClientError>> + Send {
		T::send(self, request)
	}
}
