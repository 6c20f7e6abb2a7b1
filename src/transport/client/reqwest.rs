use super::HttpClient;
use crate::client::OAuth2ClientError;

impl HttpClient for reqwest::Client {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		log::debug!("HTTP {} {}", request.method(), request.uri());

		let request: reqwest::Request = request.try_into().map_err(OAuth2ClientError::request)?;
		let response = self
			.execute(request)
			.await
			.map_err(OAuth2ClientError::request)?;

		let status = response.status();
		let mut builder = http::Response::builder().status(status);

		#[cfg(not(target_arch = "wasm32"))]
		{
			builder = builder.version(response.version());
		}

		if let Some(headers) = builder.headers_mut() {
			headers.extend(response.headers().clone());
		}

		// Draining the body hands the connection back to the pool.
		let body = response
			.bytes()
			.await
			.map_err(OAuth2ClientError::response)?
			.to_vec();

		log::debug!("HTTP response status {status}, {} bytes", body.len());

		builder.body(body).map_err(OAuth2ClientError::response)
	}
}
