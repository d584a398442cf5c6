//! HTTP plumbing shared by the remote services.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response};

use crate::error::{ClientError, ClientResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the session identifier on authenticated requests.
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// Build the HTTP client used by all remote services.
pub fn build_http_client() -> ClientResult<HttpClient> {
    let http = HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?;
    Ok(http)
}

/// Turn a non-success response into an API error, consuming the body
/// as the message.
pub(crate) async fn into_api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ClientError::Api { status, message }
}
