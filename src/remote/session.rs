//! Session creation against the server.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use crate::env::{Auth, ConnectionParams};
use crate::error::{ClientError, ClientResult};
use crate::remote::client::into_api_error;

/// Exchanges [`Auth`] for a server-issued session identifier.
#[async_trait]
pub trait SessionCreator: Send + Sync {
    /// Create a session, returning its identifier.
    ///
    /// Fails with [`ClientError::InvalidCredentials`] when the server
    /// rejects the given auth.
    async fn create_session(&self, auth: &Auth) -> ClientResult<String>;
}

/// HTTP implementation of [`SessionCreator`].
pub struct HttpSessionCreator {
    http: HttpClient,
    params: ConnectionParams,
}

impl HttpSessionCreator {
    pub fn new(http: HttpClient, params: ConnectionParams) -> Self {
        Self { http, params }
    }
}

#[async_trait]
impl SessionCreator for HttpSessionCreator {
    async fn create_session(&self, auth: &Auth) -> ClientResult<String> {
        #[derive(Serialize)]
        struct SessionRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct SessionResponse {
            id: String,
        }

        // Public access uses an empty credential pair; the server
        // decides whether anonymous sessions exist.
        let request = match auth {
            Auth::Credentials { username, password } => SessionRequest {
                username: username.as_str(),
                password: password.as_str(),
            },
            Auth::Public => SessionRequest {
                username: "",
                password: "",
            },
        };

        let response = self
            .http
            .post(self.params.api_url("session"))
            .json(&request)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(into_api_error(response).await);
        }

        let resp: SessionResponse = response.json().await?;
        Ok(resp.id)
    }
}
