//! Server client configuration.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::env::ConnectionParams;
use crate::error::ClientResult;
use crate::remote::client::{into_api_error, SESSION_ID_HEADER};

/// Client configuration reported by the server for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub preview_token: String,
    pub download_token: String,
    pub public: bool,
}

/// Fetches the server client configuration for an established session.
#[async_trait]
pub trait ClientConfigService: Send + Sync {
    async fn client_config(&self) -> ClientResult<ClientConfig>;
}

/// HTTP implementation of [`ClientConfigService`], bound to one session.
pub struct HttpClientConfigService {
    http: HttpClient,
    params: ConnectionParams,
    session_id: String,
}

impl HttpClientConfigService {
    pub fn new(http: HttpClient, params: ConnectionParams, session_id: String) -> Self {
        Self {
            http,
            params,
            session_id,
        }
    }
}

#[async_trait]
impl ClientConfigService for HttpClientConfigService {
    async fn client_config(&self) -> ClientResult<ClientConfig> {
        let response = self
            .http
            .get(self.params.api_url("config"))
            .header(SESSION_ID_HEADER, &self.session_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_api_error(response).await);
        }

        Ok(response.json().await?)
    }
}
