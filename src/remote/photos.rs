//! Photo listing service.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::env::ConnectionParams;
use crate::error::ClientResult;
use crate::remote::client::{into_api_error, SESSION_ID_HEADER};

/// Server-side listing order keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOrder {
    Newest,
    Oldest,
}

impl ServerOrder {
    pub fn as_query(self) -> &'static str {
        match self {
            ServerOrder::Newest => "newest",
            ServerOrder::Oldest => "oldest",
        }
    }
}

/// One photo record as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhotoRecord {
    #[serde(rename = "Type")]
    pub media_type: String,
    pub hash: String,
    pub width: u32,
    pub height: u32,
    /// RFC 3339 capture timestamp, e.g. `2023-06-01T17:00:00Z`
    pub taken_at: String,
    pub name: String,
}

/// Fetches windows of the remote photo listing.
#[async_trait]
pub trait PhotosService: Send + Sync {
    async fn photos(
        &self,
        count: usize,
        offset: usize,
        order: ServerOrder,
    ) -> ClientResult<Vec<PhotoRecord>>;
}

/// HTTP implementation of [`PhotosService`], bound to one session.
pub struct HttpPhotosService {
    http: HttpClient,
    params: ConnectionParams,
    session_id: String,
}

impl HttpPhotosService {
    pub fn new(http: HttpClient, params: ConnectionParams, session_id: String) -> Self {
        Self {
            http,
            params,
            session_id,
        }
    }
}

#[async_trait]
impl PhotosService for HttpPhotosService {
    async fn photos(
        &self,
        count: usize,
        offset: usize,
        order: ServerOrder,
    ) -> ClientResult<Vec<PhotoRecord>> {
        let response = self
            .http
            .get(self.params.api_url("photos"))
            .header(SESSION_ID_HEADER, &self.session_id)
            .query(&[
                ("count", count.to_string()),
                ("offset", offset.to_string()),
                ("order", order.as_query().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_api_error(response).await);
        }

        Ok(response.json().await?)
    }
}
