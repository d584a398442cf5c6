//! Lumen Photos - Unified Client API
//!
//! Single entry point wiring the remote services, the connect flow and
//! the gallery repositories together.
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_photos::api::PhotoClient;
//! use lumen_photos::env::{Auth, ConnectionParams};
//! use lumen_photos::paging::PagingOrder;
//!
//! let params = ConnectionParams::new("https://photos.example.com");
//! let client = PhotoClient::connect(params, Auth::Public).await?;
//!
//! let mut feed = client.feed(PagingOrder::Desc, 40);
//! feed.load_next().await?;
//! for media in feed.items() {
//!     println!("{} {}", media.name, media.small_thumbnail_url);
//! }
//! ```

use std::sync::Arc;

use reqwest::Client as HttpClient;

use crate::connect::{ConfigServiceFactory, ConnectUseCase};
use crate::env::{Auth, ConnectionParams, Session, SessionHolder};
use crate::error::ClientResult;
use crate::paging::{GalleryFeed, GalleryMediaRepository, PagingOrder};
use crate::persist::ObjectPersistence;
use crate::remote::client::{build_http_client, into_api_error};
use crate::remote::config::{ClientConfigService, HttpClientConfigService};
use crate::remote::photos::HttpPhotosService;
use crate::remote::session::HttpSessionCreator;
use crate::thumbs::MediaUrlFactory;

/// A connected client for one server environment.
pub struct PhotoClient {
    http: HttpClient,
    session: Session,
    holder: Arc<SessionHolder>,
    urls: MediaUrlFactory,
}

impl PhotoClient {
    /// Connect to an environment without persistence side effects.
    pub async fn connect(params: ConnectionParams, auth: Auth) -> ClientResult<Self> {
        Self::connect_with_stores(params, auth, None, None).await
    }

    /// Connect to an environment, persisting the session and auth to
    /// the given stores on success.
    pub async fn connect_with_stores(
        params: ConnectionParams,
        auth: Auth,
        session_store: Option<Arc<dyn ObjectPersistence<Session>>>,
        auth_store: Option<Arc<dyn ObjectPersistence<Auth>>>,
    ) -> ClientResult<Self> {
        let http = build_http_client()?;
        let holder = Arc::new(SessionHolder::new());

        let session_creator = Arc::new(HttpSessionCreator::new(http.clone(), params.clone()));
        let config_service_factory: ConfigServiceFactory = {
            let http = http.clone();
            Box::new(move |params, session_id| {
                Arc::new(HttpClientConfigService::new(
                    http.clone(),
                    params.clone(),
                    session_id.to_string(),
                )) as Arc<dyn ClientConfigService>
            })
        };

        let use_case = ConnectUseCase::new(
            params,
            auth,
            config_service_factory,
            session_creator,
            Some(holder.clone()),
            session_store,
            auth_store,
        );
        let session = use_case.perform().await?;
        let urls = MediaUrlFactory::for_session(&session);

        Ok(Self {
            http,
            session,
            holder,
            urls,
        })
    }

    /// Resume a previously established (persisted) session without
    /// talking to the server.
    pub fn resume(session: Session) -> ClientResult<Self> {
        let http = build_http_client()?;
        let holder = Arc::new(SessionHolder::new());
        holder.set(session.clone());
        let urls = MediaUrlFactory::for_session(&session);

        Ok(Self {
            http,
            session,
            holder,
            urls,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_holder(&self) -> Arc<SessionHolder> {
        self.holder.clone()
    }

    pub fn urls(&self) -> &MediaUrlFactory {
        &self.urls
    }

    /// Paged repository over this environment's gallery.
    pub fn gallery(&self) -> GalleryMediaRepository {
        let photos = Arc::new(HttpPhotosService::new(
            self.http.clone(),
            self.session.connection_params.clone(),
            self.session.id.clone(),
        ));
        GalleryMediaRepository::new(photos, self.urls.clone())
    }

    /// Accumulating feed over this environment's gallery.
    pub fn feed(&self, order: PagingOrder, page_limit: usize) -> GalleryFeed {
        GalleryFeed::new(self.gallery(), order, page_limit)
    }

    /// Fetch raw image bytes, e.g. from a thumbnail URL.
    pub async fn fetch_image(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(into_api_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}
