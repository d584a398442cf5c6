//! Remote server API: HTTP plumbing, session creation, client config
//! and the photo listing service.

pub mod client;
pub mod config;
pub mod photos;
pub mod session;

pub use client::build_http_client;
pub use config::{ClientConfig, ClientConfigService, HttpClientConfigService};
pub use photos::{HttpPhotosService, PhotoRecord, PhotosService, ServerOrder};
pub use session::{HttpSessionCreator, SessionCreator};
