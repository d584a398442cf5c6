//! # Lumen Photos
//!
//! Client core for self-hosted photo servers: session establishment,
//! paged gallery access and thumbnail shape rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    LUMEN PHOTOS CLIENT                    │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  CONNECT    │  │  GALLERY     │  │  SHAPE MASK     │  │
//! │  │  USE CASE   │  │  PAGING      │  │  RENDERING      │  │
//! │  └──────┬──────┘  └──────┬───────┘  └────────┬────────┘  │
//! │         │                │                    │           │
//! │  ┌──────┴────────────────┴────────┐  ┌───────┴────────┐  │
//! │  │      REMOTE SERVER API         │  │  image CRATE   │  │
//! │  │  session / config / photos     │  │  RgbaImage     │  │
//! │  └────────────────────────────────┘  └────────────────┘  │
//! │                                                          │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  SESSION    │  │  OBJECT      │  │  MEDIA URL      │  │
//! │  │  HOLDER     │  │  PERSISTENCE │  │  FACTORY        │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session model
//!
//! - A session is created once per login by [`connect::ConnectUseCase`]
//! - Tokens from the server config ride along in the [`env::Session`]
//! - The session is only held/persisted after validation succeeds

pub mod api;
pub mod connect;
pub mod env;
pub mod error;
pub mod gallery;
pub mod paging;
pub mod persist;
pub mod remote;
pub mod shape_mask;
pub mod thumbs;

pub use api::PhotoClient;
pub use connect::ConnectUseCase;
pub use env::{Auth, ConnectionParams, Session, SessionHolder};
pub use error::{ClientError, ClientResult};
pub use gallery::{GalleryMedia, MediaType};
pub use paging::{DataPage, GalleryFeed, GalleryMediaRepository, PagingOrder};
pub use persist::{JsonFilePersistence, ObjectPersistence};
pub use shape_mask::{CenterSquareMask, CircleMask, ShapeMask, ShapeMaskTransformation};
pub use thumbs::MediaUrlFactory;

/// Lumen Photos version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
