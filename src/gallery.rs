//! Lumen Photos - Gallery Model
//!
//! Maps remote photo records into the client's gallery entities.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

use crate::error::{ClientError, ClientResult};
use crate::remote::photos::PhotoRecord;
use crate::thumbs::MediaUrlFactory;

/// Kind of a gallery item, as classified by the server.
///
/// The set is closed: an unrecognized server value is a mapping error,
/// never silently coerced to `Unknown` or `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Unknown,
    Image,
    Raw,
    Animated,
    Live,
    Video,
    Vector,
    Sidecar,
    Text,
    Other,
}

impl MediaType {
    /// Map a server media-type string to the client variant.
    pub fn from_server(value: &str) -> ClientResult<Self> {
        match value {
            "" => Ok(MediaType::Unknown),
            "image" => Ok(MediaType::Image),
            "raw" => Ok(MediaType::Raw),
            "animated" => Ok(MediaType::Animated),
            "live" => Ok(MediaType::Live),
            "video" => Ok(MediaType::Video),
            "vector" => Ok(MediaType::Vector),
            "sidecar" => Ok(MediaType::Sidecar),
            "text" => Ok(MediaType::Text),
            "other" => Ok(MediaType::Other),
            unsupported => Err(ClientError::UnsupportedMediaType(unsupported.to_string())),
        }
    }
}

/// One item of the gallery.
///
/// Identity is the server content hash: two instances with the same
/// hash are the same media, whatever the rest of their fields say.
#[derive(Debug, Clone)]
pub struct GalleryMedia {
    pub media: MediaType,
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub taken_at: DateTime<Utc>,
    pub name: String,
    pub small_thumbnail_url: String,
}

impl GalleryMedia {
    /// Build a gallery item from a remote record.
    pub fn from_record(record: &PhotoRecord, urls: &MediaUrlFactory) -> ClientResult<Self> {
        if record.hash.is_empty() {
            return Err(ClientError::MalformedRecord(format!(
                "empty content hash in record '{}'",
                record.name
            )));
        }

        let taken_at = DateTime::parse_from_rfc3339(&record.taken_at)
            .map_err(|e| {
                ClientError::MalformedRecord(format!(
                    "bad taken_at '{}': {}",
                    record.taken_at, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(Self {
            media: MediaType::from_server(&record.media_type)?,
            hash: record.hash.clone(),
            width: record.width,
            height: record.height,
            taken_at,
            name: record.name.clone(),
            small_thumbnail_url: urls.small_thumbnail_url(&record.hash),
        })
    }
}

impl PartialEq for GalleryMedia {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for GalleryMedia {}

impl Hash for GalleryMedia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for GalleryMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GalleryMedia(hash='{}', kind={:?})", self.hash, self.media)
    }
}
