//! Lumen Photos - Media URL Factory
//!
//! Pure construction of thumbnail and download URLs from content hashes.

use crate::env::{ConnectionParams, Session};

/// Small-thumbnail tile size served by the server.
const SMALL_THUMBNAIL: &str = "tile_224";

/// Builds media URLs for one environment/session token pair.
#[derive(Debug, Clone)]
pub struct MediaUrlFactory {
    root_url: String,
    preview_token: String,
    download_token: String,
}

impl MediaUrlFactory {
    pub fn new<S: Into<String>>(root_url: S, preview_token: S, download_token: S) -> Self {
        Self {
            root_url: ConnectionParams::new(root_url).root_url().to_string(),
            preview_token: preview_token.into(),
            download_token: download_token.into(),
        }
    }

    /// Factory for an established session.
    pub fn for_session(session: &Session) -> Self {
        Self {
            root_url: session.connection_params.root_url().to_string(),
            preview_token: session.preview_token.clone(),
            download_token: session.download_token.clone(),
        }
    }

    /// URL of the small square thumbnail for a content hash.
    pub fn small_thumbnail_url(&self, hash: &str) -> String {
        format!(
            "{}/api/v1/t/{}/{}/{}",
            self.root_url, hash, self.preview_token, SMALL_THUMBNAIL
        )
    }

    /// URL to download the original file for a content hash.
    pub fn download_url(&self, hash: &str) -> String {
        format!(
            "{}/api/v1/dl/{}?t={}",
            self.root_url, hash, self.download_token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_url_format() {
        let factory = MediaUrlFactory::new("https://photos.example.com/", "pt", "dt");
        assert_eq!(
            factory.small_thumbnail_url("abc123"),
            "https://photos.example.com/api/v1/t/abc123/pt/tile_224"
        );
    }

    #[test]
    fn download_url_format() {
        let factory = MediaUrlFactory::new("https://photos.example.com", "pt", "dt");
        assert_eq!(
            factory.download_url("abc123"),
            "https://photos.example.com/api/v1/dl/abc123?t=dt"
        );
    }
}
