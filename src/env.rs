//! Lumen Photos - Environment Model
//!
//! Describes a server environment: where it is, how we authenticate
//! against it, and the session we hold once connected.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Connection parameters for a server environment.
///
/// The root URL is normalized on construction (no trailing slash), so
/// URL building elsewhere can simply append paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    root_url: String,
}

impl ConnectionParams {
    pub fn new<S: Into<String>>(root_url: S) -> Self {
        let mut root_url = root_url.into();
        while root_url.ends_with('/') {
            root_url.pop();
        }
        Self { root_url }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Full URL for an API endpoint, e.g. `api_url("photos")`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.root_url, path)
    }
}

/// How to authenticate against an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Auth {
    /// No credentials - the environment must allow public access.
    Public,
    /// Username/password credentials.
    Credentials { username: String, password: String },
}

impl Auth {
    pub fn is_public(&self) -> bool {
        matches!(self, Auth::Public)
    }
}

/// An established session with a server environment.
///
/// Created only by a fully successful connect; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server-issued session identifier
    pub id: String,
    /// Environment the session belongs to
    pub connection_params: ConnectionParams,
    /// Token for thumbnail/preview URLs
    pub preview_token: String,
    /// Token for original-file download URLs
    pub download_token: String,
}

/// In-memory slot for the current session.
///
/// The connect flow fills it; the rest of the app reads it.
#[derive(Default)]
pub struct SessionHolder {
    slot: RwLock<Option<Session>>,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Session) {
        *self.slot.write() = Some(session);
    }

    pub fn get(&self) -> Option<Session> {
        self.slot.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_params_strip_trailing_slash() {
        let params = ConnectionParams::new("https://photos.example.com/");
        assert_eq!(params.root_url(), "https://photos.example.com");
        assert_eq!(
            params.api_url("config"),
            "https://photos.example.com/api/v1/config"
        );
    }

    #[test]
    fn holder_set_get_clear() {
        let holder = SessionHolder::new();
        assert!(!holder.is_set());

        holder.set(Session {
            id: "abc".into(),
            connection_params: ConnectionParams::new("https://photos.example.com"),
            preview_token: "p".into(),
            download_token: "d".into(),
        });

        assert!(holder.is_set());
        assert_eq!(holder.get().unwrap().id, "abc");

        holder.clear();
        assert!(holder.get().is_none());
    }
}
