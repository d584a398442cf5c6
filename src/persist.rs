//! Lumen Photos - Object Persistence
//!
//! Generic save/load of small objects (session, auth) plus the
//! JSON-file implementation used by the CLI.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientResult;

/// Durable storage for a single object of type `T`.
pub trait ObjectPersistence<T>: Send + Sync {
    fn save(&self, item: &T) -> ClientResult<()>;
    fn load(&self) -> ClientResult<Option<T>>;
    fn clear(&self) -> ClientResult<()>;
}

/// Stores one object as a JSON file.
///
/// Writes go to a temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated object behind.
pub struct JsonFilePersistence<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFilePersistence<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> ObjectPersistence<T> for JsonFilePersistence<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn save(&self, item: &T) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(item)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn load(&self) -> ClientResult<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let item = serde_json::from_slice(&data)?;
        Ok(Some(item))
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Auth, ConnectionParams, Session};
    use tempfile::tempdir;

    #[test]
    fn session_round_trip() {
        let dir = tempdir().unwrap();
        let store: JsonFilePersistence<Session> =
            JsonFilePersistence::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        let session = Session {
            id: "sess-1".into(),
            connection_params: ConnectionParams::new("https://photos.example.com"),
            preview_token: "preview".into(),
            download_token: "download".into(),
        };
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, session);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn auth_round_trip_keeps_variant() {
        let dir = tempdir().unwrap();
        let store: JsonFilePersistence<Auth> =
            JsonFilePersistence::new(dir.path().join("auth.json"));

        store.save(&Auth::Public).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), Auth::Public);

        store
            .save(&Auth::Credentials {
                username: "admin".into(),
                password: "secret".into(),
            })
            .unwrap();
        match store.load().unwrap().unwrap() {
            Auth::Credentials { username, .. } => assert_eq!(username, "admin"),
            other => panic!("unexpected auth variant: {:?}", other),
        }
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store: JsonFilePersistence<Auth> =
            JsonFilePersistence::new(dir.path().join("state/nested/auth.json"));

        store.save(&Auth::Public).unwrap();
        assert!(store.path().exists());
    }
}
