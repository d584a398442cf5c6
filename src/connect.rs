//! Lumen Photos - Connect Flow
//!
//! Creates a [`Session`] for the given [`ConnectionParams`] and [`Auth`].
//! On success, sets the session to the holder and the persistence
//! stores, if present.

use std::sync::Arc;

use crate::env::{Auth, ConnectionParams, Session, SessionHolder};
use crate::error::{ClientError, ClientResult};
use crate::persist::ObjectPersistence;
use crate::remote::config::{ClientConfig, ClientConfigService};
use crate::remote::session::SessionCreator;

/// Builds a config service bound to a freshly created session.
pub type ConfigServiceFactory =
    Box<dyn Fn(&ConnectionParams, &str) -> Arc<dyn ClientConfigService> + Send + Sync>;

/// The connect flow: session creation, config fetch, validation,
/// session construction, success side effects.
///
/// The holder and both persistence stores are optional - absence means
/// that side effect is skipped, not an error.
pub struct ConnectUseCase {
    connection_params: ConnectionParams,
    auth: Auth,
    config_service_factory: ConfigServiceFactory,
    session_creator: Arc<dyn SessionCreator>,
    session_holder: Option<Arc<SessionHolder>>,
    session_persistence: Option<Arc<dyn ObjectPersistence<Session>>>,
    auth_persistence: Option<Arc<dyn ObjectPersistence<Auth>>>,
}

impl ConnectUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection_params: ConnectionParams,
        auth: Auth,
        config_service_factory: ConfigServiceFactory,
        session_creator: Arc<dyn SessionCreator>,
        session_holder: Option<Arc<SessionHolder>>,
        session_persistence: Option<Arc<dyn ObjectPersistence<Session>>>,
        auth_persistence: Option<Arc<dyn ObjectPersistence<Auth>>>,
    ) -> Self {
        Self {
            connection_params,
            auth,
            config_service_factory,
            session_creator,
            session_holder,
            session_persistence,
            auth_persistence,
        }
    }

    /// Run the flow, producing exactly one session or failing.
    ///
    /// Steps are strictly sequential; the first failure aborts the
    /// whole flow and none of the success side effects run.
    pub async fn perform(&self) -> ClientResult<Session> {
        let session_id = self.session_creator.create_session(&self.auth).await?;
        log::debug!("perform: got session id");

        let config_service =
            (self.config_service_factory)(&self.connection_params, &session_id);
        let config = Config::from(config_service.client_config().await?);
        log::debug!("perform: got config, public={}", config.is_public);

        self.check_config(&config)?;

        let session = Session {
            id: session_id,
            connection_params: self.connection_params.clone(),
            preview_token: config.preview_token,
            download_token: config.download_token,
        };
        log::debug!("perform: successfully created session");

        if let Some(holder) = &self.session_holder {
            holder.set(session.clone());
            log::debug!("perform: session holder set");
        }
        if let Some(persistence) = &self.session_persistence {
            persistence.save(&session)?;
            log::debug!("perform: session saved to persistence");
        }
        if let Some(persistence) = &self.auth_persistence {
            persistence.save(&self.auth)?;
            log::debug!("perform: auth saved to persistence");
        }

        Ok(session)
    }

    fn check_config(&self, config: &Config) -> ClientResult<()> {
        if self.auth.is_public() && !config.is_public {
            Err(ClientError::EnvNotPublic)
        } else {
            Ok(())
        }
    }
}

/// Connect-flow-local view of the server client config.
struct Config {
    preview_token: String,
    download_token: String,
    is_public: bool,
}

impl From<ClientConfig> for Config {
    fn from(source: ClientConfig) -> Self {
        Self {
            preview_token: source.preview_token,
            download_token: source.download_token,
            is_public: source.public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FakeSessionCreator {
        result: ClientResult<String>,
    }

    #[async_trait]
    impl SessionCreator for FakeSessionCreator {
        async fn create_session(&self, _auth: &Auth) -> ClientResult<String> {
            match &self.result {
                Ok(id) => Ok(id.clone()),
                Err(ClientError::InvalidCredentials) => Err(ClientError::InvalidCredentials),
                Err(_) => unreachable!("fake only models credential failures"),
            }
        }
    }

    struct FakeConfigService {
        config: ClientConfig,
    }

    #[async_trait]
    impl ClientConfigService for FakeConfigService {
        async fn client_config(&self) -> ClientResult<ClientConfig> {
            Ok(self.config.clone())
        }
    }

    /// Persistence stub that counts writes.
    struct RecordingStore<T> {
        saved: Mutex<Vec<T>>,
    }

    impl<T> RecordingStore<T> {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                saved: Mutex::new(Vec::new()),
            })
        }

        fn save_count(&self) -> usize {
            self.saved.lock().len()
        }
    }

    impl<T: Clone + Send + Sync> ObjectPersistence<T> for RecordingStore<T> {
        fn save(&self, item: &T) -> ClientResult<()> {
            self.saved.lock().push(item.clone());
            Ok(())
        }

        fn load(&self) -> ClientResult<Option<T>> {
            Ok(self.saved.lock().last().cloned())
        }

        fn clear(&self) -> ClientResult<()> {
            self.saved.lock().clear();
            Ok(())
        }
    }

    fn params() -> ConnectionParams {
        ConnectionParams::new("https://photos.example.com")
    }

    fn config(public: bool) -> ClientConfig {
        ClientConfig {
            preview_token: "preview-token".into(),
            download_token: "download-token".into(),
            public,
        }
    }

    fn factory_for(config: ClientConfig) -> ConfigServiceFactory {
        Box::new(move |_params, _session_id| {
            Arc::new(FakeConfigService {
                config: config.clone(),
            }) as Arc<dyn ClientConfigService>
        })
    }

    struct Harness {
        use_case: ConnectUseCase,
        holder: Arc<SessionHolder>,
        session_store: Arc<RecordingStore<Session>>,
        auth_store: Arc<RecordingStore<Auth>>,
    }

    fn harness(auth: Auth, config: ClientConfig, creator: ClientResult<String>) -> Harness {
        let holder = Arc::new(SessionHolder::new());
        let session_store = RecordingStore::<Session>::new();
        let auth_store = RecordingStore::<Auth>::new();

        let use_case = ConnectUseCase::new(
            params(),
            auth,
            factory_for(config),
            Arc::new(FakeSessionCreator { result: creator }),
            Some(holder.clone()),
            Some(session_store.clone() as Arc<dyn ObjectPersistence<Session>>),
            Some(auth_store.clone() as Arc<dyn ObjectPersistence<Auth>>),
        );

        Harness {
            use_case,
            holder,
            session_store,
            auth_store,
        }
    }

    #[tokio::test]
    async fn success_stores_session_everywhere_once() {
        let h = harness(
            Auth::Credentials {
                username: "admin".into(),
                password: "secret".into(),
            },
            config(false),
            Ok("sess-1".into()),
        );

        let session = h.use_case.perform().await.unwrap();

        assert_eq!(session.id, "sess-1");
        assert_eq!(session.preview_token, "preview-token");
        assert_eq!(session.download_token, "download-token");

        assert_eq!(h.holder.get().unwrap(), session);
        assert_eq!(h.session_store.save_count(), 1);
        assert_eq!(h.auth_store.save_count(), 1);
    }

    #[tokio::test]
    async fn public_auth_against_private_env_fails_and_stores_nothing() {
        let h = harness(Auth::Public, config(false), Ok("sess-1".into()));

        let err = h.use_case.perform().await.unwrap_err();

        assert!(matches!(err, ClientError::EnvNotPublic));
        assert!(h.holder.get().is_none());
        assert_eq!(h.session_store.save_count(), 0);
        assert_eq!(h.auth_store.save_count(), 0);
    }

    #[tokio::test]
    async fn public_auth_against_public_env_succeeds() {
        let h = harness(Auth::Public, config(true), Ok("sess-1".into()));

        let session = h.use_case.perform().await.unwrap();
        assert_eq!(h.holder.get().unwrap(), session);
    }

    #[tokio::test]
    async fn credential_error_propagates_unchanged() {
        let h = harness(
            Auth::Credentials {
                username: "admin".into(),
                password: "wrong".into(),
            },
            config(true),
            Err(ClientError::InvalidCredentials),
        );

        let err = h.use_case.perform().await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidCredentials));
        assert!(h.holder.get().is_none());
        assert_eq!(h.session_store.save_count(), 0);
    }

    #[tokio::test]
    async fn missing_collaborators_skip_side_effects() {
        let use_case = ConnectUseCase::new(
            params(),
            Auth::Public,
            factory_for(config(true)),
            Arc::new(FakeSessionCreator {
                result: Ok("sess-1".into()),
            }),
            None,
            None,
            None,
        );

        // No holder, no stores - still succeeds.
        let session = use_case.perform().await.unwrap();
        assert_eq!(session.id, "sess-1");
    }
}
