use std::sync::Arc;

use crate::config::{AuthKind, Config, SessionStoreKind};
use crate::db::connection::{create_pool, DbPool};
use crate::repositories::{PgUserDirectory, UserDirectory};
use crate::session::authenticator::SessionAuthenticator;
use crate::session::basic::BasicAuthenticator;
use crate::session::pg_store::PgSessionStore;
use crate::session::policy::SessionPolicy;
use crate::session::store::{MemorySessionStore, SessionStore};
use crate::session::RequestAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    /// Cookie-session façade used directly by the login/logout/profile
    /// handlers.
    pub sessions: Arc<SessionAuthenticator>,
    /// Backend the auth middleware resolves identities with; either the
    /// session façade or the Basic authenticator, per configuration.
    pub authenticator: Arc<dyn RequestAuthenticator>,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        config: Config,
        sessions: Arc<SessionAuthenticator>,
        authenticator: Arc<dyn RequestAuthenticator>,
    ) -> Self {
        Self {
            pool,
            config,
            sessions,
            authenticator,
        }
    }

    /// Wires the store, policy, directory, and authenticators from
    /// configuration. The store is constructed once here and injected;
    /// nothing in the session core holds ambient state.
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url).await?;

        let store: Arc<dyn SessionStore> = match config.session_store {
            SessionStoreKind::Memory => Arc::new(MemorySessionStore::new()),
            SessionStoreKind::Database => Arc::new(PgSessionStore::new(Arc::clone(&pool))),
        };
        let directory: Arc<dyn UserDirectory> =
            Arc::new(PgUserDirectory::new(Arc::clone(&pool)));

        let sessions = Arc::new(SessionAuthenticator::new(
            SessionPolicy::new(store, config.session_duration_secs),
            config.session_name.clone(),
            Arc::clone(&directory),
        ));

        let authenticator: Arc<dyn RequestAuthenticator> = match config.auth_kind {
            AuthKind::Session => Arc::clone(&sessions) as Arc<dyn RequestAuthenticator>,
            AuthKind::Basic => Arc::new(BasicAuthenticator::new(directory)),
        };

        Ok(Self::new(pool, config, sessions, authenticator))
    }
}
