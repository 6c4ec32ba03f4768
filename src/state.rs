//! Shared application state handed to every handler.

use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::PgPool;

use crate::application::services::{
    AdvertiserService, OperatorCredentials, SessionService, StatsService,
};
use crate::domain::repositories::{
    AdvertiserRepository, PublisherRepository, SessionRepository, StatsRepository,
};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgAdvertiserRepository, PgPublisherRepository, PgSessionRepository, PgStatsRepository,
};

/// One storage backend seen through every repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub advertisers: Arc<dyn AdvertiserRepository>,
    pub publishers: Arc<dyn PublisherRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    /// Short name reported by the health check.
    pub backend: &'static str,
}

impl Repositories {
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            advertisers: Arc::new(PgAdvertiserRepository::new(pool.clone())),
            publishers: Arc::new(PgPublisherRepository::new(pool.clone())),
            stats: Arc::new(PgStatsRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
            backend: "postgres",
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            advertisers: store.clone(),
            publishers: store.clone(),
            stats: store.clone(),
            sessions: store,
            backend: "memory",
        }
    }
}

/// Settings the services need besides storage.
#[derive(Clone)]
pub struct ServiceSettings {
    pub credentials: OperatorCredentials,
    pub session_signing_secret: String,
    pub session_ttl: chrono::Duration,
    pub manager_timezone: Tz,
}

#[derive(Clone)]
pub struct AppState {
    pub advertiser_service: Arc<AdvertiserService>,
    pub stats_service: Arc<StatsService>,
    pub session_service: Arc<SessionService>,
    pub storage_backend: &'static str,
}

impl AppState {
    pub fn new(repositories: Repositories, settings: ServiceSettings) -> Self {
        let advertiser_service = Arc::new(AdvertiserService::new(repositories.advertisers.clone()));
        let stats_service = Arc::new(StatsService::new(
            repositories.stats,
            repositories.advertisers,
            settings.manager_timezone,
        ));
        let session_service = Arc::new(SessionService::new(
            repositories.sessions,
            settings.credentials,
            settings.session_signing_secret,
            settings.session_ttl,
        ));

        Self {
            advertiser_service,
            stats_service,
            session_service,
            storage_backend: repositories.backend,
        }
    }
}
