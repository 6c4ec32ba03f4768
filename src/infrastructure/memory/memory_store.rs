//! In-memory implementation of every repository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{
    Advertiser, AdvertiserPatch, DailyStatistics, NewAdvertiser, NewPublisher, NewSession,
    NewStatsEntry, Publisher, PublisherStatistics, Session, Totals,
};
use crate::domain::repositories::{
    AdvertiserRepository, PublisherRepository, SessionRepository, StatsRepository, StatsWindow,
};
use crate::error::AppError;
use serde_json::json;

#[derive(Default)]
struct Tables {
    advertisers: BTreeMap<i64, Advertiser>,
    publishers: BTreeMap<i64, Publisher>,
    stats: Vec<NewStatsEntry>,
    sessions: HashMap<String, Session>,
    next_advertiser_id: i64,
    next_publisher_id: i64,
}

/// Repository backend keeping all tables in process memory.
///
/// Ids are assigned sequentially from 1, as a fresh database would.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdvertiserRepository for MemoryStore {
    async fn create(&self, new_advertiser: NewAdvertiser) -> Result<Advertiser, AppError> {
        let mut tables = self.tables.write().await;
        tables.next_advertiser_id += 1;
        let advertiser = Advertiser {
            id: tables.next_advertiser_id,
            name: new_advertiser.name,
            contact_name: new_advertiser.contact_name,
            email: new_advertiser.email,
            comments: new_advertiser.comments,
            created_at: Utc::now(),
            deleted_at: None,
        };
        tables.advertisers.insert(advertiser.id, advertiser.clone());
        Ok(advertiser)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Advertiser>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .advertisers
            .get(&id)
            .filter(|a| !a.is_deleted())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Advertiser>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .advertisers
            .values()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: AdvertiserPatch,
    ) -> Result<Option<Advertiser>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(advertiser) = tables.advertisers.get_mut(&id).filter(|a| !a.is_deleted()) else {
            return Ok(None);
        };
        patch.apply_to(advertiser);
        Ok(Some(advertiser.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.advertisers.get_mut(&id) {
            Some(advertiser) if !advertiser.is_deleted() => {
                advertiser.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl PublisherRepository for MemoryStore {
    async fn create(&self, new_publisher: NewPublisher) -> Result<Publisher, AppError> {
        let mut tables = self.tables.write().await;
        if tables
            .publishers
            .values()
            .any(|p| p.name == new_publisher.name)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "publishers_name_key" }),
            ));
        }

        tables.next_publisher_id += 1;
        let publisher = Publisher {
            id: tables.next_publisher_id,
            name: new_publisher.name,
        };
        tables.publishers.insert(publisher.id, publisher.clone());
        Ok(publisher)
    }

    async fn list(&self) -> Result<Vec<Publisher>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.publishers.values().cloned().collect())
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record(&self, entry: NewStatsEntry) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.advertisers.contains_key(&entry.advertiser_id)
            || !tables.publishers.contains_key(&entry.publisher_id)
        {
            return Err(AppError::internal(
                "Foreign key violation",
                json!({
                    "advertiser_id": entry.advertiser_id,
                    "publisher_id": entry.publisher_id,
                }),
            ));
        }
        tables.stats.push(entry);
        Ok(())
    }

    async fn publisher_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<PublisherStatistics>, AppError> {
        let tables = self.tables.read().await;

        let mut per_publisher: BTreeMap<i64, Totals> = BTreeMap::new();
        for entry in tables
            .stats
            .iter()
            .filter(|e| e.advertiser_id == advertiser_id && window.contains(e.hour_start))
        {
            per_publisher.entry(entry.publisher_id).or_default().add(entry);
        }

        Ok(per_publisher
            .into_iter()
            .map(|(publisher_id, totals)| PublisherStatistics {
                publisher_id,
                publisher_name: tables
                    .publishers
                    .get(&publisher_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                requests: totals.requests,
                impressions: totals.impressions,
                clicks: totals.clicks,
                revenue: totals.revenue,
            })
            .collect())
    }

    async fn daily_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<DailyStatistics>, AppError> {
        let tables = self.tables.read().await;

        let mut per_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
        for entry in tables
            .stats
            .iter()
            .filter(|e| e.advertiser_id == advertiser_id && window.contains(e.hour_start))
        {
            let day = entry.hour_start.with_timezone(&window.timezone).date_naive();
            per_day.entry(day).or_default().add(entry);
        }

        Ok(per_day
            .into_iter()
            .map(|(day, totals)| DailyStatistics {
                day,
                requests: totals.requests,
                impressions: totals.impressions,
                clicks: totals.clicks,
                revenue: totals.revenue,
            })
            .collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let mut tables = self.tables.write().await;
        let session = Session {
            session_hash: new_session.session_hash,
            username: new_session.username,
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        tables
            .sessions
            .insert(session.session_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        session_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .get(session_hash)
            .filter(|s| !s.is_expired_at(now))
            .cloned())
    }

    async fn touch(&self, session_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(session) = tables.sessions.get_mut(session_hash) {
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete(&self, session_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.sessions.remove(session_hash).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}
