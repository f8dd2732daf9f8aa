use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::AppResult;
use crate::middleware::SessionId;
use crate::models::SessionState;
use crate::services::recommendations::RECOMMENDATION_COUNT_RANGE;
use crate::store::{MovieData, SnapshotCache};

/// Request defaults taken from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Recommendation count used when a request omits one
    pub default_count: usize,
    /// Number of titles drawn by a random pick request without a count
    pub random_pick_count: usize,
    /// Idle time after which a session is dropped
    pub session_ttl: TimeDelta,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_count: 5,
            random_pick_count: 5,
            session_ttl: TimeDelta::hours(1),
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            default_count: config.default_recommendation_count.clamp(
                *RECOMMENDATION_COUNT_RANGE.start(),
                *RECOMMENDATION_COUNT_RANGE.end(),
            ),
            random_pick_count: config.random_pick_count,
            session_ttl: i64::try_from(config.session_ttl_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<SnapshotCache>,
    pub settings: Settings,
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// A session together with the last time a request used it
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub state: SessionState,
    pub last_seen: DateTime<Utc>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub sessions: HashMap<SessionId, SessionEntry>,
}

impl AppStateInner {
    /// Returns the session's state, starting an empty one if needed
    pub fn session_mut(&mut self, session_id: SessionId) -> &mut SessionState {
        self.session_mut_at(session_id, Utc::now())
    }

    pub fn session_mut_at(
        &mut self,
        session_id: SessionId,
        now: DateTime<Utc>,
    ) -> &mut SessionState {
        let entry = self
            .sessions
            .entry(session_id)
            .or_insert_with(|| SessionEntry {
                state: SessionState::default(),
                last_seen: now,
            });
        entry.last_seen = now;
        &mut entry.state
    }

    /// Snapshot of the session's state, empty for unknown sessions
    ///
    /// Reading a known session keeps it alive; unknown sessions are not stored.
    pub fn session(&mut self, session_id: &SessionId) -> SessionState {
        match self.sessions.get_mut(session_id) {
            Some(entry) => {
                entry.last_seen = Utc::now();
                entry.state.clone()
            }
            None => SessionState::default(),
        }
    }

    /// Drops sessions not used for longer than `ttl`, returning how many went
    pub fn evict_idle(&mut self, now: DateTime<Utc>, ttl: TimeDelta) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.signed_duration_since(entry.last_seen) <= ttl);
        before - self.sessions.len()
    }
}

impl AppState {
    /// Creates application state around a snapshot cache
    pub fn new(data: SnapshotCache, settings: Settings) -> Self {
        Self {
            data: Arc::new(data),
            settings,
            inner: Arc::new(RwLock::new(AppStateInner::default())),
        }
    }

    /// Loaded movie data, or `DataUnavailable` when the snapshots failed to load
    pub fn movie_data(&self) -> AppResult<Arc<MovieData>> {
        Ok(self.data.get()?)
    }

    /// Spawns a background task that evicts idle sessions every `period`
    pub fn spawn_session_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let ttl = self.settings.session_ttl;

        tokio::spawn(async move {
            tracing::info!(period_secs = period.as_secs(), "Session sweeper started");
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = inner.write().await.evict_idle(Utc::now(), ttl);
                if evicted > 0 {
                    tracing::debug!(evicted, "Evicted idle sessions");
                }
            }
        })
    }
}
