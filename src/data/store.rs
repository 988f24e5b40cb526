//! Keyed in-memory store of raw course snapshots.
//!
//! One immutable snapshot per (year, term, campus) key. A refresh builds the
//! new sorted list fully off to the side and publishes it with a single map
//! insert of a fresh `Arc`, so concurrent readers always observe either the
//! pre- or post-refresh list, never a partial one. A per-key async mutex
//! keeps concurrent refreshes of the same key from racing; distinct keys
//! refresh independently.

use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::soc::types::CourseRecord;
use crate::soc::{SocApi, SocApiError};

/// One academic period at one campus, the cache key for everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermKey {
    pub year: String,
    pub term: String,
    pub campus: String,
}

impl TermKey {
    pub fn new(year: impl Into<String>, term: impl Into<String>, campus: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            term: term.into(),
            campus: campus.into(),
        }
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.year, self.term, self.campus)
    }
}

#[derive(Clone)]
struct Snapshot {
    courses: Arc<Vec<CourseRecord>>,
    fetched_at: DateTime<Utc>,
}

pub struct CourseStore {
    api: Arc<SocApi>,
    snapshots: DashMap<TermKey, Snapshot>,
    /// Per-key refresh guard; holds no data, only serializes fetches.
    refresh_locks: DashMap<TermKey, Arc<Mutex<()>>>,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
}

impl CourseStore {
    pub fn new(api: Arc<SocApi>) -> Self {
        Self {
            api,
            snapshots: DashMap::new(),
            refresh_locks: DashMap::new(),
            last_refresh: RwLock::new(None),
        }
    }

    /// The current snapshot for a key, if one has ever been published.
    pub fn get(&self, key: &TermKey) -> Option<Arc<Vec<CourseRecord>>> {
        self.snapshots.get(key).map(|s| s.courses.clone())
    }

    /// When the newest snapshot of any key was published.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().expect("last_refresh lock poisoned")
    }

    /// Keys currently held, with their snapshot ages.
    pub fn snapshot_info(&self) -> Vec<(String, DateTime<Utc>, usize)> {
        self.snapshots
            .iter()
            .map(|entry| {
                (
                    entry.key().to_string(),
                    entry.value().fetched_at,
                    entry.value().courses.len(),
                )
            })
            .collect()
    }

    fn lock_for(&self, key: &TermKey) -> Arc<Mutex<()>> {
        self.refresh_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fetch and publish a fresh snapshot for a key.
    ///
    /// On fetch failure the previous snapshot (if any) stays published and
    /// the error is swallowed with a warning; the error only surfaces when
    /// no snapshot has ever existed for the key.
    pub async fn refresh(&self, key: &TermKey) -> Result<(), SocApiError> {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;
        self.refresh_locked(key).await
    }

    /// The snapshot for a key, fetching it on demand when absent.
    ///
    /// Only callers waiting on the same absent key block; reads of other
    /// keys and reads of already-published snapshots never wait.
    pub async fn get_or_refresh(
        &self,
        key: &TermKey,
    ) -> Result<Arc<Vec<CourseRecord>>, SocApiError> {
        if let Some(snapshot) = self.get(key) {
            return Ok(snapshot);
        }

        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        // Another caller may have refreshed while we waited on the lock.
        if let Some(snapshot) = self.get(key) {
            return Ok(snapshot);
        }

        self.refresh_locked(key).await?;
        Ok(self.get(key).unwrap_or_else(|| Arc::new(Vec::new())))
    }

    async fn refresh_locked(&self, key: &TermKey) -> Result<(), SocApiError> {
        match self
            .api
            .fetch_courses(&key.year, &key.term, &key.campus)
            .await
        {
            Ok(courses) if courses.is_empty() => {
                // An empty feed is more likely an upstream hiccup than a
                // term with zero offerings; keep whatever we have.
                warn!(key = %key, "upstream returned an empty course list, keeping snapshot");
                Ok(())
            }
            Ok(mut courses) => {
                courses.sort_by(|a, b| a.course_string().cmp(b.course_string()));
                let count = courses.len();
                let now = Utc::now();
                self.publish(key, courses, now);
                info!(key = %key, count, "published course snapshot");
                Ok(())
            }
            Err(e) => {
                if self.snapshots.contains_key(key) {
                    warn!(key = %key, error = %e, "refresh failed, keeping stale snapshot");
                    Ok(())
                } else {
                    Err(e)
                }
            }
        }
    }

    fn publish(&self, key: &TermKey, courses: Vec<CourseRecord>, fetched_at: DateTime<Utc>) {
        self.snapshots.insert(
            key.clone(),
            Snapshot {
                courses: Arc::new(courses),
                fetched_at,
            },
        );
        *self
            .last_refresh
            .write()
            .expect("last_refresh lock poisoned") = Some(fetched_at);
    }
}
