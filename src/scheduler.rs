//! Periodic background refresh of course snapshots.
//!
//! The scheduler re-fetches the configured term keys on a fixed interval.
//! On-demand refreshes of other keys happen independently in the request
//! path; this loop only keeps the defaults warm so the common queries never
//! pay the fetch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time;
use tracing::{debug, error, info};

use crate::data::store::{CourseStore, TermKey};
use crate::state::{ServiceStatus, ServiceStatusRegistry};
use crate::utils::fmt_duration;

pub struct RefreshScheduler {
    store: Arc<CourseStore>,
    keys: Vec<TermKey>,
    interval: Duration,
    statuses: ServiceStatusRegistry,
}

impl RefreshScheduler {
    pub fn new(
        store: Arc<CourseStore>,
        keys: Vec<TermKey>,
        interval: Duration,
        statuses: ServiceStatusRegistry,
    ) -> Self {
        Self {
            store,
            keys,
            interval,
            statuses,
        }
    }

    /// Runs the refresh loop until a shutdown signal arrives.
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) {
        info!(
            interval = fmt_duration(self.interval),
            keys = ?self.keys.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "refresh scheduler started"
        );
        self.statuses.set("scheduler", ServiceStatus::Active);

        let mut ticker = time::interval(self.interval);
        // The initial fetch already happened at startup; skip the immediate
        // first tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("refresh scheduler received shutdown signal, exiting");
                    break;
                }
                _ = ticker.tick() => {
                    self.refresh_all().await;
                }
            }
        }
    }

    async fn refresh_all(&self) {
        for key in &self.keys {
            let start = Instant::now();
            match self.store.refresh(key).await {
                Ok(()) => {
                    debug!(
                        key = %key,
                        elapsed = fmt_duration(start.elapsed()),
                        "scheduled refresh complete"
                    );
                    self.statuses.set("scheduler", ServiceStatus::Active);
                }
                Err(e) => {
                    // Only reachable when the key has never successfully
                    // fetched; a stale snapshot swallows the error upstream.
                    error!(key = %key, error = %e, "scheduled refresh failed");
                    self.statuses.set("scheduler", ServiceStatus::Error);
                }
            }
        }
    }
}
