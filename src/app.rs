//! Application assembly and lifecycle.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::Config;
use crate::data::salary::SalaryStore;
use crate::data::store::{CourseStore, TermKey};
use crate::scheduler::RefreshScheduler;
use crate::soc::SocApi;
use crate::state::{AppState, ServiceStatus};
use crate::web::create_router;

/// Main application struct containing all necessary components.
pub struct App {
    config: Config,
    state: AppState,
    store: Arc<CourseStore>,
}

impl App {
    /// Create a new App instance with all components initialized and the
    /// default term fetched.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let api = SocApi::new(
            config.soc_base_url.clone(),
            config.request_timeout,
            config.max_retries,
        )
        .context("Failed to create SOC API client")?;
        let store = Arc::new(CourseStore::new(Arc::new(api)));

        let salaries = Arc::new(SalaryStore::load(Path::new(&config.salary_data_dir)));
        let state = AppState::new(store.clone(), salaries);

        // Warm the default term so the first request doesn't pay the fetch.
        // Non-fatal: the scheduler retries, and on-demand refresh covers the
        // gap.
        let default_key = Self::default_key(&config);
        if let Err(e) = store.refresh(&default_key).await {
            warn!(key = %default_key, error = %e, "initial course fetch failed (non-fatal)");
        }

        Ok(Self {
            config,
            state,
            store,
        })
    }

    fn default_key(config: &Config) -> TermKey {
        TermKey::new(
            &config.default_year,
            &config.default_term,
            &config.default_campus,
        )
    }

    /// Run the web server and the refresh scheduler until shutdown.
    pub async fn run(self) -> anyhow::Result<()> {
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let scheduler = RefreshScheduler::new(
            self.store.clone(),
            vec![Self::default_key(&self.config)],
            self.config.refresh_interval,
            self.state.service_statuses.clone(),
        );
        let scheduler_rx = shutdown_tx.subscribe();
        let scheduler_handle = tokio::spawn(async move { scheduler.run(scheduler_rx).await });

        let router = create_router(self.state.clone());
        let listener = TcpListener::bind(("0.0.0.0", self.config.port))
            .await
            .with_context(|| format!("Failed to bind port {}", self.config.port))?;
        info!(port = self.config.port, "web server listening");
        self.state
            .service_statuses
            .set("web", ServiceStatus::Active);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Web server failed")?;

        // Server stopped; wind the scheduler down within the grace period.
        let _ = shutdown_tx.send(());
        if tokio::time::timeout(self.config.shutdown_timeout, scheduler_handle)
            .await
            .is_err()
        {
            warn!("scheduler did not stop within the shutdown timeout");
        }

        info!("shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
