//! Application state shared across the web layer and the scheduler.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use serde::Serialize;

use crate::data::salary::SalaryStore;
use crate::data::store::CourseStore;

/// Health status of a service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Starting,
    Active,
    Error,
}

/// A timestamped status entry for a service.
#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub status: ServiceStatus,
    #[allow(dead_code)]
    pub updated_at: Instant,
}

/// Thread-safe registry for services to self-report their health status.
#[derive(Debug, Clone, Default)]
pub struct ServiceStatusRegistry {
    inner: Arc<DashMap<String, StatusEntry>>,
}

impl ServiceStatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates the status for a named service.
    pub fn set(&self, name: &str, status: ServiceStatus) {
        self.inner.insert(
            name.to_owned(),
            StatusEntry {
                status,
                updated_at: Instant::now(),
            },
        );
    }

    /// Returns a snapshot of all service statuses.
    pub fn all(&self) -> Vec<(String, ServiceStatus)> {
        self.inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().status.clone()))
            .collect()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CourseStore>,
    pub salaries: Arc<SalaryStore>,
    pub service_statuses: ServiceStatusRegistry,
}

impl AppState {
    pub fn new(store: Arc<CourseStore>, salaries: Arc<SalaryStore>) -> Self {
        Self {
            store,
            salaries,
            service_statuses: ServiceStatusRegistry::new(),
        }
    }
}
