//! Cached access to the dashboard metrics, recomputed when the plant revision moves.

use super::kpi::{compute, DashboardMetrics, PlantSnapshot};
use super::period::{period_report, PeriodReport};
use crate::clock::Clock;
use crate::lifecycle::{PlantClients, SystemError};
use chrono::NaiveDate;
use tokio::sync::{watch, Mutex};
use tracing::debug;

struct Cached {
    revision: u64,
    metrics: DashboardMetrics,
}

/// Serves the dashboard KPIs, recomputing them only when the store revision has
/// moved since the last computation.
pub struct MetricsService {
    clients: PlantClients,
    revision: watch::Receiver<u64>,
    clock: Clock,
    cache: Mutex<Option<Cached>>,
}

impl MetricsService {
    pub fn new(clients: PlantClients, revision: watch::Receiver<u64>, clock: Clock) -> Self {
        Self {
            clients,
            revision,
            clock,
            cache: Mutex::new(None),
        }
    }

    /// KPIs consistent with every mutation that completed before the call.
    pub async fn metrics(&self) -> Result<DashboardMetrics, SystemError> {
        let mut cache = self.cache.lock().await;
        // Read before the snapshot: a mutation racing with it leaves the cache stale.
        let revision = *self.revision.borrow();

        if let Some(cached) = cache.as_ref().filter(|c| c.revision == revision) {
            return Ok(cached.metrics.clone());
        }

        debug!(revision, "Recomputing metrics");
        let snapshot = self.clients.snapshot().await?;
        let metrics = compute(&snapshot, self.clock.today());
        *cache = Some(Cached {
            revision,
            metrics: metrics.clone(),
        });
        Ok(metrics)
    }

    /// The overview for `start..=end`, built on the current KPIs.
    pub async fn period(&self, start: NaiveDate, end: NaiveDate) -> Result<PeriodReport, SystemError> {
        let metrics = self.metrics().await?;
        let snapshot: PlantSnapshot = self.clients.snapshot().await?;
        Ok(period_report(&snapshot, &metrics, start, end))
    }

    /// Revision the cached KPIs were computed at, if any.
    pub async fn cached_revision(&self) -> Option<u64> {
        self.cache.lock().await.as_ref().map(|c| c.revision)
    }
}
