use slugsearch::catalog::repository::CatalogRepository;
use slugsearch::catalog::CatalogService;
use slugsearch::client::CatalogClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Degree requirements change rarely; re-sweep them once per this many
/// listing ticks (three weeks at the default 60-second cadence).
const REQUIREMENT_SWEEP_EVERY: u64 = 30_240;

/// Keeps the in-memory catalog store close to the upstream. One failed sweep
/// is logged and the loop carries on; nothing here ever exits.
pub(crate) struct CatalogRefresher<R, C> {
    service: Arc<CatalogService<R, C>>,
    interval: Duration,
}

impl<R, C> CatalogRefresher<R, C>
where
    R: CatalogRepository,
    C: CatalogClient,
{
    pub(crate) fn new(service: Arc<CatalogService<R, C>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    pub(crate) async fn start(self) {
        info!(interval = ?self.interval, "catalog refresher started");
        let mut ticks: u64 = 0;
        loop {
            tokio::time::sleep(self.interval).await;
            ticks += 1;

            match self.service.refresh_listings().await {
                Ok(summary) => info!(
                    categories = summary.categories,
                    courses = summary.courses,
                    "catalog refresh complete"
                ),
                Err(err) => warn!("catalog refresh failed: {err}"),
            }

            if ticks % REQUIREMENT_SWEEP_EVERY == 0 {
                match self.service.refresh_requirements().await {
                    Ok(degrees) => info!(degrees, "degree requirements refreshed"),
                    Err(err) => warn!("degree requirements refresh failed: {err}"),
                }
            }
        }
    }
}
