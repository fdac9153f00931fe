//! Cron scheduler for the periodic trending refresh.
//!
//! The refresh job performs exactly the `/update/` flow, so a deployment
//! can run on the schedule, on explicit triggers, or both; the store's
//! uniqueness key makes the overlap harmless.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::config::CronSettings;
use crate::db::TrendingStore;
use crate::market::MarketDataProvider;

use super::jobs;

/// Cron scheduler that manages periodic background jobs.
pub struct CronScheduler {
    store: Arc<dyn TrendingStore>,
    provider: Arc<dyn MarketDataProvider>,
    trending_top_n: usize,
    settings: CronSettings,
}

impl CronScheduler {
    pub fn new(
        store: Arc<dyn TrendingStore>,
        provider: Arc<dyn MarketDataProvider>,
        trending_top_n: usize,
        settings: CronSettings,
    ) -> Self {
        Self {
            store,
            provider,
            trending_top_n,
            settings,
        }
    }

    /// Starts the cron scheduler and runs until cancellation.
    pub async fn run(&self, cancellation_token: CancellationToken) -> Result<()> {
        let mut scheduler = JobScheduler::new().await?;

        self.register_refresh_trending_job(&scheduler).await?;

        scheduler.start().await?;
        info!("Cron scheduler started with {} jobs", 1);

        cancellation_token.cancelled().await;
        info!("Cron scheduler shutting down...");

        scheduler.shutdown().await?;
        Ok(())
    }

    async fn register_refresh_trending_job(&self, scheduler: &JobScheduler) -> Result<()> {
        let store = self.store.clone();
        let provider = self.provider.clone();
        let top_n = self.trending_top_n;
        let interval = self.settings.trending_refresh_interval_secs;

        let job = Job::new_repeated_async(
            std::time::Duration::from_secs(interval),
            move |_uuid, _lock| {
                let store = store.clone();
                let provider = provider.clone();
                Box::pin(async move {
                    if let Err(e) =
                        jobs::refresh_trending::run(store.as_ref(), provider.as_ref(), top_n).await
                    {
                        error!("Failed to refresh trending coins: {:#}", e);
                    }
                })
            },
        )?;

        scheduler.add(job).await?;
        info!("Registered refresh_trending job (every {}s)", interval);
        Ok(())
    }
}
