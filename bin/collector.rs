use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use tendance::api::{self, AppState};
use tendance::{CoinGeckoClient, CronScheduler, PostgresClient, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings =
        Settings::new().context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let postgres = PostgresClient::new(&settings.postgres)
        .await
        .context("Failed to initialize database connection")?;
    postgres.migrate().await?;

    let provider = Arc::new(
        CoinGeckoClient::new(&settings.market).context("Failed to build market data client")?,
    );

    let cancellation_token = CancellationToken::new();

    // Optional periodic trending refresh; POST /update/ works either way
    let cron_handle = settings.cron.clone().map(|cron_settings| {
        let scheduler = CronScheduler::new(
            Arc::new(postgres.clone()),
            provider.clone(),
            settings.market.trending_top_n,
            cron_settings,
        );
        let cron_token = cancellation_token.child_token();
        tokio::spawn(async move {
            if let Err(e) = scheduler.run(cron_token).await {
                error!("Cron scheduler failed: {:#}", e);
            }
        })
    });

    let state = Arc::new(AppState {
        postgres,
        provider,
        trending_top_n: settings.market.trending_top_n,
    });

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.collector.listen)
        .await
        .with_context(|| format!("Failed to bind {}", settings.collector.listen))?;
    info!("Collector listening on http://{}", settings.collector.listen);

    let server_token = cancellation_token.child_token();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(server_token.cancelled_owned())
            .await
        {
            error!("HTTP server failed: {e}");
        }
    });

    wait_for_shutdown_signal().await?;

    // Cancel all running tasks
    info!("Finishing all tasks...");
    cancellation_token.cancel();

    let _ = server_handle.await;
    if let Some(handle) = cron_handle {
        let _ = handle.await;
    }

    info!("Collector stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm_stream =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
            _ = sigterm_stream.recv() => {
                info!("Received SIGTERM, exiting gracefully...");
            },
        };
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
    }

    Ok(())
}
