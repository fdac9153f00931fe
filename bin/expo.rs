use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use tendance::expo::{self, CollectorClient, ExpoState};
use tendance::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings =
        Settings::new().context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let collector =
        CollectorClient::new(&settings.expo).context("Failed to build collector client")?;

    let state = Arc::new(ExpoState {
        collector,
    });
    let app = expo::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.expo.listen)
        .await
        .with_context(|| format!("Failed to bind {}", settings.expo.listen))?;
    info!("Expo listening on http://{}", settings.expo.listen);
    info!("Composing collector at {}", settings.expo.collector_url);

    let cancellation_token = CancellationToken::new();
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

    info!("Finishing all tasks...");
    cancellation_token.cancel();
    let _ = server_handle.await;

    info!("Expo stopped");
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
