//! berthd - the placement-advisory daemon.
//!
//! Single binary that assembles the advisory subsystems:
//! - Inventory watcher (long-poll against the metadata service)
//! - Placement advisor + event router
//! - Counters + periodic stats log
//! - HTTP surface (events, health, stats, metrics)
//!
//! # Usage
//!
//! ```text
//! berthd --metadata-address rancher-metadata:80 --listen 80
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use berth_api::ApiState;
use berth_events::{EventRouter, PlacementAdvisor};
use berth_inventory::{InventoryWatcher, MetadataClient, SnapshotHandle};
use berth_metrics::Counters;

/// Pause before a failed watcher is brought back up.
const WATCHER_RESTART_DELAY: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "berthd", version, about = "Placement-advisory daemon")]
struct Cli {
    /// host:port of the inventory metadata service.
    #[arg(long, default_value = "rancher-metadata:80")]
    metadata_address: String,

    /// Port to listen on for transport events and health checks.
    #[arg(long, default_value = "80")]
    listen: u16,

    /// Maximum number of events handled concurrently.
    #[arg(long, default_value = "100")]
    worker_limit: usize,

    /// Seconds between periodic stats log lines.
    #[arg(long, default_value = "15")]
    stats_interval: u64,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.debug {
        "debug"
    } else {
        "info,berthd=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();

    info!(
        metadata_address = %cli.metadata_address,
        listen = cli.listen,
        "berthd starting"
    );

    // ── Assemble subsystems ────────────────────────────────────

    let counters = Arc::new(Counters::new());
    let snapshots = SnapshotHandle::new();
    let client = MetadataClient::new(cli.metadata_address.clone());

    let advisor = PlacementAdvisor::new(snapshots.clone(), counters.clone());
    let events = Arc::new(EventRouter::new(advisor, cli.worker_limit));

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background tasks ───────────────────────────────────────

    let watcher_handle = tokio::spawn(supervise_watcher(
        client,
        snapshots,
        counters.clone(),
        shutdown_rx.clone(),
    ));

    let stats_handle = tokio::spawn({
        let counters = counters.clone();
        let shutdown = shutdown_rx.clone();
        let interval = Duration::from_secs(cli.stats_interval);
        async move {
            counters.run(interval, shutdown).await;
        }
    });

    // ── HTTP surface ───────────────────────────────────────────

    let router = berth_api::build_router(ApiState { events, counters });
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.listen));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "listening for requests");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    let _ = watcher_handle.await;
    let _ = stats_handle.await;

    info!("berthd stopped");
    Ok(())
}

/// Keep the inventory watcher alive for the process lifetime.
///
/// Retry exhaustion inside the watcher surfaces here; the watcher is
/// rebuilt from scratch so it re-fetches everything rather than carry a
/// snapshot it could no longer refresh.
async fn supervise_watcher(
    client: MetadataClient,
    snapshots: SnapshotHandle,
    counters: Arc<Counters>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let mut watcher =
            InventoryWatcher::new(client.clone(), snapshots.clone(), counters.clone());

        match watcher.run(shutdown.clone()).await {
            Ok(()) => break,
            Err(err) => error!(error = %err, "inventory watcher failed, restarting"),
        }

        tokio::select! {
            _ = tokio::time::sleep(WATCHER_RESTART_DELAY) => {}
            _ = shutdown.changed() => break,
        }
    }
}
