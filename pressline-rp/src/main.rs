//! pressline-rp - Release Processing service
//!
//! Demo runner: seeds the in-memory catalog with one release, submits it,
//! polls until the background pipeline settles, then prints the outcome and
//! the per-track verdict log. Exercises the full lifecycle without an HTTP
//! frontend.

use anyhow::Result;
use clap::Parser;
use pressline_common::config;
use pressline_common::events::EventBus;
use pressline_common::models::{Release, ReleaseStatus, Requester, Track};
use pressline_rp::processing::{ProcessingLogSink, SimulatedStageRunner, StageRunner};
use pressline_rp::store::{CatalogStore, MemoryCatalog};
use pressline_rp::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "pressline-rp", about = "Release processing demo runner")]
struct Args {
    /// Path to a pressline.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the simulated stage outcomes (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of demo tracks to seed
    #[arg(long, default_value_t = 3)]
    tracks: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config(args.config.as_deref())?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pressline-rp (Release Processing)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
    let runner: Arc<dyn StageRunner> = Arc::new(match args.seed {
        Some(seed) => SimulatedStageRunner::with_seed(config.processing.clone(), seed),
        None => SimulatedStageRunner::new(config.processing.clone()),
    });
    let state = AppState::new(Arc::clone(&store), runner, EventBus::new(256));

    // Seed one artist release with a few tracks
    let artist_id = Uuid::new_v4();
    let release = store
        .insert_release(Release::new(
            artist_id,
            "Demo Album".to_string(),
            "Electronic".to_string(),
        ))
        .await?;
    for number in 1..=args.tracks {
        store
            .insert_track(Track::new(
                release.id,
                format!("Track {:02}", number),
                number,
            ))
            .await?;
    }

    let receipt = state
        .submission_gate()
        .submit(release.id, &Requester::artist(artist_id))
        .await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    // Poll for the outcome the way a dashboard client would
    let outcome = loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let current = state.catalog().release(release.id).await?;
        if current.status != ReleaseStatus::Processing {
            break current;
        }
    };

    println!("Final status: {}", outcome.status);
    if let Some(reason) = &outcome.processing_error_reason {
        println!("Reason: {}", reason);
    }
    if let Some(verdicts) = state.logs.verdicts(release.id).await {
        for verdict in verdicts {
            println!(
                "  [{:?}] track {}: {}",
                verdict.status, verdict.track_id, verdict.message
            );
        }
    }

    state.registry.shutdown().await;
    Ok(())
}
