//! All-Star quest headless runner entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use allstar_commentary::application::offline::OfflineCommentarySource;
use allstar_commentary::application::service::CommentaryService;
use allstar_core::rng::{DeterministicRng, StdRandom};
use allstar_core::stage::Stage;
use allstar_session::application::orchestrator::GameOrchestrator;
use allstar_sim::autopilot::Autopilot;
use allstar_sim::config::SimConfig;
use allstar_sim::runner::{FrameSource, run_playthrough};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting All-Star quest simulation");

    let config = SimConfig::from_env()?;
    tracing::info!(
        tick_ms = config.tick.as_millis(),
        max_frames = config.max_frames,
        realtime = config.realtime,
        seed = ?config.seed,
        start_stage = %config.start_stage,
        "configuration loaded"
    );

    let rng = config
        .seed
        .map_or_else(StdRandom::from_entropy, StdRandom::seeded);
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(rng));
    let commentary = CommentaryService::new(
        Arc::new(OfflineCommentarySource),
        rng,
        config.tuning.commentary.clone(),
    );

    let mut orchestrator =
        GameOrchestrator::new(config.tuning.clone(), commentary, Handle::current())?;
    if config.start_stage != Stage::Start {
        orchestrator.resume_at(config.start_stage);
    }
    let autopilot = Autopilot::new(&config.tuning);
    let mut frames = FrameSource::from_config(&config);

    let played = run_playthrough(&mut orchestrator, &autopilot, &mut frames, config.max_frames)
        .await?;

    tracing::info!(
        frames = played,
        snapshot = %serde_json::to_string(&orchestrator.snapshot())?,
        "reached Success"
    );
    Ok(())
}
