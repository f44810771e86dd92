//! A terminal replayer for recorded 6-max hands.
//!
//! Loads a hand from a JSON hand history (or generates a demo hand),
//! starts a replay actor for it and draws the table in the terminal.

use anyhow::{Context, Result};
use hand_replay::{Hand, Preferences, hand::synthetic, playback::ReplayActor};
use hr_viewer::{
    config::{CliOverrides, HandSource, ViewerConfig},
    logging,
    tui_app::TuiApp,
};
use pico_args::Arguments;
use std::path::PathBuf;

const HELP: &str = "\
Replay a recorded poker hand in the terminal

USAGE:
  hr_viewer [OPTIONS]

OPTIONS:
  --hand       PATH        Hand history JSON file to replay
  --demo       SEED        Replay a generated demo hand  [default: 1]
  --speed      N           Initial speed, one of 1, 2, 5, 10  [default: env REPLAYER_INITIAL_SPEED or 1]
  --delay-ms   N           Delay between actions at 1x  [default: env REPLAYER_BASE_DELAY_MS or 1000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  REPLAYER_BASE_DELAY_MS     Delay between actions at 1x, in milliseconds
  REPLAYER_INITIAL_SPEED     Initial speed; unsupported values snap down
  REPLAYER_PREFERENCES_PATH  Preferences file  [default: .hand_replay/preferences.json]
  REPLAYER_LOG_FILE          Log file  [default: hr_viewer.log]
  RUST_LOG                   Log filter  [default: info]
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        hand: pargs
            .opt_value_from_str::<_, PathBuf>("--hand")
            .context("Invalid --hand")?,
        demo: pargs.opt_value_from_str("--demo").context("Invalid --demo")?,
        speed: pargs.opt_value_from_str("--speed").context("Invalid --speed")?,
        delay_ms: pargs
            .opt_value_from_str("--delay-ms")
            .context("Invalid --delay-ms")?,
    };

    let config = ViewerConfig::from_env(overrides)?;
    config.validate()?;
    logging::init(&config.log_file)?;

    run(config).await
}

async fn run(config: ViewerConfig) -> Result<()> {
    let hand = match &config.source {
        HandSource::File(path) => Hand::load(path)
            .with_context(|| format!("Failed to load hand from {}", path.display()))?,
        HandSource::Demo(seed) => {
            log::info!("Generating demo hand from seed {seed}");
            synthetic::generate(*seed)
        }
    };
    let preferences = Preferences::load(&config.preferences_path);

    let (actor, handle) = ReplayActor::new(hand.total(), config.replay_config());
    let actor_task = tokio::spawn(actor.run());

    // Initialize terminal
    let terminal = ratatui::init();

    let tui_app = TuiApp::new(hand, handle.clone(), preferences, config.preferences_path);
    let result = tui_app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    if handle.shutdown().await.is_err() {
        log::debug!("Replay already closed");
    }
    actor_task.await.context("Replay task failed")?;

    result
}
