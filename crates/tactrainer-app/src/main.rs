//! Headless tactical trainer runner.
//!
//! Runs the simulation at 60 Hz for a fixed wall-clock duration, logging a
//! status line every second, then optionally saves the final scenario.
//!
//! # Usage
//!
//! ```bash
//! # Default ownship, empty catalogs, ten seconds
//! cargo run -p tactrainer-app
//!
//! # Scenario with catalogs, saved when done
//! cargo run -p tactrainer-app -- --platforms data/platforms.json \
//!     --weapons data/weapons.json --scenario missions/strait.json \
//!     --seconds 60 --save out/strait-end.json
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the level.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tactrainer_app::config::AppConfig;
use tactrainer_app::control;
use tactrainer_app::state::AppState;
use tactrainer_core::catalog::{PlatformCatalog, WeaponCatalog};
use tactrainer_core::commands::OperatorCommand;
use tactrainer_sim::{ScenarioDocument, SimulationEngine};

#[derive(Parser)]
#[command(name = "tactrainer")]
#[command(about = "Headless tactical trainer simulation")]
#[command(version)]
struct Cli {
    /// Application config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Platform catalog JSON (overrides config)
    #[arg(long)]
    platforms: Option<PathBuf>,

    /// Weapon catalog JSON (overrides config)
    #[arg(long)]
    weapons: Option<PathBuf>,

    /// Scenario document to start with (overrides config)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Wall-clock seconds to run
    #[arg(long, default_value = "10")]
    seconds: f64,

    /// Save the final scenario here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).map_err(|e| e.to_string())?,
        None => AppConfig::default(),
    };
    if cli.platforms.is_some() {
        config.platforms = cli.platforms;
    }
    if cli.weapons.is_some() {
        config.weapons = cli.weapons;
    }
    if cli.scenario.is_some() {
        config.scenario = cli.scenario;
    }

    let platforms = config
        .platforms
        .as_deref()
        .map(PlatformCatalog::load)
        .unwrap_or_default();
    let weapons = config
        .weapons
        .as_deref()
        .map(WeaponCatalog::load)
        .unwrap_or_default();
    tracing::info!(platforms = platforms.len(), weapons = weapons.len(), "Catalogs ready");

    let mut engine =
        SimulationEngine::with_catalogs(config.sim_config(), Arc::new(platforms), Arc::new(weapons));
    if let Some(path) = &config.scenario {
        let doc = ScenarioDocument::load_from_file(path).map_err(|e| e.to_string())?;
        engine.start_scenario(doc).map_err(|e| e.to_string())?;
    }

    let state = AppState::new();
    control::start(&state, engine).map_err(|e| e.to_string())?;

    let duration = Duration::from_secs_f64(cli.seconds.max(0.0));
    let started = Instant::now();
    while started.elapsed() < duration {
        std::thread::sleep(Duration::from_secs(1).min(duration.saturating_sub(started.elapsed())));
        if let Some(snapshot) = control::get_snapshot(&state).map_err(|e| e.to_string())? {
            tracing::info!(
                tick = snapshot.time.tick,
                clock = snapshot.mission_clock_secs,
                assets = snapshot.assets.len(),
                weapons = snapshot.weapons.len(),
                radar_returns = snapshot.radar_returns.len(),
                esm = snapshot.esm_contacts.len(),
                "Status"
            );
        }
    }

    if let Some(path) = &cli.save {
        control::send_command(
            &state,
            OperatorCommand::SaveScenario {
                path: path.display().to_string(),
            },
        )
        .map_err(|e| e.to_string())?;
    }
    control::stop(&state).map_err(|e| e.to_string())?;

    if let Some(snapshot) = control::get_snapshot(&state).map_err(|e| e.to_string())? {
        for alert in &snapshot.alerts {
            tracing::warn!(level = ?alert.level, "{}", alert.message);
        }
        tracing::info!(tick = snapshot.time.tick, "Run complete");
    }
    Ok(())
}
