//! Terminal driver for the Toroid life simulation.
//!
//! Wires configuration, seeding, the run loop, and rendering together.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `toroid-config.yaml` (or `$TOROID_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulator and apply the seed
//! 4. Install the Ctrl-C stop handler
//! 5. Run the loop until extinction, a repeated generation, the step
//!    bound, or a stop request
//! 6. Log the result

mod error;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use toroid_core::config::{LoggingConfig, SimulationConfig};
use toroid_core::control::RunControl;
use toroid_core::runner;
use toroid_core::simulator::Simulator;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::TerminalRenderer;

/// Environment variable naming an alternative config file.
const CONFIG_PATH_ENV: &str = "TOROID_CONFIG";

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "toroid-config.yaml";

/// Environment variable that overrides `logging.level`.
const LOG_LEVEL_ENV: &str = "TOROID_LOG";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, seeding, or the run itself fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        config_path = %config_path.display(),
        width = config.grid.width,
        height = config.grid.height,
        evaluation = ?config.grid.evaluation,
        tick_interval_ms = config.run.tick_interval_ms,
        max_steps = config.run.max_steps,
        "Configuration loaded"
    );

    // 3. Build and seed the simulator.
    let grid_config = config.grid.grid_config()?;
    let mut simulator = Simulator::with_evaluation(grid_config, config.grid.evaluation);
    simulator.apply_seed(&config.seed)?;
    if simulator.current_grid().is_empty() {
        warn!("Seed has no live cells; the run will end as extinct on step 2");
    }

    // 4. Stop on Ctrl-C, checked between steps.
    let control = Arc::new(RunControl::new(&config.run));
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after the current step");
                    control.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run.
    let mut renderer = TerminalRenderer::new(config.run.render);
    let result = runner::run_simulation(&mut simulator, &control, &mut renderer).await?;

    // 6. Log results.
    runner::log_run_end(&result);
    match serde_json::to_string(&result.final_result) {
        Ok(summary) => info!(summary = %summary, "Final step result"),
        Err(e) => warn!(error = %e, "failed to serialize final step result"),
    }

    Ok(())
}

/// Load the simulation configuration.
///
/// Uses `$TOROID_CONFIG` when set, otherwise `toroid-config.yaml` in the
/// working directory. A missing default file means defaults; a missing
/// explicitly named file is an error. `$TOROID_LOG` overrides the log level.
fn load_config() -> Result<(SimulationConfig, PathBuf), EngineError> {
    let (mut config, path) = match std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        Some(path) => (SimulationConfig::from_file(&path)?, path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            let config = if path.exists() {
                SimulationConfig::from_file(&path)?
            } else {
                SimulationConfig::default()
            };
            (config, path)
        }
    };
    apply_log_level_override(&mut config.logging, std::env::var(LOG_LEVEL_ENV).ok());
    Ok((config, path))
}

/// Replace the configured log level when an override is present.
fn apply_log_level_override(logging: &mut LoggingConfig, level: Option<String>) {
    if let Some(level) = level {
        logging.level = level;
    }
}

/// Install the global tracing subscriber.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_new(&logging.level).map_err(|e| EngineError::Logging {
        message: format!("invalid log level {:?}: {e}", logging.level),
    })?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: format!("{e}"),
    })
}
