//! Run loop that drives a [`Simulator`] until it ends.
//!
//! [`run_simulation`] calls [`Simulator::advance`] once per tick and waits
//! for it to return before the next call. Between steps it checks, in
//! order:
//!
//! - **Stop request**: the driver (or a Ctrl-C handler) set the stop flag.
//! - **Termination**: the step reported extinction or a repeated generation.
//! - **Step bound**: the step number reached `max_steps`.
//!
//! It then sleeps for the tick interval. Nothing inside a step is
//! cancellable; each step is a bounded synchronous pass over the grid.

use tokio::time::Duration;
use toroid_types::{RunEndReason, RunId, StepResult};
use tracing::{info, warn};

use crate::control::RunControl;
use crate::simulator::{Simulator, SimulatorError};

/// Errors that can occur during the run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step was refused by the simulator.
    #[error("simulator error: {source}")]
    Simulator {
        /// The underlying simulator error.
        #[from]
        source: SimulatorError,
    },
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The run that ended.
    pub run_id: RunId,
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last step result, if any step completed.
    pub final_result: Option<StepResult>,
    /// Number of `advance` calls made by this loop.
    pub total_steps: u64,
}

/// Callback invoked after each step completes.
///
/// Implementations typically render the difference between
/// [`Simulator::previous_grid`] and [`Simulator::current_grid`].
pub trait StepCallback: Send {
    /// Called after a step returns, terminal or not.
    fn on_step(&mut self, result: &StepResult, simulator: &Simulator);
}

/// A no-op step callback for testing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _result: &StepResult, _simulator: &Simulator) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if the simulator refuses a step, for example
/// because it had already terminated before the loop started.
pub async fn run_simulation(
    simulator: &mut Simulator,
    control: &RunControl,
    callback: &mut dyn StepCallback,
) -> Result<RunResult, RunnerError> {
    let run_id = simulator.run_id();
    let mut final_result: Option<StepResult> = None;
    let mut total_steps: u64 = 0;

    info!(
        run_id = %run_id,
        grid = %simulator.config(),
        max_steps = control.max_steps(),
        tick_interval_ms = control.tick_interval_ms(),
        "Run starting"
    );

    loop {
        if control.is_stop_requested() {
            info!(run_id = %run_id, "Stop requested");
            return Ok(RunResult {
                run_id,
                end_reason: RunEndReason::OperatorStop,
                final_result,
                total_steps,
            });
        }

        let result = match simulator.advance() {
            Ok(result) => result,
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "Step refused");
                return Err(e.into());
            }
        };
        total_steps = total_steps.saturating_add(1);

        callback.on_step(&result, simulator);

        if let Some(termination) = result.termination {
            return Ok(RunResult {
                run_id,
                end_reason: termination.into(),
                final_result: Some(result),
                total_steps,
            });
        }

        if control.step_limit_reached(result.step) {
            info!(
                run_id = %run_id,
                step = result.step,
                max_steps = control.max_steps(),
                "Step limit reached"
            );
            return Ok(RunResult {
                run_id,
                end_reason: RunEndReason::MaxStepsReached,
                final_result: Some(result),
                total_steps,
            });
        }

        final_result = Some(result);

        let interval_ms = control.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the outcome of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        run_id = %result.run_id,
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        final_step = result.final_result.as_ref().map(|r| r.step),
        message = result.final_result.as_ref().map(|r| r.message.as_str()),
        "Run ended"
    );

    if result.final_result.is_none() {
        warn!(run_id = %result.run_id, "Run ended with no steps executed");
    }
}
