//! The per-step report returned by the simulator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enums::Termination;

/// Outcome of one `advance` call.
///
/// `success` is `false` exactly when `termination` is set; the message is
/// empty on success and carries [`Termination::message`] otherwise.
/// Termination is a normal outcome, not an error: the driver is expected to
/// stop stepping and display the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Whether the simulation may keep stepping.
    pub success: bool,
    /// 1-based step number, equal to the history length after the call.
    pub step: u64,
    /// Empty on success, otherwise the termination message.
    pub message: String,
    /// Wall time spent computing the next generation.
    pub elapsed_time: Duration,
    /// The terminal condition, if one was reached.
    pub termination: Option<Termination>,
}

impl StepResult {
    /// A non-terminal step.
    pub const fn succeeded(step: u64, elapsed_time: Duration) -> Self {
        Self {
            success: true,
            step,
            message: String::new(),
            elapsed_time,
            termination: None,
        }
    }

    /// A step that reached `termination`.
    pub fn terminated(step: u64, termination: Termination, elapsed_time: Duration) -> Self {
        Self {
            success: false,
            step,
            message: termination.message().to_owned(),
            elapsed_time,
            termination: Some(termination),
        }
    }

    /// Elapsed time in fractional milliseconds, as shown to users.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_time.as_secs_f64() * 1000.0
    }
}
