//! Run control shared between the run loop and whatever stops it.
//!
//! The loop checks the stop flag between steps, never during one, so a
//! stop request takes effect after the step in flight returns. All fields
//! are atomics so the control can be shared through an [`Arc`] with a
//! signal handler or another task without locking.
//!
//! [`Arc`]: std::sync::Arc

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::config::RunConfig;

/// Stop flag, pacing, and step bound for one run.
#[derive(Debug)]
pub struct RunControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Delay between steps in milliseconds (runtime-adjustable).
    tick_interval_ms: AtomicU64,

    /// Maximum step number to reach (0 = unlimited).
    max_steps: u64,

    /// Wall-clock time when the control was created.
    started_at: DateTime<Utc>,
}

impl RunControl {
    /// Create a run control from configuration.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: AtomicU64::new(config.tick_interval_ms),
            max_steps: config.max_steps,
            started_at: Utc::now(),
        }
    }

    /// Request a stop before the next step.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Get the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval in milliseconds and return the previous one.
    pub fn set_tick_interval_ms(&self, ms: u64) -> u64 {
        self.tick_interval_ms.swap(ms, Ordering::AcqRel)
    }

    /// Maximum step number (0 = unlimited).
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Returns `true` if `max_steps > 0` and `step >= max_steps`.
    pub const fn step_limit_reached(&self, step: u64) -> bool {
        self.max_steps > 0 && step >= self.max_steps
    }

    /// Wall-clock time when the run started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds elapsed since the run started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // `num_seconds` can be negative if clocks are weird; treat as 0.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(tick_interval_ms: u64, max_steps: u64) -> RunConfig {
        RunConfig {
            tick_interval_ms,
            max_steps,
            render: false,
        }
    }

    #[test]
    fn stop_flag_latches() {
        let control = RunControl::new(&run_config(0, 0));
        assert!(!control.is_stop_requested());
        control.request_stop();
        assert!(control.is_stop_requested());
        control.request_stop();
        assert!(control.is_stop_requested());
    }

    #[test]
    fn interval_is_adjustable() {
        let control = RunControl::new(&run_config(250, 0));
        assert_eq!(control.tick_interval_ms(), 250);
        assert_eq!(control.set_tick_interval_ms(10), 250);
        assert_eq!(control.tick_interval_ms(), 10);
    }

    #[test]
    fn zero_max_steps_is_unlimited() {
        let control = RunControl::new(&run_config(0, 0));
        assert!(!control.step_limit_reached(u64::MAX));
    }

    #[test]
    fn step_limit_inclusive() {
        let control = RunControl::new(&run_config(0, 5));
        assert!(!control.step_limit_reached(4));
        assert!(control.step_limit_reached(5));
        assert!(control.step_limit_reached(6));
    }

    #[test]
    fn elapsed_starts_near_zero() {
        let control = RunControl::new(&run_config(0, 0));
        assert!(control.elapsed_seconds() < 5);
        assert!(control.started_at() <= Utc::now());
    }
}
