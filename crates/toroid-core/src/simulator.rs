//! The simulator: one run from seed to termination.
//!
//! # Phases
//!
//! - **Seeding** -- no history yet. The current grid may be edited with
//!   [`toggle_cell`](Simulator::toggle_cell), [`clear_all`](Simulator::clear_all),
//!   pattern placement, or random fill.
//! - **Stepping** -- the first [`advance`](Simulator::advance) records the
//!   seed as generation 1. Every later call derives a new grid from the
//!   current one and appends the current one to history.
//! - **Terminated** -- a step found the population extinct or found the new
//!   generation already in history. Further `advance` calls are refused
//!   until [`reset`](Simulator::reset).
//!
//! # History
//!
//! History is append-only for the life of a run and is never handed out
//! mutably, so every recorded generation stays exactly as it was when it
//! was recorded. Cycle detection compares each new generation against the
//! whole history, which catches oscillators of any period, not just still
//! lifes. The cost is quadratic in the number of steps.

use std::time::{Duration, Instant};

use toroid_grid::{Evaluation, Grid, GridConfig, GridError};
use toroid_types::{Phase, RunId, StepResult, Termination};
use tracing::{debug, info};

use crate::config::SeedConfig;
use crate::seeding::{self, Pattern};

/// Errors that can occur while driving a simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// The operation is not allowed in the current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidStateTransition {
        /// Phase the simulator was in.
        phase: Phase,
        /// The refused operation.
        operation: &'static str,
    },

    /// A random fill density outside `[0, 1]`.
    #[error("seed density {density} is outside [0, 1]")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },

    /// A pattern name that matches no built-in pattern.
    #[error("unknown seed pattern: {name}")]
    UnknownPattern {
        /// The name that was looked up.
        name: String,
    },

    /// A grid addressing or configuration contract was violated.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Owns a configuration, the current generation, and the history of a run.
#[derive(Debug)]
pub struct Simulator {
    run_id: RunId,
    config: GridConfig,
    evaluation: Evaluation,
    phase: Phase,
    current: Grid,
    history: Vec<Grid>,
    last_result: Option<StepResult>,
}

impl Simulator {
    /// A simulator in the seeding phase with an all-dead grid.
    pub fn new(config: GridConfig) -> Self {
        Self::with_evaluation(config, Evaluation::default())
    }

    /// Like [`new`](Self::new), choosing how next generations are built.
    /// Both strategies produce identical grids.
    pub fn with_evaluation(config: GridConfig, evaluation: Evaluation) -> Self {
        Self {
            run_id: RunId::new(),
            config,
            evaluation,
            phase: Phase::Seeding,
            current: Grid::new(config),
            history: Vec::new(),
            last_result: None,
        }
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Flip one seed cell and return its new liveness.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, SimulatorError> {
        self.ensure_seeding("toggle a cell")?;
        Ok(self.current.toggle_cell(row, col)?)
    }

    /// Set one seed cell.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<(), SimulatorError> {
        self.ensure_seeding("set a cell")?;
        Ok(self.current.set_alive(row, col, alive)?)
    }

    /// Kill every seed cell.
    pub fn clear_all(&mut self) -> Result<(), SimulatorError> {
        self.ensure_seeding("clear the grid")?;
        self.current.clear();
        Ok(())
    }

    /// Stamp `pattern` onto the seed with its upper-left corner at
    /// `(origin_row, origin_col)`.
    pub fn place_pattern(
        &mut self,
        pattern: &Pattern,
        origin_row: usize,
        origin_col: usize,
    ) -> Result<(), SimulatorError> {
        self.ensure_seeding("place a pattern")?;
        seeding::place_pattern(&mut self.current, pattern, origin_row, origin_col)?;
        Ok(())
    }

    /// Replace the seed with a reproducible random fill.
    pub fn randomize(&mut self, density: f64, seed: u64) -> Result<(), SimulatorError> {
        self.ensure_seeding("randomize the grid")?;
        seeding::random_fill(&mut self.current, density, seed)
    }

    /// Build the seed described by `seed`: random fill first (if a density
    /// is set), then the named pattern, then the listed cells.
    ///
    /// The seed is built on a scratch grid; on error the current seed is
    /// left exactly as it was.
    pub fn apply_seed(&mut self, seed: &SeedConfig) -> Result<(), SimulatorError> {
        self.ensure_seeding("apply a seed")?;
        let mut scratch = self.current.clone();
        if let Some(density) = seed.random_density {
            seeding::random_fill(&mut scratch, density, seed.random_seed)?;
        }
        if let Some(name) = seed.pattern.as_deref() {
            let pattern = Pattern::by_name(name).ok_or_else(|| SimulatorError::UnknownPattern {
                name: name.to_owned(),
            })?;
            seeding::place_pattern(&mut scratch, pattern, seed.origin_row, seed.origin_col)?;
        }
        for &(row, col) in &seed.cells {
            scratch.set_alive(row, col, true)?;
        }
        self.current = scratch;
        info!(
            run_id = %self.run_id,
            population = self.current.population(),
            "Seed applied"
        );
        Ok(())
    }

    /// Drop the history and start a new run from an empty seed.
    pub fn reset(&mut self) {
        self.run_id = RunId::new();
        self.phase = Phase::Seeding;
        self.current = Grid::new(self.config);
        self.history.clear();
        self.last_result = None;
        info!(run_id = %self.run_id, "Simulator reset");
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Advance the run by one generation.
    ///
    /// The first call only records the seed as generation 1 and reports
    /// step 1 with zero elapsed time. Each later call appends the current
    /// grid to history, derives the next one, and checks, in order, for
    /// extinction and for a repeat of any recorded generation.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidStateTransition`] once the run has
    /// terminated.
    pub fn advance(&mut self) -> Result<StepResult, SimulatorError> {
        let result = match self.phase {
            Phase::Terminated => {
                return Err(SimulatorError::InvalidStateTransition {
                    phase: self.phase,
                    operation: "advance",
                });
            }
            Phase::Seeding => self.register_seed(),
            Phase::Stepping => self.step()?,
        };
        self.last_result = Some(result.clone());
        Ok(result)
    }

    fn register_seed(&mut self) -> StepResult {
        self.history.push(self.current.clone());
        self.phase = Phase::Stepping;
        info!(
            run_id = %self.run_id,
            grid = %self.config,
            population = self.current.population(),
            "Seed registered as generation 1"
        );
        StepResult::succeeded(self.step_number(), Duration::ZERO)
    }

    fn step(&mut self) -> Result<StepResult, SimulatorError> {
        let started = Instant::now();
        let next = Grid::from_previous_with(self.config, &self.current, self.evaluation)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
        let elapsed = started.elapsed();

        let step = self.step_number();
        debug!(
            run_id = %self.run_id,
            step,
            population = self.current.population(),
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "Generation computed"
        );

        match self.detect_termination()? {
            Some(termination) => {
                self.phase = Phase::Terminated;
                info!(
                    run_id = %self.run_id,
                    step,
                    reason = %termination,
                    "Simulation terminated"
                );
                Ok(StepResult::terminated(step, termination, elapsed))
            }
            None => Ok(StepResult::succeeded(step, elapsed)),
        }
    }

    fn detect_termination(&self) -> Result<Option<Termination>, SimulatorError> {
        if self.current.is_empty() {
            return Ok(Some(Termination::Extinct));
        }
        for past in &self.history {
            if past.equal_to(&self.current)? {
                return Ok(Some(Termination::CycleDetected));
            }
        }
        Ok(None)
    }

    fn step_number(&self) -> u64 {
        u64::try_from(self.history.len()).unwrap_or(u64::MAX)
    }

    fn ensure_seeding(&self, operation: &'static str) -> Result<(), SimulatorError> {
        if self.phase == Phase::Seeding {
            Ok(())
        } else {
            Err(SimulatorError::InvalidStateTransition {
                phase: self.phase,
                operation,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// The generation the renderer should show now.
    pub const fn current_grid(&self) -> &Grid {
        &self.current
    }

    /// The most recently recorded generation, or `None` before the first
    /// [`advance`](Self::advance).
    pub fn previous_grid(&self) -> Option<&Grid> {
        self.history.last()
    }

    /// Every recorded generation; index 0 is generation 1 (the seed).
    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    /// Number of recorded generations.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether the cell at `(row, col)` of the current generation is alive.
    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, SimulatorError> {
        Ok(self.current.is_alive(row, col)?)
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Grid dimensions for this run.
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.config.width()
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.config.height()
    }

    /// Next-generation strategy in use.
    pub const fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Identifier of the current run.
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The result of the most recent successful `advance` call.
    pub const fn last_result(&self) -> Option<&StepResult> {
        self.last_result.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn simulator(width: usize, height: usize) -> Simulator {
        Simulator::new(GridConfig::new(width, height).unwrap())
    }

    #[test]
    fn starts_seeding_with_empty_grid() {
        let sim = simulator(4, 3);
        assert_eq!(sim.phase(), Phase::Seeding);
        assert!(sim.current_grid().is_empty());
        assert!(sim.previous_grid().is_none());
        assert_eq!(sim.history_len(), 0);
        assert_eq!((sim.width(), sim.height()), (4, 3));
    }

    #[test]
    fn first_advance_only_registers_seed() {
        let mut sim = simulator(5, 5);
        sim.toggle_cell(2, 2).unwrap();
        let result = sim.advance().unwrap();
        assert_eq!(result, StepResult::succeeded(1, Duration::ZERO));
        assert_eq!(sim.phase(), Phase::Stepping);
        assert_eq!(sim.history_len(), 1);
        // No computation yet: the lonely cell is still alive.
        assert!(sim.is_alive(2, 2).unwrap());
        assert_eq!(sim.previous_grid(), Some(sim.current_grid()));
    }

    #[test]
    fn empty_seed_is_extinct_on_second_call() {
        let mut sim = simulator(4, 4);
        assert!(sim.advance().unwrap().success);
        let result = sim.advance().unwrap();
        assert!(!result.success);
        assert_eq!(result.step, 2);
        assert_eq!(result.message, "extinct");
        assert_eq!(result.termination, Some(Termination::Extinct));
        assert_eq!(sim.phase(), Phase::Terminated);
    }

    #[test]
    fn still_life_is_a_cycle_on_second_call() {
        let mut sim = simulator(6, 6);
        sim.place_pattern(Pattern::by_name("block").unwrap(), 2, 2).unwrap();
        sim.advance().unwrap();
        let result = sim.advance().unwrap();
        assert!(!result.success);
        assert_eq!(result.step, 2);
        assert_eq!(result.message, "cycle detected");
    }

    #[test]
    fn blinker_cycle_detected_on_third_call() {
        let mut sim = simulator(5, 5);
        sim.place_pattern(Pattern::by_name("blinker").unwrap(), 2, 1).unwrap();
        assert!(sim.advance().unwrap().success);
        let second = sim.advance().unwrap();
        assert!(second.success);
        assert_eq!(second.step, 2);
        assert!(sim.is_alive(1, 2).unwrap());
        assert!(!sim.is_alive(2, 1).unwrap());
        let third = sim.advance().unwrap();
        assert!(!third.success);
        assert_eq!(third.step, 3);
        assert_eq!(third.termination, Some(Termination::CycleDetected));
    }

    #[test]
    fn terminated_refuses_further_steps() {
        let mut sim = simulator(3, 3);
        sim.advance().unwrap();
        sim.advance().unwrap();
        let history_len = sim.history_len();
        assert!(matches!(
            sim.advance(),
            Err(SimulatorError::InvalidStateTransition {
                phase: Phase::Terminated,
                operation: "advance"
            })
        ));
        assert_eq!(sim.history_len(), history_len);
        assert_eq!(sim.last_result().map(|r| r.step), Some(2));
    }

    #[test]
    fn seed_edits_refused_after_stepping_begins() {
        let mut sim = simulator(5, 5);
        sim.toggle_cell(0, 0).unwrap();
        sim.advance().unwrap();
        assert!(matches!(
            sim.toggle_cell(0, 0),
            Err(SimulatorError::InvalidStateTransition { phase: Phase::Stepping, .. })
        ));
        assert!(sim.clear_all().is_err());
        assert!(sim.set_alive(1, 1, true).is_err());
        assert!(sim.randomize(0.5, 1).is_err());
        assert!(sim.is_alive(0, 0).unwrap());
    }

    #[test]
    fn out_of_range_toggle_is_an_error() {
        let mut sim = simulator(5, 5);
        assert!(matches!(
            sim.toggle_cell(5, 0),
            Err(SimulatorError::Grid {
                source: GridError::OutOfRangeAddress { .. }
            })
        ));
    }

    #[test]
    fn reset_returns_to_seeding() {
        let mut sim = simulator(4, 4);
        let first_run = sim.run_id();
        sim.toggle_cell(1, 1).unwrap();
        sim.advance().unwrap();
        sim.advance().unwrap();
        sim.reset();
        assert_eq!(sim.phase(), Phase::Seeding);
        assert_eq!(sim.history_len(), 0);
        assert!(sim.current_grid().is_empty());
        assert!(sim.last_result().is_none());
        assert_ne!(sim.run_id(), first_run);
        sim.toggle_cell(0, 0).unwrap();
    }

    #[test]
    fn apply_seed_combines_sources() {
        let mut sim = simulator(8, 8);
        let seed = SeedConfig {
            pattern: Some("Glider".to_owned()),
            origin_row: 1,
            origin_col: 1,
            cells: vec![(7, 7)],
            random_density: None,
            random_seed: 0,
        };
        sim.apply_seed(&seed).unwrap();
        assert_eq!(sim.current_grid().population(), 6);
        assert!(sim.is_alive(7, 7).unwrap());
        assert!(sim.is_alive(1, 2).unwrap());
    }

    #[test]
    fn apply_seed_rejects_unknown_pattern() {
        let mut sim = simulator(8, 8);
        let seed = SeedConfig {
            pattern: Some("spaceship".to_owned()),
            ..SeedConfig::default()
        };
        assert!(matches!(
            sim.apply_seed(&seed),
            Err(SimulatorError::UnknownPattern { .. })
        ));
    }

    #[test]
    fn failed_apply_seed_leaves_seed_untouched() {
        let mut sim = simulator(10, 10);
        sim.toggle_cell(4, 4).unwrap();
        let before = sim.current_grid().clone();

        let unknown_pattern = SeedConfig {
            random_density: Some(0.5),
            random_seed: 3,
            pattern: Some("nope".to_owned()),
            ..SeedConfig::default()
        };
        assert!(matches!(
            sim.apply_seed(&unknown_pattern),
            Err(SimulatorError::UnknownPattern { .. })
        ));
        assert_eq!(sim.current_grid(), &before);

        let bad_cell = SeedConfig {
            pattern: Some("block".to_owned()),
            cells: vec![(0, 0), (10, 0)],
            ..SeedConfig::default()
        };
        assert!(matches!(
            sim.apply_seed(&bad_cell),
            Err(SimulatorError::Grid { .. })
        ));
        assert_eq!(sim.current_grid(), &before);
        assert_eq!(sim.current_grid().population(), 1);
    }

    #[test]
    fn apply_seed_refused_after_stepping_begins() {
        let mut sim = simulator(6, 6);
        sim.advance().unwrap();
        let seed = SeedConfig {
            pattern: Some("block".to_owned()),
            ..SeedConfig::default()
        };
        assert!(matches!(
            sim.apply_seed(&seed),
            Err(SimulatorError::InvalidStateTransition { phase: Phase::Stepping, .. })
        ));
        assert!(sim.current_grid().is_empty());
    }

    #[test]
    fn full_and_affected_runs_agree() {
        let cfg = GridConfig::new(12, 9).unwrap();
        let mut full = Simulator::with_evaluation(cfg, Evaluation::Full);
        let mut affected = Simulator::with_evaluation(cfg, Evaluation::Affected);
        full.randomize(0.35, 99).unwrap();
        affected.randomize(0.35, 99).unwrap();
        loop {
            let a = full.advance().unwrap();
            let b = affected.advance().unwrap();
            assert_eq!(a.step, b.step);
            assert_eq!(a.termination, b.termination);
            assert_eq!(full.current_grid(), affected.current_grid());
            if !a.success || a.step >= 200 {
                break;
            }
        }
    }
}
