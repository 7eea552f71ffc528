//! Enumeration types for the Toroid life simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a simulator.
///
/// `Seeding` allows manual edits to the seed grid. The first call to
/// `advance` moves the simulator to `Stepping`, after which grids are only
/// ever derived. `Terminated` is absorbing until the simulator is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No history yet; the current grid may be edited.
    Seeding,
    /// History is non-empty; the current grid is derived each step.
    Stepping,
    /// A step reported a terminal condition.
    Terminated,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Seeding => "seeding",
            Self::Stepping => "stepping",
            Self::Terminated => "terminated",
        };
        f.write_str(label)
    }
}

/// A terminal condition detected by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The new generation has no live cells.
    Extinct,
    /// The new generation equals a generation already in history.
    CycleDetected,
}

impl Termination {
    /// Message reported in [`StepResult::message`](crate::StepResult).
    pub const fn message(self) -> &'static str {
        match self {
            Self::Extinct => "extinct",
            Self::CycleDetected => "cycle detected",
        }
    }
}

impl core::fmt::Display for Termination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Reason why a driven run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunEndReason {
    /// The population died out.
    Extinction,
    /// A generation repeated.
    CycleDetected,
    /// Reached the configured `max_steps` limit.
    MaxStepsReached,
    /// The operator (or Ctrl-C) requested a stop.
    OperatorStop,
}

impl From<Termination> for RunEndReason {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::Extinct => Self::Extinction,
            Termination::CycleDetected => Self::CycleDetected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn termination_messages() {
        assert_eq!(Termination::Extinct.message(), "extinct");
        assert_eq!(Termination::CycleDetected.message(), "cycle detected");
        assert_eq!(Termination::CycleDetected.to_string(), "cycle detected");
    }

    #[test]
    fn termination_maps_to_end_reason() {
        assert_eq!(
            RunEndReason::from(Termination::Extinct),
            RunEndReason::Extinction
        );
        assert_eq!(
            RunEndReason::from(Termination::CycleDetected),
            RunEndReason::CycleDetected
        );
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::Terminated).unwrap_or_default();
        assert_eq!(json, "\"terminated\"");
    }
}
