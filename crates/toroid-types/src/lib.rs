//! Shared type definitions for the Toroid life simulation.
//!
//! This crate holds the small value types that cross crate boundaries:
//! what one step of the simulator reports, why a run ended, and the
//! identifier that tags a run in logs.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for run identifiers
//! - [`enums`] -- Simulator phases, termination kinds, run end reasons
//! - [`step`] -- [`StepResult`], the per-step report handed to the driver

pub mod enums;
pub mod ids;
pub mod step;

// Re-export all public types at crate root for convenience.
pub use enums::{Phase, RunEndReason, Termination};
pub use ids::RunId;
pub use step::StepResult;
