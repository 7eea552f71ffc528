//! Simulator, history, termination detection, and run loop for the Toroid
//! life simulation.
//!
//! The [`Simulator`] owns one run: the configuration, the current
//! generation, and the append-only history of every earlier generation.
//! Each call to [`Simulator::advance`] derives a fresh generation and
//! reports whether the run has died out or repeated itself.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `toroid-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- [`RunControl`]: stop flag, tick interval, step bound.
//! - [`runner`] -- The async loop that drives a simulator until it ends.
//! - [`seeding`] -- Named seed patterns and seeded random fill.
//! - [`simulator`] -- [`Simulator`] phases, stepping, and cycle detection.
//!
//! [`RunControl`]: control::RunControl
//! [`Simulator`]: simulator::Simulator
//! [`Simulator::advance`]: simulator::Simulator::advance

pub mod config;
pub mod control;
pub mod runner;
pub mod seeding;
pub mod simulator;
