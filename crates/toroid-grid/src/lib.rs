//! Toroidal grid geometry and generation snapshots for the Toroid life simulation.
//!
//! A [`Grid`] is one generation of cell liveness on a fixed-size torus. It
//! knows how to classify each of its cells for the next generation and how
//! to build that next generation as a fresh snapshot, leaving itself intact.
//!
//! # Modules
//!
//! - [`error`] -- Error types for addressing and configuration contracts.
//! - [`geometry`] -- [`GridConfig`]: dimensions, the row/col <-> index
//!   bijection, and toroidal neighbor positions.
//! - [`grid`] -- [`Grid`] snapshots, neighbor counting, and next-generation
//!   construction (full or affected-cell evaluation).
//! - [`rule`] -- The survival/birth rule.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod rule;

// Re-export primary types at crate root.
pub use error::GridError;
pub use geometry::GridConfig;
pub use grid::{Evaluation, Grid};
