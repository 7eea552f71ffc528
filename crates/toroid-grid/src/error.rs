//! Error types for the `toroid-grid` crate.
//!
//! Every variant is a contract violation by the caller. None of them are
//! retried; they surface immediately so the bug can be fixed.

use crate::geometry::GridConfig;

/// Errors that can occur during grid construction and addressing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height is zero, or the cell count does not fit in `usize`.
    #[error("invalid grid configuration {width}x{height}: {reason}")]
    InvalidConfiguration {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// A direct (row, col) address lies outside the grid. Wrap-around only
    /// applies to neighbor computation, never to direct addressing.
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfRangeAddress {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// A linear cell index lies outside `[0, cell_count)`.
    #[error("cell index {index} is outside [0, {cell_count})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells in the grid.
        cell_count: usize,
    },

    /// Two grids built from different configurations were compared or
    /// derived from one another.
    #[error("grid configuration mismatch: expected {expected}, found {found}")]
    ConfigurationMismatch {
        /// Configuration the operation was asked to use.
        expected: GridConfig,
        /// Configuration actually carried by the other grid.
        found: GridConfig,
    },
}
