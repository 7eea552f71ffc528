//! Grid dimensions and toroidal geometry.
//!
//! [`GridConfig`] is the single source of truth for mapping between
//! `(row, col)` positions and zero-based linear indices (row-major:
//! `index = row * width + col`) and for locating the eight neighbors of a
//! cell on the torus.
//!
//! # Wrap rule
//!
//! Neighbor coordinates step by at most one in each direction. A step off
//! the top edge lands on the bottom row, a step off the bottom edge lands on
//! row 0, and likewise for columns. A single wrap step is exact because the
//! offset never exceeds one.
//!
//! On grids narrower or shorter than three cells several of the eight
//! neighbor positions coincide. They are reported with multiplicity, never
//! de-duplicated: on a 1x1 grid every neighbor of cell 0 is cell 0 itself.

use crate::error::GridError;

/// Number of neighbors of every cell on the torus.
pub const NEIGHBOR_COUNT: usize = 8;

/// Unit step along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Stay,
    Forward,
}

/// Row and column steps to each neighbor, row-major from the upper left.
const NEIGHBOR_STEPS: [(Step, Step); NEIGHBOR_COUNT] = [
    (Step::Back, Step::Back),
    (Step::Back, Step::Stay),
    (Step::Back, Step::Forward),
    (Step::Stay, Step::Back),
    (Step::Stay, Step::Forward),
    (Step::Forward, Step::Back),
    (Step::Forward, Step::Stay),
    (Step::Forward, Step::Forward),
];

/// Dimensions of a toroidal grid.
///
/// Immutable for the lifetime of a simulation run. Construction validates
/// that both dimensions are at least 1 and that `width * height` fits in
/// `usize`, so every other method can rely on those facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    width: usize,
    height: usize,
    cell_count: usize,
}

impl GridConfig {
    /// Create a configuration for a `width` x `height` torus.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] if either dimension is
    /// zero or the cell count overflows. Dimensions are never clamped.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidConfiguration {
                width,
                height,
                reason: "width and height must both be at least 1".to_owned(),
            });
        }
        let cell_count =
            width
                .checked_mul(height)
                .ok_or_else(|| GridError::InvalidConfiguration {
                    width,
                    height,
                    reason: "cell count overflows usize".to_owned(),
                })?;
        Ok(Self {
            width,
            height,
            cell_count,
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`, always at least 1).
    pub const fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Linear index of `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRangeAddress`] if the position lies outside
    /// the grid. Direct addressing never wraps.
    pub const fn index_of(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfRangeAddress {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.linear(row, col))
    }

    /// `(row, col)` position of a linear index.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index >= cell_count`.
    pub fn position_of(&self, index: usize) -> Result<(usize, usize), GridError> {
        self.check_index(index)?;
        Ok(self.position(index))
    }

    /// Check that `index` addresses a cell of this grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index >= cell_count`.
    pub const fn check_index(&self, index: usize) -> Result<(), GridError> {
        if index >= self.cell_count {
            return Err(GridError::IndexOutOfRange {
                index,
                cell_count: self.cell_count,
            });
        }
        Ok(())
    }

    /// Linear indices of the eight toroidal neighbors of `index`, with
    /// multiplicity.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index >= cell_count`.
    pub fn neighbors(&self, index: usize) -> Result<[usize; NEIGHBOR_COUNT], GridError> {
        self.check_index(index)?;
        Ok(self.neighbors_unchecked(index))
    }

    /// Neighbor indices for an index already known to be in range.
    pub(crate) fn neighbors_unchecked(&self, index: usize) -> [usize; NEIGHBOR_COUNT] {
        let (row, col) = self.position(index);
        NEIGHBOR_STEPS.map(|(row_step, col_step)| {
            self.linear(
                wrap(row, row_step, self.height),
                wrap(col, col_step, self.width),
            )
        })
    }

    /// Row-major index; callers guarantee `row < height` and `col < width`,
    /// so the result is below `cell_count` and cannot overflow.
    const fn linear(&self, row: usize, col: usize) -> usize {
        row.saturating_mul(self.width).saturating_add(col)
    }

    /// Inverse of [`linear`](Self::linear). Width is never zero.
    const fn position(&self, index: usize) -> (usize, usize) {
        let row = match index.checked_div(self.width) {
            Some(row) => row,
            None => 0,
        };
        let col = match index.checked_rem(self.width) {
            Some(col) => col,
            None => 0,
        };
        (row, col)
    }
}

impl core::fmt::Display for GridConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Move `coord` one step along an axis of length `extent`, wrapping once.
const fn wrap(coord: usize, step: Step, extent: usize) -> usize {
    let last = extent.saturating_sub(1);
    match step {
        Step::Stay => coord,
        Step::Back => {
            if coord == 0 {
                last
            } else {
                coord.saturating_sub(1)
            }
        }
        Step::Forward => {
            if coord >= last {
                0
            } else {
                coord.saturating_add(1)
            }
        }
    }
}
