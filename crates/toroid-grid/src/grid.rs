//! One generation of cell liveness on a torus.
//!
//! A [`Grid`] is a dense row-major array of booleans, one per cell. Building
//! the next generation never mutates the source grid: it allocates a new
//! snapshot, so earlier generations can be kept verbatim for cycle
//! detection.
//!
//! Two construction paths exist and must agree cell for cell:
//!
//! - [`Evaluation::Full`] classifies every cell (the reference semantics).
//! - [`Evaluation::Affected`] classifies only live cells and their
//!   neighbors. A dead cell outside that set has no live neighbor and so
//!   stays dead. The set is a dense mask, and a grid populated enough that
//!   the mask could cover every cell takes the full pass instead.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::GridError;
use crate::geometry::{GridConfig, NEIGHBOR_COUNT};
use crate::rule::{self, MAX_DECISIVE_NEIGHBORS};

/// Strategy used to build the next generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Classify every cell.
    Full,
    /// Classify only live cells and their neighbors.
    #[default]
    Affected,
}

/// Liveness of every cell for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            cells: vec![false; config.cell_count()],
        }
    }

    /// A grid whose live cells are exactly `live` (duplicates are harmless).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] for any index outside the grid.
    pub fn from_live_cells(
        config: GridConfig,
        live: impl IntoIterator<Item = usize>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(config);
        for index in live {
            config.check_index(index)?;
            grid.write(index, true);
        }
        Ok(grid)
    }

    /// Build the generation that follows `previous` with the default
    /// [`Evaluation`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConfigurationMismatch`] if `previous` was built
    /// for a different configuration.
    pub fn from_previous(config: GridConfig, previous: &Self) -> Result<Self, GridError> {
        Self::from_previous_with(config, previous, Evaluation::default())
    }

    /// Build the generation that follows `previous` using `evaluation`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConfigurationMismatch`] if `previous` was built
    /// for a different configuration.
    pub fn from_previous_with(
        config: GridConfig,
        previous: &Self,
        evaluation: Evaluation,
    ) -> Result<Self, GridError> {
        previous.ensure_config(config)?;
        Ok(previous.next_generation(evaluation))
    }

    /// Build the generation that follows this one.
    pub fn next_generation(&self, evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::Full => self.evaluate_full(),
            Evaluation::Affected if self.affected_may_cover_grid() => self.evaluate_full(),
            Evaluation::Affected => self.evaluate_affected(),
        }
    }

    fn evaluate_full(&self) -> Self {
        let cells = (0..self.config.cell_count())
            .map(|index| self.classify(index))
            .collect();
        Self {
            config: self.config,
            cells,
        }
    }

    fn evaluate_affected(&self) -> Self {
        let mut next = Self::new(self.config);
        let mask = self.affected_mask();
        for (index, _) in mask.iter().enumerate().filter(|&(_, &hit)| hit) {
            if self.classify(index) {
                next.write(index, true);
            }
        }
        next
    }

    /// Each live cell marks at most itself and its neighbors.
    fn affected_may_cover_grid(&self) -> bool {
        self.population().saturating_mul(NEIGHBOR_COUNT.saturating_add(1))
            >= self.config.cell_count()
    }

    fn affected_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.config.cell_count()];
        for index in self.live_cells() {
            mark(&mut mask, index);
            for neighbor in self.config.neighbors_unchecked(index) {
                mark(&mut mask, neighbor);
            }
        }
        mask
    }

    // -----------------------------------------------------------------------
    // Seeding edits
    // -----------------------------------------------------------------------

    /// Flip the cell at `(row, col)` and return its new liveness.
    ///
    /// Only meaningful while seeding; grids held in a simulator's history are
    /// never handed out mutably.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRangeAddress`] if the position lies outside
    /// the grid.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        let index = self.config.index_of(row, col)?;
        let alive = !self.alive(index);
        self.write(index, alive);
        Ok(alive)
    }

    /// Set the cell at `(row, col)` to `alive`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRangeAddress`] if the position lies outside
    /// the grid.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let index = self.config.index_of(row, col)?;
        self.write(index, alive);
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Whether the cell at `(row, col)` is alive.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRangeAddress`] if the position lies outside
    /// the grid.
    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let index = self.config.index_of(row, col)?;
        Ok(self.alive(index))
    }

    /// Whether the cell at linear `index` is alive.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index` is outside the grid.
    pub fn is_alive_at(&self, index: usize) -> Result<bool, GridError> {
        self.config.check_index(index)?;
        Ok(self.alive(index))
    }

    /// Number of live cells among the eight toroidal neighbors of `index`,
    /// counted with multiplicity. Always in `0..=8`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index` is outside the grid.
    pub fn count_live_neighbors(&self, index: usize) -> Result<u8, GridError> {
        let neighbors = self.config.neighbors(index)?;
        let count = neighbors
            .into_iter()
            .filter(|&neighbor| self.alive(neighbor))
            .fold(0_u8, |acc, _| acc.saturating_add(1));
        Ok(count)
    }

    /// Whether the cell at `index` is alive in the next generation.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `index` is outside the grid.
    pub fn will_be_alive(&self, index: usize) -> Result<bool, GridError> {
        self.config.check_index(index)?;
        Ok(self.classify(index))
    }

    /// Every live cell together with its eight neighbors.
    pub fn affected_cells(&self) -> BTreeSet<usize> {
        self.affected_mask()
            .into_iter()
            .enumerate()
            .filter_map(|(index, hit)| hit.then_some(index))
            .collect()
    }

    /// Linear indices of the live cells, ascending.
    pub fn live_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, &alive)| alive.then_some(index))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Cell-by-cell equality over the full liveness array.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConfigurationMismatch`] if the grids were built
    /// for different configurations; comparing them is a caller bug, not a
    /// `false`.
    pub fn equal_to(&self, other: &Self) -> Result<bool, GridError> {
        self.ensure_config(other.config)?;
        Ok(self.cells == other.cells)
    }

    /// The configuration this grid was built for.
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

    // -----------------------------------------------------------------------
    // Internals (indices already validated)
    // -----------------------------------------------------------------------

    fn alive(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    fn write(&mut self, index: usize, alive: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = alive;
        }
    }

    /// Neighbor count that stops once it passes [`MAX_DECISIVE_NEIGHBORS`];
    /// any larger count classifies the same way.
    fn count_decisive_neighbors(&self, index: usize) -> u8 {
        let mut count = 0_u8;
        for neighbor in self.config.neighbors_unchecked(index) {
            if self.alive(neighbor) {
                count = count.saturating_add(1);
                if count > MAX_DECISIVE_NEIGHBORS {
                    break;
                }
            }
        }
        count
    }

    fn classify(&self, index: usize) -> bool {
        rule::next_state(self.alive(index), self.count_decisive_neighbors(index))
    }

    fn ensure_config(&self, expected: GridConfig) -> Result<(), GridError> {
        if self.config == expected {
            Ok(())
        } else {
            Err(GridError::ConfigurationMismatch {
                expected,
                found: self.config,
            })
        }
    }
}

fn mark(mask: &mut [bool], index: usize) {
    if let Some(slot) = mask.get_mut(index) {
        *slot = true;
    }
}

impl core::fmt::Display for Grid {
    /// Rows of `#` (alive) and `.` (dead), one line per row.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (row_index, row) in self.cells.chunks(self.config.width()).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
