//! Seed patterns and random fill for the initial generation.
//!
//! Patterns are stored as `(row, col)` offsets from their upper-left
//! corner. Placement wraps around the torus, so a pattern may straddle an
//! edge; the origin itself must lie inside the grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use toroid_grid::{Grid, GridError};

use crate::simulator::SimulatorError;

/// A named arrangement of live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Display name, matched case-insensitively by [`Pattern::by_name`].
    pub name: &'static str,
    /// Live cell offsets from the pattern origin.
    pub cells: &'static [(usize, usize)],
}

/// Built-in patterns.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Look up a built-in pattern by name, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static Self> {
        PATTERNS
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }
}

/// Set every cell of `pattern` alive, offset from `(origin_row, origin_col)`.
///
/// Cells already alive stay alive; nothing is cleared.
///
/// # Errors
///
/// Returns [`GridError::OutOfRangeAddress`] if the origin lies outside the
/// grid.
pub fn place_pattern(
    grid: &mut Grid,
    pattern: &Pattern,
    origin_row: usize,
    origin_col: usize,
) -> Result<(), GridError> {
    grid.config().index_of(origin_row, origin_col)?;
    let (height, width) = (grid.height(), grid.width());
    for &(row_offset, col_offset) in pattern.cells {
        let row = wrap_offset(origin_row, row_offset, height);
        let col = wrap_offset(origin_col, col_offset, width);
        match (row, col) {
            (Some(row), Some(col)) => grid.set_alive(row, col, true)?,
            _ => {
                return Err(GridError::OutOfRangeAddress {
                    row: origin_row,
                    col: origin_col,
                    width,
                    height,
                });
            }
        }
    }
    Ok(())
}

/// Replace the contents of `grid` with a reproducible random fill.
///
/// Each cell is alive with probability `density`. The same `seed` always
/// yields the same grid.
///
/// # Errors
///
/// Returns [`SimulatorError::InvalidDensity`] unless `0.0 <= density <= 1.0`.
pub fn random_fill(grid: &mut Grid, density: f64, seed: u64) -> Result<(), SimulatorError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(SimulatorError::InvalidDensity { density });
    }
    grid.clear();
    let mut rng = StdRng::seed_from_u64(seed);
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if rng.random_bool(density) {
                grid.set_alive(row, col, true)?;
            }
        }
    }
    Ok(())
}

fn wrap_offset(origin: usize, offset: usize, extent: usize) -> Option<usize> {
    origin.checked_add(offset)?.checked_rem(extent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toroid_grid::GridConfig;

    use super::*;

    fn empty(width: usize, height: usize) -> Grid {
        Grid::new(GridConfig::new(width, height).unwrap())
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Pattern::by_name("Glider").unwrap().cells.len(), 5);
        assert_eq!(Pattern::by_name("R-PENTOMINO").unwrap().name, "r-pentomino");
        assert!(Pattern::by_name("gosper gun").is_none());
    }

    #[test]
    fn pattern_names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in PATTERNS.iter().skip(i.saturating_add(1)) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn places_at_origin() {
        let mut grid = empty(8, 8);
        place_pattern(&mut grid, Pattern::by_name("blinker").unwrap(), 3, 2).unwrap();
        let live: Vec<usize> = grid.live_cells().collect();
        assert_eq!(live, vec![26, 27, 28]);
    }

    #[test]
    fn placement_wraps_across_edges() {
        let mut grid = empty(4, 4);
        place_pattern(&mut grid, Pattern::by_name("block").unwrap(), 3, 3).unwrap();
        for (row, col) in [(3, 3), (3, 0), (0, 3), (0, 0)] {
            assert!(grid.is_alive(row, col).unwrap());
        }
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn origin_outside_grid_is_rejected() {
        let mut grid = empty(4, 4);
        let result = place_pattern(&mut grid, Pattern::by_name("block").unwrap(), 4, 0);
        assert!(matches!(result, Err(GridError::OutOfRangeAddress { .. })));
        assert!(grid.is_empty());
    }

    #[test]
    fn random_fill_is_reproducible() {
        let mut a = empty(20, 20);
        let mut b = empty(20, 20);
        random_fill(&mut a, 0.4, 7).unwrap();
        random_fill(&mut b, 0.4, 7).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn random_fill_extremes() {
        let mut grid = empty(6, 5);
        random_fill(&mut grid, 1.0, 1).unwrap();
        assert_eq!(grid.population(), 30);
        random_fill(&mut grid, 0.0, 1).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn random_fill_rejects_bad_density() {
        let mut grid = empty(3, 3);
        assert!(matches!(
            random_fill(&mut grid, 1.5, 0),
            Err(SimulatorError::InvalidDensity { .. })
        ));
        assert!(random_fill(&mut grid, f64::NAN, 0).is_err());
        assert!(random_fill(&mut grid, -0.1, 0).is_err());
    }
}
