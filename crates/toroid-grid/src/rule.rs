//! The classic survival/birth rule (B3/S23).

/// Highest neighbor count that can still change a classification. Counting
/// may stop once it passes this value.
pub const MAX_DECISIVE_NEIGHBORS: u8 = 3;

/// Decide whether a cell is alive in the next generation.
///
/// A live cell survives with 2 or 3 live neighbors; a dead cell is born
/// with exactly 3.
pub const fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2 | 3) | (false, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_cell_survives_with_two_or_three() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
    }

    #[test]
    fn live_cell_dies_otherwise() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!next_state(true, n), "live cell with {n} neighbors survived");
        }
    }

    #[test]
    fn dead_cell_born_only_with_three() {
        for n in 0..=8 {
            assert_eq!(next_state(false, n), n == 3);
        }
    }

    #[test]
    fn counts_above_cap_classify_like_the_cap_plus_one() {
        // The capped counter reports MAX_DECISIVE_NEIGHBORS + 1 for any
        // larger count, so every larger count must classify identically.
        let capped = MAX_DECISIVE_NEIGHBORS.saturating_add(1);
        for n in capped..=8 {
            assert_eq!(next_state(true, n), next_state(true, capped));
            assert_eq!(next_state(false, n), next_state(false, capped));
        }
    }
}
