//! Terminal rendering of each generation.

use std::io::Write as _;

use toroid_core::runner::StepCallback;
use toroid_core::simulator::Simulator;
use toroid_types::StepResult;
use tracing::warn;

/// Prints a status line per step and, when enabled, the current grid.
#[derive(Debug)]
pub struct TerminalRenderer {
    draw_grid: bool,
}

impl TerminalRenderer {
    /// Create a renderer; `draw_grid` controls whether frames are printed.
    pub const fn new(draw_grid: bool) -> Self {
        Self { draw_grid }
    }
}

impl StepCallback for TerminalRenderer {
    fn on_step(&mut self, result: &StepResult, simulator: &Simulator) {
        let frame = format_frame(result, simulator, self.draw_grid);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(frame.as_bytes()).and_then(|()| stdout.flush()) {
            warn!(error = %e, "failed to write frame to stdout");
        }
    }
}

/// Status line (`step N  population P  T ms  [message]`), optionally
/// followed by the grid, terminated by a blank line.
pub fn format_frame(result: &StepResult, simulator: &Simulator, draw_grid: bool) -> String {
    let grid = simulator.current_grid();
    let mut frame = format!(
        "step {}  population {}  {:.3} ms",
        result.step,
        grid.population(),
        result.elapsed_ms()
    );
    if !result.message.is_empty() {
        frame.push_str("  ");
        frame.push_str(&result.message);
    }
    frame.push('\n');
    if draw_grid {
        frame.push_str(&grid.to_string());
        frame.push('\n');
    }
    frame.push('\n');
    frame
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toroid_grid::GridConfig;

    use super::*;

    fn blinker() -> Simulator {
        let mut sim = Simulator::new(GridConfig::new(5, 3).unwrap());
        for col in 1..=3 {
            sim.toggle_cell(1, col).unwrap();
        }
        sim
    }

    #[test]
    fn frame_with_grid() {
        let mut sim = blinker();
        let result = sim.advance().unwrap();
        let frame = format_frame(&result, &sim, true);
        assert_eq!(frame, "step 1  population 3  0.000 ms\n.....\n.###.\n.....\n\n");
    }

    #[test]
    fn frame_without_grid_shows_message() {
        let mut sim = Simulator::new(GridConfig::new(3, 3).unwrap());
        sim.advance().unwrap();
        let result = sim.advance().unwrap();
        let frame = format_frame(&result, &sim, false);
        assert!(frame.starts_with("step 2  population 0  "));
        assert!(frame.contains("  extinct\n"));
        assert!(frame.ends_with("\n\n"));
    }
}
