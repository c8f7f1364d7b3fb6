use common::engine::{CanvasCoord, Renderer, RunState, Scales, ScoreLine, VisualKind};

use crate::state::SharedState;

/// Writes engine draw calls into the shared frame the UI paints from.
pub struct FrameRenderer {
    shared_state: SharedState,
    scales: Scales,
    ui_height: u32,
}

impl FrameRenderer {
    pub fn new(shared_state: SharedState, scales: Scales, ui_height: u32) -> Self {
        Self {
            shared_state,
            scales,
            ui_height,
        }
    }
}

impl Renderer for FrameRenderer {
    fn draw(&mut self, at: CanvasCoord, _size: f64, visual: VisualKind) {
        if let Some(cell) = at.to_grid(&self.scales, self.ui_height) {
            self.shared_state.set_cell(cell, visual);
            self.shared_state.request_repaint();
        }
    }

    fn draw_scores(&mut self, scores: &[ScoreLine]) {
        self.shared_state.set_scores(scores.to_vec());
    }

    fn draw_run_state(&mut self, state: RunState) {
        self.shared_state.set_run_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::PlayerId;
    use common::engine::{Direction, GridCoord};

    #[test]
    fn test_draw_lands_on_cell() {
        let state = SharedState::new(8, 8);
        let scales = Scales::default();
        let mut renderer = FrameRenderer::new(state.clone(), scales, 50);

        let at = GridCoord::new(2, 3).to_canvas(&scales, 50);
        renderer.draw(at, scales.cell_size(), VisualKind::SnakeHead(Direction::Right));

        let frame = state.get_frame();
        assert_eq!(frame.get(GridCoord::new(2, 3)), VisualKind::SnakeHead(Direction::Right));
        assert_eq!(frame.occupied().count(), 1);
    }

    #[test]
    fn test_draw_inside_ui_band_is_ignored() {
        let state = SharedState::new(8, 8);
        let scales = Scales::default();
        let mut renderer = FrameRenderer::new(state.clone(), scales, 50);

        renderer.draw(CanvasCoord::new(5.0, 10.0, &scales), scales.cell_size(), VisualKind::Food);
        assert_eq!(state.get_frame().occupied().count(), 0);
    }

    #[test]
    fn test_scores_and_run_state_are_shared() {
        let state = SharedState::new(8, 8);
        let mut renderer = FrameRenderer::new(state.clone(), Scales::default(), 50);

        let line = ScoreLine {
            player: PlayerId::new("alice"),
            score: 4,
            lives: 2,
        };
        renderer.draw_scores(std::slice::from_ref(&line));
        renderer.draw_run_state(RunState::Running);

        assert_eq!(state.get_scores(), vec![line]);
        assert_eq!(state.get_run_state(), RunState::Running);
    }
}
