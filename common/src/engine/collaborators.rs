use std::fmt;

use super::session::RunState;
use super::{CanvasCoord, VisualKind};
use crate::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreLine {
    pub player: PlayerId,
    pub score: u32,
    pub lives: u32,
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.player, self.score)
    }
}

/// Receives what occupies where. The engine never touches pixels itself.
pub trait Renderer {
    fn draw(&mut self, at: CanvasCoord, size: f64, visual: VisualKind);

    /// Redraws the score band.
    fn draw_scores(&mut self, _scores: &[ScoreLine]) {}

    fn draw_run_state(&mut self, _state: RunState) {}
}

pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Renderer for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _at: CanvasCoord, _size: f64, _visual: VisualKind) {}
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}
