use common::engine::{GridCoord, RunState, ScoreLine, VisualKind};
use eframe::egui;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use std::sync::{Arc, Mutex};

use crate::constants::NOTIFICATION_BUFFER_SIZE;

/// What the board looks like, one visual per grid cell.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<VisualKind>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![VisualKind::Empty; width * height],
        }
    }

    pub fn set(&mut self, coord: GridCoord, visual: VisualKind) {
        if coord.x < self.width && coord.y < self.height {
            self.cells[coord.y * self.width + coord.x] = visual;
        }
    }

    pub fn get(&self, coord: GridCoord) -> VisualKind {
        self.cells[coord.y * self.width + coord.x]
    }

    /// Non-empty cells.
    pub fn occupied(&self) -> impl Iterator<Item = (GridCoord, VisualKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, visual)| **visual != VisualKind::Empty)
            .map(|(index, visual)| {
                let coord = GridCoord::new(index % self.width, index / self.width);
                (coord, *visual)
            })
    }
}

/// State shared between the session thread and the egui thread.
#[derive(Clone)]
pub struct SharedState {
    frame: Arc<Mutex<Frame>>,
    scores: Arc<Mutex<Vec<ScoreLine>>>,
    run_state: Arc<Mutex<RunState>>,
    notifications: Arc<Mutex<AllocRingBuffer<String>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            frame: Arc::new(Mutex::new(Frame::new(grid_width, grid_height))),
            scores: Arc::new(Mutex::new(Vec::new())),
            run_state: Arc::new(Mutex::new(RunState::Stopped)),
            notifications: Arc::new(Mutex::new(AllocRingBuffer::new(NOTIFICATION_BUFFER_SIZE))),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_cell(&self, coord: GridCoord, visual: VisualKind) {
        self.frame.lock().unwrap().set(coord, visual);
    }

    pub fn get_frame(&self) -> Frame {
        self.frame.lock().unwrap().clone()
    }

    pub fn set_scores(&self, scores: Vec<ScoreLine>) {
        *self.scores.lock().unwrap() = scores;
        self.request_repaint();
    }

    pub fn get_scores(&self) -> Vec<ScoreLine> {
        self.scores.lock().unwrap().clone()
    }

    pub fn set_run_state(&self, run_state: RunState) {
        *self.run_state.lock().unwrap() = run_state;
        self.request_repaint();
    }

    pub fn get_run_state(&self) -> RunState {
        *self.run_state.lock().unwrap()
    }

    pub fn add_notification(&self, message: String) {
        self.notifications.lock().unwrap().enqueue(message);
        self.request_repaint();
    }

    pub fn get_notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().iter().cloned().collect()
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    pub fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::engine::Direction;

    #[test]
    fn test_frame_tracks_occupied_cells() {
        let mut frame = Frame::new(4, 3);
        frame.set(GridCoord::new(1, 2), VisualKind::Food);
        frame.set(GridCoord::new(3, 0), VisualKind::SnakeHead(Direction::Left));
        frame.set(GridCoord::new(9, 9), VisualKind::Food);

        let occupied: Vec<_> = frame.occupied().collect();
        assert_eq!(
            occupied,
            vec![
                (GridCoord::new(3, 0), VisualKind::SnakeHead(Direction::Left)),
                (GridCoord::new(1, 2), VisualKind::Food),
            ]
        );

        frame.set(GridCoord::new(1, 2), VisualKind::Empty);
        assert_eq!(frame.occupied().count(), 1);
    }

    #[test]
    fn test_notification_log_keeps_latest() {
        let state = SharedState::new(4, 4);
        for i in 0..NOTIFICATION_BUFFER_SIZE + 5 {
            state.add_notification(format!("message {}", i));
        }
        let messages = state.get_notifications();
        assert_eq!(messages.len(), NOTIFICATION_BUFFER_SIZE);
        let expected = format!("message {}", NOTIFICATION_BUFFER_SIZE + 4);
        assert_eq!(messages.last(), Some(&expected));
    }
}
