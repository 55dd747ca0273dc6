//! Mouse drag-to-reposition state for the spring sketches.

use raylib::prelude::*;
use tracing::debug;

use crate::body::Ball;

/// Tracks which ball, if any, the mouse is currently dragging.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
    grabbed: Option<usize>,
}

impl DragState {
    /// Fresh state with nothing grabbed.
    pub const fn new() -> Self {
        Self { grabbed: None }
    }

    /// Grab the first unpinned ball under `point`, if any.
    pub fn grab(&mut self, point: Vector2, balls: &[Ball]) {
        self.grabbed = balls
            .iter()
            .position(|ball| !ball.pinned && ball.contains(point));
        if let Some(index) = self.grabbed {
            debug!(index, "grabbed ball");
        }
    }

    /// Drop whatever was grabbed.
    pub fn release(&mut self) {
        if self.grabbed.take().is_some() {
            debug!("released ball");
        }
    }

    /// Index of the grabbed ball, if any.
    pub const fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    /// Teleport the grabbed ball to the cursor.
    pub fn apply(&self, point: Vector2, balls: &mut [Ball]) {
        if let Some(index) = self.grabbed {
            balls[index].position = point;
        }
    }
}
