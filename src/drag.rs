//! Pointer-drag gestures over text layers.

use crate::canvas::NodeBounds;
use crate::session::{LayerId, Position, Session};

#[derive(Debug, Copy, Clone)]
struct DragState {
    layer: LayerId,
    grab_dx: f64,
    grab_dy: f64,
    pos: Position,
}

/// Turns pointer-down/move/up sequences into a position commit for the
/// grabbed layer. The gesture is bound to the layer id captured at
/// pointer-down and resolved by id at commit time, so layers appended
/// mid-drag can never receive someone else's update.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The layer currently being dragged, if any.
    pub fn dragged_layer(&self) -> Option<LayerId> {
        self.active.map(|d| d.layer)
    }

    /// Starts a drag if the pointer lands on a layer's rendered bounds,
    /// topmost layer first. With no bounds (nothing rendered yet) there
    /// is nothing to hit and the event is ignored.
    pub fn pointer_down(&mut self, bounds: &[NodeBounds], x: f64, y: f64) {
        if let Some(b) = bounds.iter().rev().find(|b| b.contains(x, y)) {
            self.active = Some(DragState {
                layer: b.layer,
                grab_dx: x - b.x,
                grab_dy: y - b.y,
                pos: Position::new(b.x, b.y),
            });
        }
    }

    /// Tracks the pointer, keeping the grab offset. No-op outside a
    /// drag.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(drag) = &mut self.active {
            drag.pos = Position::new(x - drag.grab_dx, y - drag.grab_dy);
        }
    }

    /// Ends the drag and commits the new position to the session,
    /// addressed by the id grabbed at pointer-down. Returns the commit,
    /// or `None` if no drag was active.
    pub fn pointer_up(&mut self, session: &mut Session) -> Option<(LayerId, Position)> {
        let drag = self.active.take()?;
        session.update_layer_position(drag.layer, drag.pos);
        Some((drag.layer, drag.pos))
    }

    /// Drops any pending gesture without committing, e.g. when the
    /// session is replaced.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
