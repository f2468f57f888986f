/// Pointer-drag state machine driving polyhedron rotations
use nalgebra::Point2;

use crate::geometry::Polyhedron;

/// Radians of rotation per pixel of drag
pub const DEFAULT_SENSITIVITY: f64 = 0.001;

/// Pointer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Button held, `anchor` is the last pointer position seen
    Dragging { anchor: Point2<f64> },
}

/// Incremental rotation produced by one drag step, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRotation {
    pub about_x: f64,
    pub about_y: f64,
}

impl DragRotation {
    /// Rotation for a drag delta `(dx, dy) = anchor - pointer`
    pub fn from_delta(dx: f64, dy: f64, sensitivity: f64) -> Self {
        Self {
            about_x: dy * sensitivity,
            about_y: -dx * sensitivity,
        }
    }

    /// Rotate about x, then about y
    pub fn apply(&self, mesh: &mut Polyhedron) {
        mesh.rotate_x(self.about_x);
        mesh.rotate_y(self.about_y);
    }
}

/// Rotate `mesh` in place for a drag delta `(dx, dy) = anchor - pointer`
pub fn apply_drag(mesh: &mut Polyhedron, dx: f64, dy: f64, sensitivity: f64) {
    DragRotation::from_delta(dx, dy, sensitivity).apply(mesh);
}

/// Turns pointer events into [`DragRotation`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionController {
    state: DragState,
    sensitivity: f64,
}

impl InteractionController {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            state: DragState::Idle,
            sensitivity,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Start a drag anchored at `(x, y)`
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.state = DragState::Dragging {
            anchor: Point2::new(x, y),
        };
    }

    /// Move the pointer to `(x, y)`. While dragging, returns the rotation to
    /// apply and re-anchors at the new position.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<DragRotation> {
        let DragState::Dragging { anchor } = self.state else {
            return None;
        };
        let (dx, dy) = (anchor.x - x, anchor.y - y);
        self.state = DragState::Dragging {
            anchor: Point2::new(x, y),
        };
        Some(DragRotation::from_delta(dx, dy, self.sensitivity))
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY)
    }
}
