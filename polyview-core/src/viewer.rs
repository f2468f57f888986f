/// Interactive viewing session: owns the polyhedron and reacts to pointer events
use tracing::{debug, warn};

use crate::config::ViewerConfig;
use crate::error::ParseError;
use crate::format::parse_polyhedron;
use crate::geometry::Polyhedron;
use crate::interaction::InteractionController;
use crate::projection::Viewport;
use crate::render::{compute_draw_list, degenerate_faces, DrawFace};
use crate::surface::{paint, Surface};
use crate::transform::Axis;

/// A polyhedron being viewed on a canvas of known size.
///
/// Every event that changes the orientation returns the recomputed draw list,
/// so front-ends only have to paint it.
pub struct Viewer {
    mesh: Polyhedron,
    controller: InteractionController,
    viewport: Viewport,
    config: ViewerConfig,
}

impl Viewer {
    /// Faces without a normal are reported here once; they are drawn with
    /// the minimum shade on every frame.
    pub fn new(mesh: Polyhedron, width: u32, height: u32, config: ViewerConfig) -> Self {
        for face in degenerate_faces(&mesh) {
            warn!(face, "degenerate face, drawing it with the minimum shade");
        }
        Self {
            mesh,
            controller: InteractionController::new(config.sensitivity),
            viewport: Viewport::for_canvas(width, height),
            config,
        }
    }

    /// Parse `text` and return the session with its initial draw list
    pub fn on_load(
        text: &str,
        width: u32,
        height: u32,
        config: ViewerConfig,
    ) -> Result<(Self, Vec<DrawFace>), ParseError> {
        let viewer = Self::new(parse_polyhedron(text)?, width, height, config);
        let draw_list = viewer.draw_list();
        Ok((viewer, draw_list))
    }

    pub fn mesh(&self) -> &Polyhedron {
        &self.mesh
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn draw_list(&self) -> Vec<DrawFace> {
        compute_draw_list(&self.mesh, &self.viewport, &self.config.shading)
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.controller.pointer_down(x, y);
    }

    /// Rotate for the drag step to `(x, y)`. Returns `None` when no drag is
    /// in progress.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<Vec<DrawFace>> {
        let rotation = self.controller.pointer_move(x, y)?;
        rotation.apply(&mut self.mesh);
        Some(self.draw_list())
    }

    pub fn on_pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Rotate about a single axis, e.g. from keyboard input
    pub fn rotate(&mut self, axis: Axis, angle: f64) -> Vec<DrawFace> {
        self.mesh.rotate(axis, angle);
        self.draw_list()
    }

    /// Recenter on a canvas of the new size
    pub fn resize(&mut self, width: u32, height: u32) -> Vec<DrawFace> {
        debug!(width, height, "canvas resized");
        self.viewport = Viewport::for_canvas(width, height);
        self.draw_list()
    }

    /// Paint the current draw list onto `surface`
    pub fn paint<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        paint(surface, &self.draw_list(), &self.config.style)
    }
}
