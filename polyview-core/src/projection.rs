/// Orthographic projection from model space to canvas coordinates
use nalgebra::{Point2, Point3};

/// Where the model origin lands on the canvas and how many pixels one model
/// unit spans
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Point2<f64>,
    pub scaling_factor: f64,
}

impl Viewport {
    pub fn new(origin: Point2<f64>, scaling_factor: f64) -> Self {
        Self {
            origin,
            scaling_factor,
        }
    }

    /// Viewport centered on a `width` x `height` canvas.
    ///
    /// One model unit spans half the distance from the center to the top
    /// edge, so a mesh within the unit cube fills half the window.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let origin = Point2::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
        Self::new(origin, origin.y / 2.0)
    }

    /// Project a point to the canvas by dropping `z`.
    ///
    /// No clipping is done: points behind the viewer or off the canvas are
    /// returned as is.
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::new(
            self.origin.x + point.x * self.scaling_factor,
            self.origin.y + point.y * self.scaling_factor,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::for_canvas(800, 600)
    }
}
