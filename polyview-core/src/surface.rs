/// Drawing surface abstraction shared by the terminal and web front-ends
use nalgebra::Point2;

use crate::render::{DrawFace, Rgb};

/// A 2D canvas that can paint filled polygons and markers.
///
/// Front-ends implement this on top of whatever they draw to; the core only
/// hands over the ordered draw list.
pub trait Surface {
    type Error;

    /// Canvas size in pixels as `(width, height)`
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, background: Rgb) -> Result<(), Self::Error>;

    fn fill_polygon(
        &mut self,
        points: &[Point2<f64>],
        fill: Rgb,
        outline: Rgb,
        outline_width: f64,
    ) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        color: Rgb,
    ) -> Result<(), Self::Error>;
}

/// How faces and vertex markers are painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background: Rgb,
    /// Outline width of each polygon, drawn in the face's fill color
    pub outline_width: f64,
    /// Radius of the marker drawn at every projected vertex, zero to disable
    pub marker_radius: f64,
    pub marker_color: Rgb,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Rgb::new(0xff, 0xff, 0xff),
            outline_width: 2.0,
            marker_radius: 5.0,
            marker_color: Rgb::new(0x00, 0x00, 0xff),
        }
    }
}

/// Clear `surface` and paint `draw_list` in order, so later faces cover
/// earlier ones.
pub fn paint<S: Surface>(
    surface: &mut S,
    draw_list: &[DrawFace],
    style: &Style,
) -> Result<(), S::Error> {
    surface.clear(style.background)?;
    for face in draw_list {
        if style.marker_radius > 0.0 {
            for &point in &face.points {
                surface.fill_circle(point, style.marker_radius, style.marker_color)?;
            }
        }
        surface.fill_polygon(&face.points, face.fill, face.fill, style.outline_width)?;
    }
    Ok(())
}
