/// Half-block cell rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use polyview_core::{Rgb, Surface};
use std::convert::Infallible;
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Pixel canvas backed by terminal cells, two pixels per cell stacked
/// vertically so pixels come out roughly square.
///
/// There is no depth buffer: whatever is painted last wins.
pub struct CellCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl CellCanvas {
    pub fn new(columns: u16, rows: u16) -> Self {
        let width = usize::from(columns);
        let height = usize::from(rows) * 2;
        Self {
            width,
            height,
            pixels: vec![Rgb::new(0, 0, 0); width * height],
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        *self = Self::new(columns, rows);
    }

    /// Color of the pixel at `(x, y)`, if on the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Pixel index ranges covering `[min, max]`, clipped to the canvas
    fn clip(&self, min: Point2<f64>, max: Point2<f64>) -> Option<(usize, usize, usize, usize)> {
        let clamp = |v: f64, limit: usize| (v.max(0.0) as usize).min(limit);
        if self.width == 0 || self.height == 0 || !(min.x <= max.x && min.y <= max.y) {
            return None;
        }
        if max.x < 0.0 || max.y < 0.0 {
            return None;
        }
        let (x0, x1) = (clamp(min.x.floor(), self.width), clamp(max.x.ceil(), self.width - 1));
        let (y0, y1) = (clamp(min.y.floor(), self.height), clamp(max.y.ceil(), self.height - 1));
        (x0 <= x1 && y0 <= y1).then_some((x0, x1, y0, y1))
    }

    /// Set every pixel in `[min, max]` whose center satisfies `inside`
    fn fill_where(
        &mut self,
        min: Point2<f64>,
        max: Point2<f64>,
        color: Rgb,
        inside: impl Fn(Point2<f64>) -> bool,
    ) {
        let Some((x0, x1, y0, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                if inside(center) {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }

    /// Write the canvas to the terminal starting at the top-left cell
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height / 2 {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for x in 0..self.width {
                let top = self.pixels[2 * row * self.width + x];
                let bottom = self.pixels[(2 * row + 1) * self.width + x];
                writer.queue(SetForegroundColor(to_color(top)))?;
                writer.queue(SetBackgroundColor(to_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for CellCanvas {
    type Error = Infallible;

    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self, background: Rgb) -> Result<(), Infallible> {
        self.pixels.fill(background);
        Ok(())
    }

    fn fill_polygon(
        &mut self,
        points: &[Point2<f64>],
        fill: Rgb,
        outline: Rgb,
        outline_width: f64,
    ) -> Result<(), Infallible> {
        let Some((min, max)) = bounds(points) else {
            return Ok(());
        };
        self.fill_where(min, max, fill, |p| contains(points, p));

        if outline_width > 0.0 {
            let half = outline_width / 2.0;
            let pad = nalgebra::Vector2::new(half, half);
            self.fill_where(min - pad, max + pad, outline, |p| {
                edges(points).any(|(a, b)| distance_to_segment(p, a, b) <= half)
            });
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        color: Rgb,
    ) -> Result<(), Infallible> {
        let pad = nalgebra::Vector2::new(radius, radius);
        self.fill_where(center - pad, center + pad, color, |p| {
            nalgebra::distance(&p, &center) <= radius
        });
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Axis-aligned bounding box of a point list
fn bounds(points: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| {
        (
            Point2::new(min.x.min(p.x), min.y.min(p.y)),
            Point2::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

/// Closed polygon edges, last vertex back to the first
fn edges(points: &[Point2<f64>]) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
}

/// Even-odd point-in-polygon test, works for concave outlines too
fn contains(points: &[Point2<f64>], p: Point2<f64>) -> bool {
    edges(points)
        .filter(|(a, b)| (a.y > p.y) != (b.y > p.y))
        .filter(|(a, b)| p.x < a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y))
        .count()
        % 2
        == 1
}

fn distance_to_segment(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    nalgebra::distance(&p, &(a + ab * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn test_canvas_size_uses_half_blocks() {
        let canvas = CellCanvas::new(80, 24);
        assert_eq!(canvas.size(), (80, 48));
        assert_eq!(canvas.pixel(79, 47), Some(Rgb::new(0, 0, 0)));
        assert_eq!(canvas.pixel(80, 0), None);
    }

    #[test]
    fn test_fill_polygon() {
        let mut canvas = CellCanvas::new(10, 5);
        canvas.clear(WHITE).unwrap();
        canvas.fill_polygon(&square(2.0, 2.0, 6.0, 6.0), RED, RED, 0.0).unwrap();
        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(WHITE));
        assert_eq!(canvas.pixel(6, 6), Some(WHITE));
    }

    #[test]
    fn test_fill_concave_polygon() {
        // U shape open at the top
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 6.0),
            Point2::new(0.0, 6.0),
        ];
        let mut canvas = CellCanvas::new(8, 4);
        canvas.clear(WHITE).unwrap();
        canvas.fill_polygon(&u, RED, RED, 0.0).unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(3, 1), Some(WHITE));
        assert_eq!(canvas.pixel(3, 5), Some(RED));
    }

    #[test]
    fn test_later_polygons_cover_earlier_ones() {
        let blue = Rgb::new(0, 0, 255);
        let mut canvas = CellCanvas::new(10, 5);
        canvas.fill_polygon(&square(0.0, 0.0, 8.0, 8.0), RED, RED, 0.0).unwrap();
        canvas.fill_polygon(&square(4.0, 4.0, 10.0, 10.0), blue, blue, 0.0).unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(blue));
    }

    #[test]
    fn test_outline_and_circle() {
        let blue = Rgb::new(0, 0, 255);
        let mut canvas = CellCanvas::new(20, 10);
        canvas.clear(WHITE).unwrap();
        canvas.fill_polygon(&square(5.0, 5.0, 15.0, 15.0), RED, blue, 2.0).unwrap();
        assert_eq!(canvas.pixel(5, 10), Some(blue));
        assert_eq!(canvas.pixel(4, 10), Some(blue));
        assert_eq!(canvas.pixel(10, 10), Some(RED));

        canvas.fill_circle(Point2::new(10.0, 10.0), 1.0, WHITE).unwrap();
        assert_eq!(canvas.pixel(10, 10), Some(WHITE));
        assert_eq!(canvas.pixel(12, 10), Some(RED));
    }

    #[test]
    fn test_offscreen_geometry_is_clipped() {
        let mut canvas = CellCanvas::new(4, 2);
        canvas.clear(WHITE).unwrap();
        canvas.fill_polygon(&square(-50.0, -50.0, -10.0, -10.0), RED, RED, 1.0).unwrap();
        canvas.fill_polygon(&square(100.0, 100.0, 200.0, 200.0), RED, RED, 1.0).unwrap();
        canvas.fill_circle(Point2::new(f64::NAN, 1.0), 2.0, RED).unwrap();
        assert!((0..4).all(|x| (0..4).all(|y| canvas.pixel(x, y) == Some(WHITE))));

        canvas.fill_polygon(&square(-100.0, -100.0, 100.0, 100.0), RED, RED, 0.0).unwrap();
        assert!((0..4).all(|x| (0..4).all(|y| canvas.pixel(x, y) == Some(RED))));
    }

    #[test]
    fn test_draw_emits_one_glyph_per_cell() {
        let canvas = CellCanvas::new(3, 2);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }
}
