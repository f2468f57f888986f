/// Face shading, painter's-algorithm ordering and projection into a draw list
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use nalgebra::{Point2, Vector3};
use crate::geometry::{Face, Polyhedron};
use crate::projection::Viewport;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color ramp from edge-on faces (`min`) to faces seen head-on (`max`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub min: Rgb,
    pub max: Rgb,
}

impl Shading {
    /// Dark navy
    pub const DEFAULT_MIN: Rgb = Rgb::new(0x00, 0x00, 0x5f);
    /// Pure blue
    pub const DEFAULT_MAX: Rgb = Rgb::new(0x00, 0x00, 0xff);

    pub fn new(min: Rgb, max: Rgb) -> Self {
        Self { min, max }
    }

    /// Interpolate each channel between `min` and `max`. `fraction` is clamped
    /// to [0, 1] and channel values are truncated.
    pub fn color_at(&self, fraction: f64) -> Rgb {
        let t = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let lerp = |lo: u8, hi: u8| {
            let (lo, hi) = (f64::from(lo), f64::from(hi));
            (lo + (hi - lo) * t) as u8
        };
        Rgb::new(
            lerp(self.min.r, self.max.r),
            lerp(self.min.g, self.max.g),
            lerp(self.min.b, self.max.b),
        )
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

/// A face ready to hand to a drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct DrawFace {
    /// Index of the face in the polyhedron
    pub face: usize,
    /// Centroid z, larger is further away
    pub depth: f64,
    /// Projected vertices in face order
    pub points: Vec<Point2<f64>>,
    pub fill: Rgb,
    /// Unit normal, `None` for degenerate faces
    pub normal: Option<Vector3<f64>>,
}

/// Unit normal of a face from its first three vertices, as
/// `(v1 - v0) x (v2 - v1)`.
///
/// Returns `None` when the face has no defined orientation (collinear or
/// coincident vertices, non-finite coordinates).
pub fn face_normal(mesh: &Polyhedron, face: &Face) -> Option<Vector3<f64>> {
    let idx = face.indices();
    if idx.len() < 3 {
        return None;
    }
    let (v0, v1, v2) = (mesh.vertex(idx[0]), mesh.vertex(idx[1]), mesh.vertex(idx[2]));
    (v1 - v0)
        .cross(&(v2 - v1))
        .try_normalize(0.0)
        .filter(|n| n.iter().all(|c| c.is_finite()))
}

/// Indices of the faces with no defined normal.
///
/// Rotation preserves degeneracy up to rounding, so checking once per mesh
/// is enough.
pub fn degenerate_faces(mesh: &Polyhedron) -> Vec<usize> {
    mesh.faces()
        .iter()
        .enumerate()
        .filter(|(_, face)| face_normal(mesh, face).is_none())
        .map(|(index, _)| index)
        .collect()
}

/// Fraction of the shading ramp for a unit normal: 0 when the face is seen
/// edge-on, 1 when it faces the view axis (either side).
pub fn shade_fraction(normal: &Vector3<f64>) -> f64 {
    // The viewer looks along the z axis
    let mut theta = normal.dot(&Vector3::z()).clamp(-1.0, 1.0).acos();
    if theta > FRAC_PI_2 {
        theta = PI - theta;
    }
    ((FRAC_PI_2 - theta) / FRAC_PI_2).clamp(0.0, 1.0)
}

/// Shade, project and order every face of `mesh` back to front.
///
/// Faces are sorted by centroid z, descending; equal depths keep their order
/// in the polyhedron. Degenerate faces get `shading.min`.
pub fn compute_draw_list(
    mesh: &Polyhedron,
    viewport: &Viewport,
    shading: &Shading,
) -> Vec<DrawFace> {
    let mut draw_list: Vec<DrawFace> = mesh
        .faces()
        .iter()
        .enumerate()
        .map(|(index, face)| {
            let normal = face_normal(mesh, face);
            let fill = match &normal {
                Some(n) => shading.color_at(shade_fraction(n)),
                None => shading.min,
            };
            DrawFace {
                face: index,
                depth: mesh.centroid(face).z,
                points: face
                    .indices()
                    .iter()
                    .map(|&i| viewport.project(mesh.vertex(i)))
                    .collect(),
                fill,
                normal,
            }
        })
        .collect();

    // Stable, so ties keep face order
    draw_list.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    draw_list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_polyhedron;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn triangle_at(z: f64) -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(0.0, 1.0, z),
        ]
    }

    fn stacked(depths: &[f64]) -> Polyhedron {
        let vertices: Vec<_> = depths.iter().flat_map(|&z| triangle_at(z)).collect();
        let faces = (0..depths.len())
            .map(|i| Face::new(vec![3 * i, 3 * i + 1, 3 * i + 2]))
            .collect();
        Polyhedron::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_tetrahedron_face_gets_max_shade() {
        let mesh = parse_polyhedron("4,1\n1,0,0,0\n2,1,0,0\n3,0,1,0\n4,0,0,1\n1,2,3").unwrap();
        let normal = face_normal(&mesh, &mesh.faces()[0]).unwrap();
        assert_relative_eq!(normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);

        let viewport = Viewport::for_canvas(800, 600);
        let draw_list = compute_draw_list(&mesh, &viewport, &Shading::default());
        assert_eq!(draw_list.len(), 1);
        assert_eq!(draw_list[0].fill, Shading::DEFAULT_MAX);
        assert_relative_eq!(draw_list[0].depth, 0.0);
        assert_eq!(
            draw_list[0].points,
            vec![
                Point2::new(400.0, 300.0),
                Point2::new(550.0, 300.0),
                Point2::new(400.0, 450.0),
            ]
        );
    }

    #[test]
    fn test_boundary_shades() {
        let shading = Shading::default();
        // Perpendicular to the view axis
        for normal in [Vector3::x(), Vector3::y(), -Vector3::x()] {
            assert_relative_eq!(shade_fraction(&normal), 0.0, epsilon = 1e-12);
            assert_eq!(shading.color_at(shade_fraction(&normal)), Shading::DEFAULT_MIN);
        }
        // Facing the viewer or facing away
        for normal in [Vector3::z(), -Vector3::z()] {
            assert_relative_eq!(shade_fraction(&normal), 1.0, epsilon = 1e-12);
            assert_eq!(shading.color_at(shade_fraction(&normal)), Shading::DEFAULT_MAX);
        }
    }

    #[test]
    fn test_normals_are_unit_and_shades_bounded() {
        let shading = Shading::new(Rgb::new(200, 10, 0x5f), Rgb::new(20, 90, 0xff));
        let mut mesh = Polyhedron::cube(2.0);
        for step in 0..50 {
            mesh.rotate_x(0.37);
            mesh.rotate_y(-0.21 * f64::from(step));
            for face in mesh.faces() {
                let normal = face_normal(&mesh, face).unwrap();
                assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-9);

                let fraction = shade_fraction(&normal);
                assert!((0.0..=1.0).contains(&fraction));

                let color = shading.color_at(fraction);
                assert!((20..=200).contains(&color.r));
                assert!((10..=90).contains(&color.g));
                assert!((0x5f..=0xff).contains(&color.b));
            }
        }
    }

    #[test]
    fn test_color_at_clamps_fraction() {
        let shading = Shading::default();
        assert_eq!(shading.color_at(-3.0), Shading::DEFAULT_MIN);
        assert_eq!(shading.color_at(7.0), Shading::DEFAULT_MAX);
        assert_eq!(shading.color_at(f64::NAN), Shading::DEFAULT_MIN);
        // 95 + 160 * 0.5
        assert_eq!(shading.color_at(0.5), Rgb::new(0, 0, 175));
    }

    #[test]
    fn test_draw_list_sorted_back_to_front() {
        let mesh = stacked(&[0.0, 2.0, -1.0, 5.5]);
        let draw_list = compute_draw_list(&mesh, &Viewport::default(), &Shading::default());
        let order: Vec<usize> = draw_list.iter().map(|f| f.face).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
        assert!(draw_list.windows(2).all(|w| w[0].depth >= w[1].depth));
    }

    #[test]
    fn test_equal_depths_keep_face_order() {
        let mesh = stacked(&[1.0, 3.0, 1.0, 1.0, 3.0]);
        let order: Vec<usize> = compute_draw_list(&mesh, &Viewport::default(), &Shading::default())
            .iter()
            .map(|f| f.face)
            .collect();
        assert_eq!(order, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_degenerate_face_gets_min_shade() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::new(vec![0, 1, 2]), Face::new(vec![0, 1, 3])];
        let mesh = Polyhedron::new(vertices, faces).unwrap();

        let draw_list = compute_draw_list(&mesh, &Viewport::default(), &Shading::default());
        assert_eq!(draw_list.len(), 2);
        let degenerate = draw_list.iter().find(|f| f.face == 0).unwrap();
        assert_eq!(degenerate.normal, None);
        assert_eq!(degenerate.fill, Shading::DEFAULT_MIN);
        let regular = draw_list.iter().find(|f| f.face == 1).unwrap();
        assert_eq!(regular.fill, Shading::DEFAULT_MAX);

        assert_eq!(degenerate_faces(&mesh), vec![0]);
        assert!(degenerate_faces(&Polyhedron::cube(2.0)).is_empty());
    }

    #[test]
    fn test_tiny_face_is_not_degenerate() {
        let mesh = parse_polyhedron("3,1\n1,0,0,0\n2,1e-8,0,0\n3,0,1e-8,0\n1,2,3").unwrap();
        let normal = face_normal(&mesh, &mesh.faces()[0]).unwrap();
        assert_relative_eq!(normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);

        let draw_list = compute_draw_list(&mesh, &Viewport::default(), &Shading::default());
        assert_eq!(draw_list[0].fill, Shading::DEFAULT_MAX);
        assert!(degenerate_faces(&mesh).is_empty());
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Shading::DEFAULT_MIN.to_string(), "#00005f");
        assert_eq!(Rgb::new(255, 16, 1).to_string(), "#ff1001");
    }
}
