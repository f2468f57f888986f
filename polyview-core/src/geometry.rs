/// Polyhedron model: vertex buffer, planar faces and in-place rotations
use nalgebra::Point3;

use crate::error::{ParseError, ParseErrorKind};
use crate::transform::{Axis, Transform};

/// A planar face given as an ordered list of vertex indices.
///
/// The order is kept exactly as read, since it fixes the sign of the normal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<Vec<usize>> for Face {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

/// A polyhedron made of vertices and planar faces.
///
/// Rotations overwrite the vertex positions, so the current orientation lives
/// in the vertex buffer itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Face>,
}

impl Polyhedron {
    /// Build a polyhedron, checking that every face has at least three
    /// vertices and only references existing ones.
    ///
    /// Errors carry line 0 since no source text is involved.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Result<Self, ParseError> {
        for face in &faces {
            check_face(face, vertices.len()).map_err(|kind| ParseError::new(0, kind))?;
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, index: usize) -> &Point3<f64> {
        &self.vertices[index]
    }

    /// Componentwise mean of the face's vertex positions
    pub fn centroid(&self, face: &Face) -> Point3<f64> {
        let sum = face
            .indices()
            .iter()
            .fold(Point3::origin().coords, |acc, &i| acc + self.vertices[i].coords);
        Point3::from(sum / face.len() as f64)
    }

    pub fn rotate_x(&mut self, angle: f64) {
        self.rotate(Axis::X, angle);
    }

    pub fn rotate_y(&mut self, angle: f64) {
        self.rotate(Axis::Y, angle);
    }

    pub fn rotate_z(&mut self, angle: f64) {
        self.rotate(Axis::Z, angle);
    }

    /// Rotate every vertex in place by `angle` radians about `axis`
    pub fn rotate(&mut self, axis: Axis, angle: f64) {
        let matrix = Transform::rotation_matrix(axis, angle);
        Transform::rotate_points(&mut self.vertices, &matrix);
    }

    /// Axis-aligned cube centered on the origin, faces wound counter-clockwise
    /// when seen from outside
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        let faces = [
            [4, 5, 6, 7], // +z
            [1, 0, 3, 2], // -z
            [3, 7, 6, 2], // +y
            [0, 1, 5, 4], // -y
            [1, 2, 6, 5], // +x
            [0, 4, 7, 3], // -x
        ]
        .into_iter()
        .map(|f| Face::new(f.to_vec()))
        .collect();

        Self { vertices, faces }
    }
}

/// Validate a face against the vertex count
pub(crate) fn check_face(face: &Face, vertex_count: usize) -> Result<(), ParseErrorKind> {
    if face.len() < 3 {
        return Err(ParseErrorKind::FaceTooSmall { len: face.len() });
    }
    match face.indices().iter().find(|&&i| i >= vertex_count) {
        Some(&i) => Err(ParseErrorKind::VertexOutOfRange {
            id: i as i64 + 1,
            vertex_count,
        }),
        None => Ok(()),
    }
}
