/// polyview core library - polyhedron model, shading and projection
///
/// This library provides the surface-independent part of the viewer: loading
/// the polyhedron text format, rotating the mesh, and turning it into an
/// ordered list of shaded 2D polygons for a drawing surface.

pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod interaction;
pub mod projection;
pub mod render;
pub mod surface;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{LoadError, ParseError, ParseErrorKind};
pub use format::{load_polyhedron, parse_polyhedron};
pub use geometry::{Face, Polyhedron};
pub use interaction::{apply_drag, DragRotation, DragState, InteractionController};
pub use projection::Viewport;
pub use render::{compute_draw_list, degenerate_faces, DrawFace, Rgb, Shading};
pub use surface::{paint, Style, Surface};
pub use transform::{Axis, Transform};
pub use viewer::Viewer;
