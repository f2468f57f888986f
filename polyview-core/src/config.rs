/// Viewer configuration
use crate::interaction::DEFAULT_SENSITIVITY;
use crate::render::Shading;
use crate::surface::Style;

/// Everything a front-end needs to tune shading, painting and input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub shading: Shading,
    pub style: Style,
    /// Radians per pixel of pointer drag
    pub sensitivity: f64,
    /// Radians per key press for keyboard rotation
    pub key_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            shading: Shading::default(),
            style: Style::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            key_step: 0.05,
        }
    }
}
