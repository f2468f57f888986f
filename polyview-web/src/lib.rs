/// polyview Web - WASM viewer drawing onto an HTML canvas
///
/// The host page forwards pointer events; every change repaints the canvas
/// through the 2D context.
use nalgebra::Point2;
use polyview_core::{Rgb, Surface, Viewer, ViewerConfig};
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] over a canvas 2D context
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn from_element_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    fn trace(&self, points: &[Point2<f64>]) {
        self.context.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.context.move_to(first.x, first.y);
            for p in rest {
                self.context.line_to(p.x, p.y);
            }
        }
        self.context.close_path();
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, background: Rgb) -> Result<(), JsValue> {
        let (width, height) = self.size();
        self.context.set_fill_style(&JsValue::from_str(&background.to_string()));
        self.context.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
        Ok(())
    }

    fn fill_polygon(
        &mut self,
        points: &[Point2<f64>],
        fill: Rgb,
        outline: Rgb,
        outline_width: f64,
    ) -> Result<(), JsValue> {
        self.trace(points);
        self.context.set_fill_style(&JsValue::from_str(&fill.to_string()));
        self.context.fill();
        if outline_width > 0.0 {
            self.context.set_stroke_style(&JsValue::from_str(&outline.to_string()));
            self.context.set_line_width(outline_width);
            self.context.stroke();
        }
        Ok(())
    }

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Rgb) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.context.set_fill_style(&JsValue::from_str(&color.to_string()));
        self.context.fill();
        Ok(())
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebViewer {
    /// Load `mesh_text` and paint it onto the canvas with id `canvas_id`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, mesh_text: &str) -> Result<WebViewer, JsValue> {
        let mut surface = CanvasSurface::from_element_id(canvas_id)?;
        let (width, height) = surface.size();
        let (viewer, draw_list) =
            Viewer::on_load(mesh_text, width, height, ViewerConfig::default())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        polyview_core::paint(&mut surface, &draw_list, &viewer.config().style)?;
        Ok(WebViewer { viewer, surface })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.viewer.on_pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        match self.viewer.on_pointer_move(x, y) {
            Some(draw_list) => {
                polyview_core::paint(&mut self.surface, &draw_list, &self.viewer.config().style)
            }
            None => Ok(()),
        }
    }

    pub fn pointer_up(&mut self) {
        self.viewer.on_pointer_up();
    }

    /// Repaint, picking up any change to the canvas size
    pub fn render(&mut self) -> Result<(), JsValue> {
        let (width, height) = self.surface.size();
        if *self.viewer.viewport() != polyview_core::Viewport::for_canvas(width, height) {
            self.viewer.resize(width, height);
        }
        self.viewer.paint(&mut self.surface)
    }
}
