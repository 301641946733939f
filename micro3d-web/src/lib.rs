/// micro3d web - canvas display sink and a JS-facing renderer
///
/// The pixels are produced by the software rasterizer in `micro3d-core` and
/// copied to a 2D canvas with `putImageData`; no WebGL involved.
use micro3d_core::{draw_frame, Camera, Color, CubePose, DisplaySink, DrawMode, FrameBuffer, Spin, Transform};
use wasm_bindgen::{prelude::*, Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Presents frames on an HTML canvas.
pub struct CanvasSink {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSink {
    /// Look up `<canvas id=canvas_id>` and take its 2D context.
    pub fn from_element_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.canvas.width() as usize, self.canvas.height() as usize)
    }
}

impl DisplaySink for CanvasSink {
    type Error = JsValue;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), JsValue> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(());
        }
        let rgba = frame.to_rgba8();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            frame.width() as u32,
            frame.height() as u32,
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), JsValue> {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        Ok(())
    }
}

/// Everything a frame is built from, independent of the browser.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub frame: FrameBuffer,
    pub camera: Camera,
    pub pose: CubePose,
    pub spin: Spin,
    /// Radians per second
    pub spin_speed: f32,
    pub mode: DrawMode,
    pub background: Color,
}

impl FrameState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            camera: Camera::new(width, height),
            pose: CubePose::default(),
            spin: Spin::default(),
            spin_speed: 1.0,
            mode: DrawMode::Filled,
            background: Color::LIGHT_GREY,
        }
    }

    /// Whether the camera can produce a view and projection.
    pub fn validate(&self) -> micro3d_core::Result<()> {
        self.camera.validate()
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
        self.camera.set_viewport(width, height);
    }

    /// Advance the spin by `dt` seconds and draw the next frame.
    pub fn step(&mut self, dt: f32) -> &FrameBuffer {
        self.spin.advance(self.spin_speed * dt);
        let transform = Transform::for_frame(self.spin.angle, &self.pose, &self.camera);
        self.frame.clear(self.background);
        draw_frame(&mut self.frame.device(), self.mode, &transform);
        &self.frame
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    state: FrameState,
    sink: CanvasSink,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with the given element id, sized as it is now.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let sink = CanvasSink::from_element_id(canvas_id)?;
        let (width, height) = sink.size();
        log::debug!("canvas '{}' is {}x{}", canvas_id, width, height);
        let state = FrameState::new(width, height);
        state
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebRenderer { state, sink })
    }

    /// Render a frame `dt` seconds after the previous one
    pub fn render(&mut self, dt: f32) -> Result<(), JsValue> {
        let frame = self.state.step(dt);
        self.sink.present(frame)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.state.resize(width as usize, height as usize);
        self.sink.resize(width as usize, height as usize)
    }

    /// One of "filled", "wireframe" or "primitives"
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.state.mode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn mode(&self) -> String {
        self.state.mode.to_string()
    }

    pub fn set_spin_speed(&mut self, radians_per_second: f32) {
        self.state.spin_speed = radians_per_second;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_advances_and_draws() {
        let mut state = FrameState::new(40, 30);
        state.spin_speed = 2.0;
        let frame = state.step(0.25);
        assert!(frame
            .pixels()
            .iter()
            .any(|&p| p != Color::LIGHT_GREY.pack()));
        assert!((state.spin.angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_frame_and_camera() {
        let mut state = FrameState::new(40, 30);
        state.resize(100, 25);
        assert_eq!((state.frame.width(), state.frame.height()), (100, 25));
        assert_eq!(state.camera.aspect, 4.0);
    }

    #[test]
    fn camera_is_checked_before_rendering() {
        let mut state = FrameState::new(40, 30);
        assert!(state.validate().is_ok());
        state.camera.z_far = state.camera.z_near;
        assert!(matches!(
            state.validate(),
            Err(micro3d_core::Error::InvalidProjection { .. })
        ));
    }

    #[test]
    fn rgba_output_is_opaque() {
        let mut state = FrameState::new(8, 8);
        state.mode = DrawMode::Wireframe;
        let bytes = state.step(0.0).to_rgba8();
        assert_eq!(bytes.len(), 8 * 8 * 4);
        assert!(bytes.chunks(4).all(|px| px[3] == 255));
    }
}
