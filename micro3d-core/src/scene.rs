/// What a host draws each frame.
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::device::Device;
use crate::geometry::{draw_cube_filled, draw_cube_wireframe};
use crate::math::point;
use crate::raster::{draw_line, draw_point, draw_triangle_filled};
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    #[default]
    Filled,
    Wireframe,
    /// Point, line and triangle debug primitives, no cube.
    Primitives,
}

impl DrawMode {
    pub fn next(self) -> Self {
        match self {
            DrawMode::Filled => DrawMode::Wireframe,
            DrawMode::Wireframe => DrawMode::Primitives,
            DrawMode::Primitives => DrawMode::Filled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::Filled => "filled",
            DrawMode::Wireframe => "wireframe",
            DrawMode::Primitives => "primitives",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filled" | "fill" => Ok(DrawMode::Filled),
            "wireframe" | "wire" => Ok(DrawMode::Wireframe),
            "primitives" | "debug" => Ok(DrawMode::Primitives),
            other => Err(format!("unknown draw mode '{other}'")),
        }
    }
}

/// Draw one frame in `mode`. `transform` is only used by the cube modes.
pub fn draw_frame(device: &mut Device<'_>, mode: DrawMode, transform: &Transform) {
    match mode {
        DrawMode::Filled => draw_cube_filled(device, transform),
        DrawMode::Wireframe => draw_cube_wireframe(device, transform),
        DrawMode::Primitives => draw_primitives(device),
    }
}

/// The debug scene: a red point, a blue line and a filled triangle, laid out
/// as on an 800x600 surface and scaled to the device.
pub fn draw_primitives(device: &mut Device<'_>) {
    let sx = device.width() as f32 / 800.0;
    let sy = device.height() as f32 / 600.0;
    let at = |x: f32, y: f32| ((x * sx) as i32, (y * sy) as i32);

    let (px, py) = at(100.0, 100.0);
    draw_point(device, px, py, 3, Color::RED);

    let (x1, y1) = at(200.0, 150.0);
    let (x2, y2) = at(400.0, 300.0);
    draw_line(device, x1, y1, x2, y2, Color::BLUE);

    let v1 = point(100.0 * sx, 100.0 * sy, 0.0);
    let v2 = point(400.0 * sx, 100.0 * sy, 0.0);
    let v3 = point(250.0 * sx, 400.0 * sy, 0.0);
    draw_triangle_filled(device, &v1, &v2, &v3, Color::DARK_RED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FrameBuffer;
    use crate::projection::Camera;
    use crate::transform::CubePose;

    #[test]
    fn modes_cycle_and_parse() {
        let mut mode = DrawMode::default();
        for _ in 0..3 {
            assert_eq!(mode.as_str().parse::<DrawMode>(), Ok(mode));
            mode = mode.next();
        }
        assert_eq!(mode, DrawMode::Filled);
        assert_eq!(" Wire ".parse::<DrawMode>(), Ok(DrawMode::Wireframe));
        assert!("shaded".parse::<DrawMode>().is_err());
    }

    #[test]
    fn primitives_at_native_size() {
        let mut frame = FrameBuffer::new(800, 600);
        draw_primitives(&mut frame.device());

        // the triangle is drawn last and covers the start of the line
        assert_eq!(frame.get(99, 99), Some(Color::RED));
        assert_eq!(frame.get(200, 150), Some(Color::DARK_RED));
        assert_eq!(frame.get(250, 200), Some(Color::DARK_RED));
        assert_eq!(frame.get(400, 300), Some(Color::BLUE));
        assert_eq!(frame.get(600, 500), Some(Color::BLACK));
    }

    #[test]
    fn every_mode_paints_something() {
        let camera = Camera::new(80, 60);
        let t = Transform::for_frame(0.5, &CubePose::default(), &camera);
        for mode in [DrawMode::Filled, DrawMode::Wireframe, DrawMode::Primitives] {
            let mut frame = FrameBuffer::new(80, 60);
            draw_frame(&mut frame.device(), mode, &t);
            assert!(frame.pixels().iter().any(|&p| p != 0), "{mode} drew nothing");
        }
    }
}
