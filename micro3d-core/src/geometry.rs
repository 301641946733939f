/// Fixed unit-cube geometry and the per-frame cube draw calls.
use crate::color::Color;
use crate::device::Device;
use crate::math::{point, Vec4};
use crate::raster::{draw_segment, draw_triangle_filled};
use crate::transform::{project_vertex, Transform};

/// Corners of the unit cube centred on the origin.
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// A filled triangle: three vertex indices and its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub color: Color,
}

/// A wireframe edge between two vertex indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

const fn face(i0: usize, i1: usize, i2: usize, color: Color) -> Face {
    Face {
        indices: [i0, i1, i2],
        color,
    }
}

const fn edge(start: usize, end: usize, color: Color) -> Edge {
    Edge { start, end, color }
}

pub const FRONT: Color = Color::RED;
pub const BACK: Color = Color::GREEN;
pub const RIGHT: Color = Color::BLUE;
pub const LEFT: Color = Color::YELLOW;
pub const TOP: Color = Color::CYAN;
pub const BOTTOM: Color = Color::MAGENTA;

/// Two triangles per side. Each triangle is listed clockwise as seen from
/// outside the cube, which the viewport's Y flip turns into the positive
/// screen-space winding the fill accepts. Faces turned away from the camera
/// therefore draw nothing.
pub const CUBE_FACES: [Face; 12] = [
    // +z
    face(4, 6, 5, FRONT),
    face(4, 7, 6, FRONT),
    // -z
    face(1, 3, 0, BACK),
    face(1, 2, 3, BACK),
    // +x
    face(5, 2, 1, RIGHT),
    face(5, 6, 2, RIGHT),
    // -x
    face(0, 7, 4, LEFT),
    face(0, 3, 7, LEFT),
    // +y
    face(7, 2, 6, TOP),
    face(7, 3, 2, TOP),
    // -y
    face(0, 5, 1, BOTTOM),
    face(0, 4, 5, BOTTOM),
];

/// Back ring, front ring, then the four edges joining them.
pub const CUBE_EDGES: [Edge; 12] = [
    edge(0, 1, BACK),
    edge(1, 2, BACK),
    edge(2, 3, BACK),
    edge(3, 0, BACK),
    edge(4, 5, FRONT),
    edge(5, 6, FRONT),
    edge(6, 7, FRONT),
    edge(7, 4, FRONT),
    edge(0, 4, Color::DARK_RED),
    edge(1, 5, Color::DARK_RED),
    edge(2, 6, Color::DARK_RED),
    edge(3, 7, Color::DARK_RED),
];

/// All cube corners in screen space, transformed once for the whole frame.
pub fn project_cube(device: &Device<'_>, transform: &Transform) -> [Vec4; 8] {
    let wvp = transform.wvp();
    let (width, height) = (device.width(), device.height());
    CUBE_VERTICES.map(|[x, y, z]| project_vertex(&point(x, y, z), &wvp, width, height))
}

pub fn draw_cube_filled(device: &mut Device<'_>, transform: &Transform) {
    let screen = project_cube(device, transform);
    for face in &CUBE_FACES {
        let [a, b, c] = face.indices;
        draw_triangle_filled(device, &screen[a], &screen[b], &screen[c], face.color);
    }
    log::trace!("cube filled: {} faces", CUBE_FACES.len());
}

pub fn draw_cube_wireframe(device: &mut Device<'_>, transform: &Transform) {
    let screen = project_cube(device, transform);
    for edge in &CUBE_EDGES {
        draw_segment(device, &screen[edge.start], &screen[edge.end], edge.color);
    }
    log::trace!("cube wireframe: {} edges", CUBE_EDGES.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FrameBuffer;
    use crate::math::{direction, identity, look_at, perspective_fov};
    use std::collections::HashSet;

    /// Camera on +z looking straight at the cube.
    fn head_on(angle: f32) -> Transform {
        let world = crate::transform::CubePose::default().world_matrix(angle);
        let view = look_at(
            &point(0.0, 0.0, 3.0),
            &point(0.0, 0.0, 0.0),
            &direction(0.0, 1.0, 0.0),
        );
        Transform::new(world, view, perspective_fov(std::f32::consts::FRAC_PI_3, 1.0, 0.1, 100.0))
    }

    fn colors(frame: &FrameBuffer) -> HashSet<Color> {
        frame
            .pixels()
            .iter()
            .map(|&p| Color::unpack(p))
            .filter(|&c| c != Color::BLACK)
            .collect()
    }

    #[test]
    fn faces_reference_valid_corners() {
        for f in &CUBE_FACES {
            assert!(f.indices.iter().all(|&i| i < CUBE_VERTICES.len()));
        }
        for e in &CUBE_EDGES {
            assert!(e.start < 8 && e.end < 8 && e.start != e.end);
        }
        let distinct: HashSet<Color> = CUBE_FACES.iter().map(|f| f.color).collect();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn edges_have_unit_length() {
        for e in &CUBE_EDGES {
            let a = CUBE_VERTICES[e.start];
            let b = CUBE_VERTICES[e.end];
            let d: f32 = (0..3).map(|i| (a[i] - b[i]).abs()).sum();
            assert!((d - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn only_the_facing_side_is_filled() {
        let mut frame = FrameBuffer::new(64, 64);
        draw_cube_filled(&mut frame.device(), &head_on(0.0));
        assert_eq!(colors(&frame), HashSet::from([FRONT]));
        assert_eq!(frame.get(32, 32), Some(FRONT));
    }

    #[test]
    fn half_turn_shows_the_back() {
        let mut frame = FrameBuffer::new(64, 64);
        draw_cube_filled(&mut frame.device(), &head_on(std::f32::consts::PI));
        assert_eq!(colors(&frame), HashSet::from([BACK]));
    }

    #[test]
    fn default_camera_sees_front_and_top() {
        let mut frame = FrameBuffer::new(96, 64);
        let camera = crate::projection::Camera::new(96, 64);
        let t = Transform::for_frame(0.0, &Default::default(), &camera);
        draw_cube_filled(&mut frame.device(), &t);
        assert_eq!(colors(&frame), HashSet::from([FRONT, TOP]));
    }

    #[test]
    fn wireframe_draws_outline_only() {
        let mut frame = FrameBuffer::new(64, 64);
        draw_cube_wireframe(&mut frame.device(), &head_on(0.3));
        let painted = frame.pixels().iter().filter(|&&p| p != 0).count();
        assert!(painted > 0);
        // a rotated cube seen head-on never outlines more than a fraction of the frame
        assert!(painted < 64 * 64 / 4);
        assert_eq!(frame.get(32, 32), Some(Color::BLACK));
    }

    #[test]
    fn identity_transform_collapses_into_view() {
        // without view or projection the cube spans NDC [-0.5, 0.5]
        let mut frame = FrameBuffer::new(40, 40);
        let t = Transform::new(identity(), identity(), identity());
        let screen = project_cube(&frame.device(), &t);
        assert_eq!((screen[0].x, screen[0].y), (10.0, 30.0));
        assert_eq!((screen[6].x, screen[6].y), (30.0, 10.0));
    }
}
