/// Per-frame transform bundle and the vertex pipeline:
/// `world * view * projection`, perspective divide, viewport mapping.
use std::f32::consts::TAU;

use crate::math::{multiply, rotation_y, scaling, translation, vector_transform, Matrix4, Vec4};
use crate::projection::Camera;

/// Caller-owned animation state: the cube's rotation about Y, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub angle: f32,
}

impl Spin {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: angle.rem_euclid(TAU),
        }
    }

    /// Rotate by `delta` radians, wrapping into `[0, 2π)`.
    pub fn advance(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }
}

/// Placement of the mesh in the world, apart from its spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubePose {
    pub scale: [f32; 3],
    pub translation: [f32; 3],
}

impl CubePose {
    pub fn with_scale(mut self, s: f32) -> Self {
        self.scale = [s, s, s];
        self
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = [x, y, z];
        self
    }

    /// `translation * (rotation_y(angle) * scaling)`.
    pub fn world_matrix(&self, angle: f32) -> Matrix4 {
        let [sx, sy, sz] = self.scale;
        let [tx, ty, tz] = self.translation;
        multiply(
            &translation(tx, ty, tz),
            &multiply(&rotation_y(angle), &scaling(sx, sy, sz)),
        )
    }
}

impl Default for CubePose {
    fn default() -> Self {
        Self {
            scale: [1.0; 3],
            translation: [0.0; 3],
        }
    }
}

/// World, view and projection for a single frame. Built, used once, dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub world: Matrix4,
    pub view: Matrix4,
    pub projection: Matrix4,
}

impl Transform {
    pub fn new(world: Matrix4, view: Matrix4, projection: Matrix4) -> Self {
        Self {
            world,
            view,
            projection,
        }
    }

    /// Seed a frame from the current spin angle, the mesh pose and the camera.
    pub fn for_frame(angle: f32, pose: &CubePose, camera: &Camera) -> Self {
        Self {
            world: pose.world_matrix(angle),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }
    }

    /// `world * view * projection`.
    pub fn wvp(&self) -> Matrix4 {
        multiply(&multiply(&self.world, &self.view), &self.projection)
    }
}

/// Divide x, y and z by w. A zero w leaves the vertex untouched.
pub fn perspective_divide(v: &Vec4) -> Vec4 {
    if v.w != 0.0 {
        Vec4::new(v.x / v.w, v.y / v.w, v.z / v.w, v.w)
    } else {
        *v
    }
}

/// Map NDC `[-1, 1]` to pixels, flipping Y so row 0 is the top. Z is kept.
pub fn viewport_transform(v: &Vec4, screen_width: usize, screen_height: usize) -> Vec4 {
    Vec4::new(
        (v.x + 1.0) * 0.5 * screen_width as f32,
        (1.0 - v.y) * 0.5 * screen_height as f32,
        v.z,
        v.w,
    )
}

/// Model space to screen space through a precomposed `wvp`.
///
/// Vertices behind the camera are not clipped and land at meaningless
/// screen positions.
pub fn project_vertex(v: &Vec4, wvp: &Matrix4, screen_width: usize, screen_height: usize) -> Vec4 {
    let clip = vector_transform(v, wvp);
    viewport_transform(&perspective_divide(&clip), screen_width, screen_height)
}
