/// micro3d core - software transform-and-rasterize pipeline.
///
/// Builds world/view/projection matrices, pushes vertices through them and
/// fills or outlines triangles into a plain `u32` pixel buffer. Presenting
/// the pixels is left to a [`DisplaySink`] supplied by the host.

pub mod color;
pub mod device;
pub mod display;
pub mod error;
pub mod geometry;
pub mod math;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use device::{Device, FrameBuffer};
pub use display::DisplaySink;
pub use error::{Error, Result};
pub use geometry::{draw_cube_filled, draw_cube_wireframe};
pub use math::{Matrix4, Vec4};
pub use projection::Camera;
pub use raster::{draw_line, draw_pixel, draw_point, draw_triangle_filled, draw_triangle_wireframe};
pub use scene::{draw_frame, draw_primitives, DrawMode};
pub use transform::{perspective_divide, project_vertex, viewport_transform, CubePose, Spin, Transform};
