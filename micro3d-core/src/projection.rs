/// Camera configuration: where the view matrix and projection come from.
use crate::error::Result;
use crate::math::{direction, look_at, perspective_fov, point, try_look_at, try_perspective_fov, Matrix4, Vec4};

/// Right-handed perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec4,
    pub target: Vec4,
    pub up: Vec4,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    /// Default camera for a `width` x `height` target: slightly above the
    /// origin, looking at it.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            eye: point(0.0, 1.0, 3.0),
            target: point(0.0, 0.0, 0.0),
            up: direction(0.0, 1.0, 0.0),
            fov_y: std::f32::consts::FRAC_PI_3,
            aspect: aspect_of(width, height),
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    pub fn with_eye(mut self, eye: Vec4) -> Self {
        self.eye = eye;
        self
    }

    pub fn with_target(mut self, target: Vec4) -> Self {
        self.target = target;
        self
    }

    pub fn with_up(mut self, up: Vec4) -> Self {
        self.up = up;
        self
    }

    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Follow a resized output.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.aspect = aspect_of(width, height);
        log::debug!("camera aspect now {:.3} ({}x{})", self.aspect, width, height);
    }

    pub fn view_matrix(&self) -> Matrix4 {
        look_at(&self.eye, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        perspective_fov(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    /// Check that the camera yields a usable view and projection.
    pub fn validate(&self) -> Result<()> {
        try_look_at(&self.eye, &self.target, &self.up)?;
        try_perspective_fov(self.fov_y, self.aspect, self.z_near, self.z_far)?;
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn aspect_of(width: usize, height: usize) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn empty_viewport_falls_back_to_square() {
        let mut camera = Camera::new(0, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.set_viewport(320, 80);
        assert_eq!(camera.aspect, 4.0);
    }

    #[test]
    fn degenerate_camera_fails_validation() {
        let camera = Camera::default().with_eye(point(0.0, 0.0, 0.0));
        assert_eq!(
            camera.validate(),
            Err(Error::DegenerateBasis { axis: "forward" })
        );

        let camera = Camera::default().with_fov(0.0);
        assert!(matches!(camera.validate(), Err(Error::InvalidProjection { .. })));
    }

    #[test]
    fn up_along_view_axis_fails_validation() {
        let camera = Camera::default()
            .with_target(point(0.0, 1.0, 0.0))
            .with_up(direction(0.0, 0.0, 1.0));
        assert_eq!(camera.validate(), Err(Error::DegenerateBasis { axis: "right" }));

        let camera = Camera::default().with_aspect(-1.0);
        assert!(matches!(camera.validate(), Err(Error::InvalidProjection { .. })));
        assert!(Camera::default().with_aspect(2.0).validate().is_ok());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        assert!(camera.view_matrix().norm() > 0.0);
        assert_eq!(camera.projection_matrix()[(2, 3)], -1.0);
    }
}
