/// Vector and matrix builders.
///
/// All matrices follow the row-vector convention: a point is a row vector
/// multiplied on the left (`v * M`), so the translation of an affine matrix
/// lives in row 3 and `a * b` applies `a` before `b`. Storage is nalgebra's,
/// and `m[(row, col)]` addresses the grid row-major.
use nalgebra::{Vector3, Vector4};

use crate::error::{Error, Result};

/// Homogeneous point or direction (`w = 1` for points, `w = 0` for directions).
pub type Vec4 = Vector4<f32>;

/// 4x4 transform, row-major grid, row-vector convention.
pub type Matrix4 = nalgebra::Matrix4<f32>;

/// A point in homogeneous coordinates.
pub fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// A direction in homogeneous coordinates.
pub fn direction(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

pub fn identity() -> Matrix4 {
    Matrix4::identity()
}

/// Translation by `(tx, ty, tz)`, stored in row 3.
pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4 {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        tx, ty, tz, 1.0,
    )
}

/// Right-handed rotation about the X axis, `angle` in radians.
pub fn rotation_x(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about the Y axis, `angle` in radians.
pub fn rotation_y(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about the Z axis, `angle` in radians.
pub fn rotation_z(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4 {
    Matrix4::new(
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, sz, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// `result[i][j] = Σ_k a[i][k] * b[k][j]`. Not commutative.
pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    a * b
}

/// Row vector times matrix: `result[j] = Σ_i v[i] * m[i][j]`.
pub fn vector_transform(v: &Vec4, m: &Matrix4) -> Vec4 {
    (v.transpose() * m).transpose()
}

/// Inverse of `m`, or `None` when it is singular.
pub fn inverse(m: &Matrix4) -> Option<Matrix4> {
    m.try_inverse()
}

/// Right-handed view matrix looking from `eye` towards `target`.
///
/// Only the xyz components of the inputs are used. A zero-length forward or
/// right axis (`eye == target`, or `up` parallel to the view direction) is
/// left as a zero vector, which yields a singular matrix. Use
/// [`try_look_at`] to reject such input instead.
pub fn look_at(eye: &Vec4, target: &Vec4, up: &Vec4) -> Matrix4 {
    let forward = normalize_or_zero(target.xyz() - eye.xyz());
    let right = normalize_or_zero(forward.cross(&up.xyz()));
    let true_up = right.cross(&forward);
    view_from_basis(&eye.xyz(), &right, &true_up, &forward)
}

/// [`look_at`] that fails with [`Error::DegenerateBasis`] instead of
/// producing a singular matrix.
pub fn try_look_at(eye: &Vec4, target: &Vec4, up: &Vec4) -> Result<Matrix4> {
    let forward = (target.xyz() - eye.xyz())
        .try_normalize(f32::EPSILON)
        .ok_or_else(|| degenerate("forward"))?;
    let right = forward
        .cross(&up.xyz())
        .try_normalize(f32::EPSILON)
        .ok_or_else(|| degenerate("right"))?;
    let true_up = right.cross(&forward);
    Ok(view_from_basis(&eye.xyz(), &right, &true_up, &forward))
}

/// Right-handed perspective projection. `w` of the result is `-z_view`.
///
/// Expects `z_near > 0`, `z_far > z_near`, `fov_y` in `(0, π)` and a positive
/// aspect; nothing is checked. See [`try_perspective_fov`].
pub fn perspective_fov(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Matrix4 {
    let y_scale = 1.0 / (fov_y * 0.5).tan();
    let x_scale = y_scale / aspect;
    let depth = z_near - z_far;
    Matrix4::new(
        x_scale, 0.0, 0.0, 0.0, //
        0.0, y_scale, 0.0, 0.0, //
        0.0, 0.0, z_far / depth, -1.0, //
        0.0, 0.0, z_near * z_far / depth, 0.0,
    )
}

pub fn try_perspective_fov(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Result<Matrix4> {
    let reason = if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
        Some("fov_y must lie in (0, pi)")
    } else if !(aspect > 0.0 && aspect.is_finite()) {
        Some("aspect must be positive")
    } else if !(z_near > 0.0) {
        Some("z_near must be positive")
    } else if !(z_far > z_near) {
        Some("z_far must exceed z_near")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            log::warn!(
                "rejecting projection fov_y={fov_y} aspect={aspect} near={z_near} far={z_far}: {reason}"
            );
            Err(Error::InvalidProjection { reason })
        }
        None => Ok(perspective_fov(fov_y, aspect, z_near, z_far)),
    }
}

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0).unwrap_or(v)
}

fn degenerate(axis: &'static str) -> Error {
    log::warn!("look-at rejected: {axis} axis has zero length");
    Error::DegenerateBasis { axis }
}

/// Rotation part is the transpose of `[right, up, -forward]`.
fn view_from_basis(
    eye: &Vector3<f32>,
    right: &Vector3<f32>,
    up: &Vector3<f32>,
    forward: &Vector3<f32>,
) -> Matrix4 {
    Matrix4::new(
        right.x, up.x, -forward.x, 0.0, //
        right.y, up.y, -forward.y, 0.0, //
        right.z, up.z, -forward.z, 0.0, //
        -right.dot(eye), -up.dot(eye), forward.dot(eye), 1.0,
    )
}
