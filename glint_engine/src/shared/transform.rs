use crate::core::types::{Matrix4, Number, Point3, Vector3};
use getset::CopyGetters;
use glam::DQuat;

/// An affine transform paired with its cached inverse.
///
/// Inverting a [Matrix4] is by far the most common matrix operation during
/// rendering (every ray gets pulled into object space), so the inverse is
/// computed once when the transform is set.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Transform {
    matrix: Matrix4,
    inverse: Matrix4,
}

impl Transform {
    pub fn new(matrix: Matrix4) -> Self {
        Self {
            matrix,
            inverse: matrix.inverse(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self { Self::new(Matrix4::IDENTITY) }
}

impl From<Matrix4> for Transform {
    fn from(matrix: Matrix4) -> Self { Self::new(matrix) }
}

// region Matrix constructors

pub fn translation(x: Number, y: Number, z: Number) -> Matrix4 {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

pub fn scaling(x: Number, y: Number, z: Number) -> Matrix4 { Matrix4::from_scale(Vector3::new(x, y, z)) }

pub fn rotation_x(radians: Number) -> Matrix4 { Matrix4::from_rotation_x(radians) }

pub fn rotation_y(radians: Number) -> Matrix4 { Matrix4::from_rotation_y(radians) }

pub fn rotation_z(radians: Number) -> Matrix4 { Matrix4::from_rotation_z(radians) }

/// Shear matrix, where e.g. `xy` is the amount `x` moves in proportion to `y`
pub fn shearing(xy: Number, xz: Number, yx: Number, yz: Number, zx: Number, zy: Number) -> Matrix4 {
    // Column-major: each DVec4 below is one column of the matrix
    Matrix4::from_cols(
        glam::DVec4::new(1., yx, zx, 0.),
        glam::DVec4::new(xy, 1., zy, 0.),
        glam::DVec4::new(xz, yz, 1., 0.),
        glam::DVec4::new(0., 0., 0., 1.),
    )
}

/// The rotation that maps direction `from` onto direction `to`
pub fn rotation_between(from: Vector3, to: Vector3) -> Matrix4 {
    Matrix4::from_quat(DQuat::from_rotation_arc(from.normalize(), to.normalize()))
}

/// World-to-camera orientation matrix for an eye at `from`, looking at `to`
pub fn view_transform(from: Point3, to: Point3, up: Vector3) -> Matrix4 {
    let forward = (to - from).normalize();
    let left = forward.cross(up.normalize());
    let true_up = left.cross(forward);

    let orientation = Matrix4::from_cols(
        glam::DVec4::new(left.x, true_up.x, -forward.x, 0.),
        glam::DVec4::new(left.y, true_up.y, -forward.y, 0.),
        glam::DVec4::new(left.z, true_up.z, -forward.z, 0.),
        glam::DVec4::new(0., 0., 0., 1.),
    );

    orientation * translation(-from.x, -from.y, -from.z)
}

// endregion Matrix constructors
