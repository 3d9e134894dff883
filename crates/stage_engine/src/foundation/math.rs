//! Math utilities and types
//!
//! Provides the fundamental math types for stage transforms and pose
//! recording. Poses are stored in `f64` to match the precision of the
//! simulation side of the protocol.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f64>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose a transformation matrix into position, rotation, and scale
    ///
    /// The rotation is extracted from the scale-normalized upper 3x3 block.
    /// Columns with zero length leave the rotation basis untouched.
    #[must_use]
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = matrix.fixed_view::<3, 1>(0, 3).into_owned();

        let mut basis = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let scale = Vec3::new(
            basis.column(0).norm(),
            basis.column(1).norm(),
            basis.column(2).norm(),
        );
        for (i, factor) in scale.iter().enumerate() {
            if *factor > f64::EPSILON {
                let normalized = basis.column(i) / *factor;
                basis.set_column(i, &normalized);
            }
        }
        let rotation = Quat::from_matrix(&basis);

        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Rotate this transform about the world origin
    ///
    /// Both the position and the orientation are rotated, which is what a
    /// pivot-at-origin rotation of a whole scene does to each object in it.
    #[must_use]
    pub fn rotated_about_origin(&self, rotation: &Quat) -> Self {
        Self {
            position: rotation * self.position,
            rotation: rotation * self.rotation,
            scale: self.scale,
        }
    }

    /// Apply this transform to a point
    #[must_use]
    pub fn transform_point(&self, point: Point3) -> Point3 {
        let matrix = self.to_matrix();
        matrix.transform_point(&point)
    }
}
