//! Rigid-body transform
//!
//! A 4x4 homogeneous matrix `[[R, t], [0, 1]]` where `R` is a proper
//! rotation. Construction comes in two flavours: [`RigidTransform::try_from_matrix`]
//! checks rigidity, [`RigidTransform::from_matrix_unchecked`] trusts the caller.

use nalgebra::{Matrix3, Matrix4, Vector3};
use thiserror::Error;

/// Maximum deviation accepted by the rigidity checks
///
/// Calibration files usually print rotation entries with a limited number
/// of decimals, so `R * R^T` is only approximately the identity.
pub const RIGIDITY_TOLERANCE: f64 = 1e-4;

/// Rigidity violations reported by the checked constructor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Entry ({row}, {col}) is not a finite number")]
    NonFinite { row: usize, col: usize },

    #[error("Bottom row must be [0, 0, 0, 1], found {0:?}")]
    InvalidBottomRow([f64; 4]),

    #[error("Rotation block is not orthonormal (max |R*R^T - I| = {0:e})")]
    NotOrthonormal(f64),

    #[error("Rotation block has determinant {0}, expected +1")]
    NotProperRotation(f64),
}

/// Result type for transform construction
pub type TransformResult<T> = Result<T, TransformError>;

/// Homogeneous rigid transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    matrix: Matrix4<f64>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Build from a rotation block and a translation vector
    pub fn from_parts(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Pure translation
    pub fn from_translation(translation: [f64; 3]) -> Self {
        Self::from_parts(Matrix3::identity(), Vector3::from(translation))
    }

    /// Build from a matrix, rejecting anything that is not a rigid transform
    pub fn try_from_matrix(matrix: Matrix4<f64>) -> TransformResult<Self> {
        let transform = Self::from_matrix_unchecked(matrix);
        transform.validate()?;
        Ok(transform)
    }

    /// Build from a matrix without any checks.
    ///
    /// Inversion and decomposition of a non-rigid matrix silently produce
    /// meaningless numbers.
    pub fn from_matrix_unchecked(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// Check that the matrix is finite, has a homogeneous bottom row and a
    /// proper rotation block.
    pub fn validate(&self) -> TransformResult<()> {
        for row in 0..4 {
            for col in 0..4 {
                if !self.matrix[(row, col)].is_finite() {
                    return Err(TransformError::NonFinite { row, col });
                }
            }
        }

        let bottom = [
            self.matrix[(3, 0)],
            self.matrix[(3, 1)],
            self.matrix[(3, 2)],
            self.matrix[(3, 3)],
        ];
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom
            .iter()
            .zip(expected.iter())
            .any(|(found, want)| (found - want).abs() > RIGIDITY_TOLERANCE)
        {
            return Err(TransformError::InvalidBottomRow(bottom));
        }

        let rotation = self.rotation();
        let deviation = (rotation * rotation.transpose() - Matrix3::identity()).amax();
        if deviation > RIGIDITY_TOLERANCE {
            return Err(TransformError::NotOrthonormal(deviation));
        }

        let det = rotation.determinant();
        if (det - 1.0).abs() > RIGIDITY_TOLERANCE {
            return Err(TransformError::NotProperRotation(det));
        }

        Ok(())
    }

    /// Underlying homogeneous matrix
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Top-left 3x3 rotation block
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Top three entries of the last column
    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Closed-form rigid inverse: `[R^T, -R^T t]`
    pub fn inverse(&self) -> Self {
        let rotation_inv = self.rotation().transpose();
        let translation_inv = -(rotation_inv * self.translation());
        Self::from_parts(rotation_inv, translation_inv)
    }

    /// Matrix product `self * other`
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

/// Convert row-major nested arrays into a matrix
pub fn matrix_from_rows(rows: &[[f64; 4]; 4]) -> Matrix4<f64> {
    Matrix4::from_fn(|row, col| rows[row][col])
}
