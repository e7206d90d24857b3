//! Roll/pitch/yaw decomposition
//!
//! Extrinsic X-Y-Z convention: a vector is rotated about the fixed X axis
//! by `yaw`, then about the fixed Y axis by `pitch`, then about the fixed
//! Z axis by `roll`, i.e. `R = Rz(roll) * Ry(pitch) * Rx(yaw)`.

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Below this value of `cos(pitch)` the rotation is treated as gimbal locked
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1e-6;

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Rotation matrix for these angles
    pub fn to_rotation(&self) -> Matrix3<f64> {
        rotation_from_rpy(self.roll, self.pitch, self.yaw)
    }
}

/// Decompose a rotation matrix into roll, pitch and yaw.
///
/// At gimbal lock (pitch = ±90°) only the combination of roll and yaw is
/// observable; yaw is pinned to `0.0` and the whole rotation goes to roll.
/// No check is made that `rotation` is orthonormal.
pub fn rpy_from_rotation(rotation: &Matrix3<f64>) -> EulerAngles {
    let r = rotation;
    let cos_pitch = (r[(0, 0)].powi(2) + r[(1, 0)].powi(2)).sqrt();
    let pitch = (-r[(2, 0)]).atan2(cos_pitch);

    if cos_pitch > GIMBAL_LOCK_THRESHOLD {
        EulerAngles {
            roll: r[(1, 0)].atan2(r[(0, 0)]),
            pitch,
            yaw: r[(2, 1)].atan2(r[(2, 2)]),
        }
    } else {
        EulerAngles {
            roll: (-r[(1, 2)]).atan2(r[(0, 2)]),
            pitch,
            yaw: 0.0,
        }
    }
}

/// Build the rotation matrix `Rz(roll) * Ry(pitch) * Rx(yaw)`
pub fn rotation_from_rpy(roll: f64, pitch: f64, yaw: f64) -> Matrix3<f64> {
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), roll);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), pitch);
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), yaw);
    (rz * ry * rx).into_inner()
}
