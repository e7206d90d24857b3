//! Six degree-of-freedom pose record
//!
//! Translation in meters, rotation in radians. This is the shape written to
//! the report for every sensor.

use crate::tf::{rotation_from_rpy, rpy_from_rotation, EulerAngles, RigidTransform};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Decomposed transform: `{x, y, z, roll, pitch, yaw}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Pose {
    /// Create a pose from translation and Euler angles
    pub fn new(translation: [f64; 3], angles: EulerAngles) -> Self {
        Self {
            x: translation[0],
            y: translation[1],
            z: translation[2],
            roll: angles.roll,
            pitch: angles.pitch,
            yaw: angles.yaw,
        }
    }

    /// Split a transform into translation and roll/pitch/yaw
    pub fn from_transform(transform: &RigidTransform) -> Self {
        let t = transform.translation();
        let angles = rpy_from_rotation(&transform.rotation());
        Self::new([t.x, t.y, t.z], angles)
    }

    /// Recompose the homogeneous transform.
    ///
    /// Exact inverse of [`Pose::from_transform`] away from gimbal lock.
    pub fn to_transform(&self) -> RigidTransform {
        RigidTransform::from_parts(
            rotation_from_rpy(self.roll, self.pitch, self.yaw),
            Vector3::new(self.x, self.y, self.z),
        )
    }

    pub fn translation(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn euler(&self) -> EulerAngles {
        EulerAngles::new(self.roll, self.pitch, self.yaw)
    }
}
