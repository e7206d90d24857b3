//! Transform math
//!
//! - [`RigidTransform`]: 4x4 homogeneous transform with a closed-form inverse
//! - [`rpy_from_rotation`] / [`rotation_from_rpy`]: extrinsic X-Y-Z Euler angles
//!
//! # Example
//!
//! ```rust
//! use extrinsics_core::tf::{rpy_from_rotation, RigidTransform};
//!
//! let camera = RigidTransform::from_translation([1.0, 2.0, 3.0]);
//! let inverse = camera.inverse();
//! assert_eq!(inverse.translation().x, -1.0);
//!
//! let angles = rpy_from_rotation(&inverse.rotation());
//! assert_eq!(angles.yaw, 0.0);
//! ```

mod euler;
mod transform;

pub use euler::{rotation_from_rpy, rpy_from_rotation, EulerAngles, GIMBAL_LOCK_THRESHOLD};
pub use transform::{
    matrix_from_rows, RigidTransform, TransformError, TransformResult, RIGIDITY_TOLERANCE,
};
