//! # Reference frame helpers
//!
//! Elementary rotations and conversions between Cartesian vectors and equatorial angles.
//!
//! Two rotation flavours are used in the crate:
//! * [`rotmt`] rotates a **vector** by `alpha` around a fixed axis (active rotation),
//! * [`frame_rotation`] rotates the **frame** by `angle` (passive rotation, the `R1/R2/R3`
//!   matrices of the astronomical literature). `frame_rotation(a, k) == rotmt(-a, k)`.
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use crate::constants::{Degree, Radian, DPI};

fn axis(k: usize) -> Unit<Vector3<f64>> {
    match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    }
}

/// Active rotation matrix of angle `alpha` (radians) around axis `k` (0 = x, 1 = y, 2 = z).
///
/// Any `k > 2` is treated as the z axis.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&axis(k), alpha).into()
}

/// Passive rotation of the coordinate frame by `angle` around axis `k`.
pub fn frame_rotation(angle: Radian, k: usize) -> Matrix3<f64> {
    rotmt(-angle, k)
}

/// Convert a Cartesian vector into right ascension and declination.
///
/// Return
/// ----------
/// * `(alpha, delta, rho)`: right ascension in `[0, 2π)`, declination in `[-π/2, π/2]` (radians)
///   and the vector norm.
///
/// A null vector yields `(0, 0, 0)`.
pub fn cartesian_to_radec(position: &Vector3<f64>) -> (Radian, Radian, f64) {
    let rho = position.norm();
    if rho == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let delta = (position.z / rho).clamp(-1.0, 1.0).asin();
    let alpha = position.y.atan2(position.x).rem_euclid(DPI);

    (alpha, delta, rho)
}

/// Unit vector pointing at `(alpha, delta)`, both in radians.
pub fn radec_to_unit(alpha: Radian, delta: Radian) -> Vector3<f64> {
    Vector3::new(
        delta.cos() * alpha.cos(),
        delta.cos() * alpha.sin(),
        delta.sin(),
    )
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: Degree) -> Degree {
    angle.rem_euclid(360.0)
}
