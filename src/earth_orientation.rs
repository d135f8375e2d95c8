//! # Earth orientation
//!
//! Mean obliquity, nutation, precession and the equation of the equinoxes, i.e. everything
//! needed to carry a vector from the mean equator and equinox of J2000 (the frame of the JPL
//! ephemerides and of the star catalog) to the **true equator and equinox of date**, the frame in
//! which the local sidereal time measures hour angles.
//!
//! Models
//! ------
//! * obliquity: IAU 1976 (Lieske),
//! * precession: IAU 1976 (ζ, z, θ polynomials),
//! * nutation: the four dominant terms of the IAU 1980 series (Meeus, ch. 22), good to about
//!   0.5" in longitude and 0.1" in obliquity.
//!
//! Every function takes the epoch as a Modified Julian Date in TT.
use nalgebra::Matrix3;

use crate::{
    constants::{ArcSec, Radian, MJD, RADEG, RADSEC, T2000},
    ref_system::frame_rotation,
};

fn centuries_since_j2000(tjm: MJD) -> f64 {
    (tjm - T2000) / 36525.0
}

/// Mean obliquity of the ecliptic (radians).
pub fn obleq(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = centuries_since_j2000(tjm);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation in longitude and in obliquity, `(Δψ, Δε)` in arcseconds.
pub fn nutation_angles(tjm: MJD) -> (ArcSec, ArcSec) {
    let t = centuries_since_j2000(tjm);

    // longitude of the Moon's ascending node
    let omega = (125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450000.0) * RADEG;
    // mean longitudes of the Sun and of the Moon
    let sun = (280.4665 + 36000.7698 * t) * RADEG;
    let moon = (218.3165 + 481267.8813 * t) * RADEG;

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * sun).cos() + 0.10 * (2.0 * moon).cos()
        - 0.09 * (2.0 * omega).cos();

    (dpsi, deps)
}

/// Equation of the equinoxes, `Δψ cos ε` (radians).
///
/// Added to the mean sidereal time it gives the apparent sidereal time.
pub fn equequ(tjm: MJD) -> Radian {
    let (dpsi, _) = nutation_angles(tjm);
    RADSEC * dpsi * obleq(tjm).cos()
}

/// Precession matrix from the mean equator and equinox of J2000 to the mean equator and equinox
/// of date.
///
/// `P = R3(-z) · R2(θ) · R3(-ζ)`
pub fn precession_matrix(tjm: MJD) -> Matrix3<f64> {
    let t = centuries_since_j2000(tjm);

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    frame_rotation(-z, 2) * frame_rotation(theta, 1) * frame_rotation(-zeta, 2)
}

/// Nutation matrix from the mean equator and equinox of date to the true equator and equinox of
/// date.
///
/// `N = R1(-(ε + Δε)) · R3(-Δψ) · R1(ε)`
pub fn nutation_matrix(tjm: MJD) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutation_angles(tjm);
    let epst = epsm + deps * RADSEC;

    frame_rotation(-epst, 0) * frame_rotation(-dpsi * RADSEC, 2) * frame_rotation(epsm, 0)
}

/// Full rotation from mean J2000 to the true equator and equinox of date, `N · P`.
pub fn j2000_to_true_of_date(tjm: MJD) -> Matrix3<f64> {
    nutation_matrix(tjm) * precession_matrix(tjm)
}

#[cfg(test)]
mod test_earth_orientation {
    use super::*;
    use crate::ref_system::cartesian_to_radec;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Vector3;

    #[test]
    fn test_obliquity() {
        assert_eq!(obleq(T2000), 0.40909280422232897);
    }

    #[test]
    fn test_nutation_angles_at_j2000() {
        // full IAU 1980 series gives (-13.923, -5.774)
        let (dpsi, deps) = nutation_angles(T2000);
        assert_abs_diff_eq!(dpsi, -13.923, epsilon = 0.5);
        assert_abs_diff_eq!(deps, -5.774, epsilon = 0.2);
    }

    #[test]
    fn test_equation_of_equinoxes_is_small() {
        for k in 0..40 {
            let eq = equequ(T2000 + k as f64 * 250.0);
            // |Δψ cos ε| < 18"
            assert!(eq.abs() < 18.0 * RADSEC);
        }
    }

    #[test]
    fn test_precession_identity_at_j2000() {
        assert_relative_eq!(precession_matrix(T2000), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_precession_moves_equinox_eastward() {
        // half a century after J2000
        let tjm = T2000 + 36525.0 / 2.0;
        let moved = precession_matrix(tjm) * Vector3::x();
        let (alpha, delta, _) = cartesian_to_radec(&moved);

        assert_abs_diff_eq!(alpha / RADEG, 0.64072, epsilon = 1e-4);
        assert_abs_diff_eq!(delta / RADEG, 0.27834, epsilon = 1e-4);
    }

    #[test]
    fn test_nutation_matrix_is_small_rotation() {
        let tjm = 60410.5;
        let nut = nutation_matrix(tjm);
        assert_relative_eq!(nut.transpose() * nut, Matrix3::identity(), epsilon = 1e-14);
        // off-diagonal terms are of order Δψ ~ 1e-4 rad
        assert!(nut[(0, 1)].abs() < 1e-4);
        assert!(nut[(0, 2)].abs() < 1e-4);
    }
}
