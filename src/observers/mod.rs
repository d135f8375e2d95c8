//! # Observer frame
//!
//! An [`ObserverFrame`] is the full description of a single visibility query: a geodetic site
//! (latitude, longitude, optional elevation) and a UTC instant. Frames are immutable and built
//! fresh for every query.
//!
//! ## Frames & conventions
//!
//! ```text
//! Body-fixed (ITRS)  --(R3(-GAST))-->  true equator of date  --(N·P)ᵀ-->  mean equator J2000
//! ```
//!
//! * Longitudes are **east positive**, latitudes geodetic, both in degrees.
//! * Elevation is in **meters** above the WGS84 ellipsoid.
//! * Site vectors are in **AU**.
use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{Degree, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU},
    earth_orientation::j2000_to_true_of_date,
    merai_errors::MeraiError,
    ref_system::rotmt,
    time::{gast, last},
};

/// Location and instant of a single visibility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    /// Geodetic latitude, degrees in `[-90, 90]`.
    pub latitude: Degree,
    /// Longitude east of Greenwich, degrees in `[-180, 180]`.
    pub longitude: Degree,
    /// Height above the ellipsoid, meters.
    pub elevation: f64,
    /// UTC instant of the query.
    pub instant: Epoch,
}

impl ObserverFrame {
    /// Build a frame at sea level.
    ///
    /// Errors
    /// ----------
    /// * [`MeraiError::InvalidObserver`] when a coordinate is not finite or out of range.
    pub fn new(latitude: Degree, longitude: Degree, instant: Epoch) -> Result<Self, MeraiError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(MeraiError::InvalidObserver(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(MeraiError::InvalidObserver(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(ObserverFrame {
            latitude,
            longitude,
            elevation: 0.0,
            instant,
        })
    }

    pub fn with_elevation(mut self, elevation: f64) -> Result<Self, MeraiError> {
        if !elevation.is_finite() {
            return Err(MeraiError::InvalidObserver(format!(
                "elevation {elevation} is not finite"
            )));
        }
        self.elevation = elevation;
        Ok(self)
    }

    /// Same site, another instant.
    pub fn at(&self, instant: Epoch) -> Self {
        ObserverFrame { instant, ..*self }
    }

    pub fn latitude_rad(&self) -> Radian {
        self.latitude.to_radians()
    }

    pub fn longitude_rad(&self) -> Radian {
        self.longitude.to_radians()
    }

    /// Local apparent sidereal time at the site, radians.
    pub fn local_sidereal_time(&self) -> Radian {
        last(&self.instant, self.longitude_rad())
    }

    /// Position of the site in the Earth-fixed frame, AU.
    pub fn body_fixed_position(&self) -> Vector3<f64> {
        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(self.latitude, self.elevation);
        let lon = self.longitude_rad();

        Vector3::new(
            ERAU * rho_cos_phi * lon.cos(),
            ERAU * rho_cos_phi * lon.sin(),
            ERAU * rho_sin_phi,
        )
    }

    /// Geocentric position of the site in the mean equator and equinox of J2000, AU.
    pub fn geocentric_position_j2000(&self) -> Vector3<f64> {
        let earth_rotation = rotmt(gast(&self.instant), 2);
        let true_of_date = j2000_to_true_of_date(self.instant.to_mjd_tt_days());

        true_of_date.transpose() * earth_rotation * self.body_fixed_position()
    }
}

impl fmt::Display for ObserverFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {:.2}, Lon: {:.2} at {}",
            self.latitude, self.longitude, self.instant
        )
    }
}

/// Convert geodetic latitude (radians) and height (meters) into normalized parallax coordinates.
///
/// Return
/// ----------
/// * `(rho_cos_phi, rho_sin_phi)` in Earth equatorial radii.
pub fn lat_alt_to_parallax(lat: Radian, height: f64) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Same as [`lat_alt_to_parallax`] with the latitude in degrees.
pub fn geodetic_to_parallax(lat: Degree, height: f64) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use crate::time::parse_utc_instant;
    use approx::assert_relative_eq;

    fn instant() -> Epoch {
        parse_utc_instant("2024-04-10T04:00:00").unwrap()
    }

    #[test]
    fn geodetic_to_parallax_test() {
        // latitude and height of Pan-STARRS 1, Haleakala
        let (pxy1, pz1) = geodetic_to_parallax(20.707233557, 3067.694);
        assert_eq!(pxy1, 0.9362410003211518);
        assert_eq!(pz1, 0.35154299856304305);

        let (equator, pole) = geodetic_to_parallax(0.0, 0.0);
        assert_relative_eq!(equator, 1.0, epsilon = 1e-15);
        assert_relative_eq!(pole, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_reject_out_of_range() {
        assert!(ObserverFrame::new(34.05, -118.24, instant()).is_ok());
        assert!(ObserverFrame::new(90.0, 180.0, instant()).is_ok());
        assert!(matches!(
            ObserverFrame::new(91.0, 0.0, instant()),
            Err(MeraiError::InvalidObserver(_))
        ));
        assert!(ObserverFrame::new(0.0, -180.5, instant()).is_err());
        assert!(ObserverFrame::new(f64::NAN, 0.0, instant()).is_err());
        assert!(ObserverFrame::new(0.0, 0.0, instant())
            .unwrap()
            .with_elevation(f64::INFINITY)
            .is_err());
    }

    #[test]
    fn body_fixed_position_test() {
        // longitude, latitude and height of Pan-STARRS 1, Haleakala (longitude wrapped to [-180, 180])
        let site = ObserverFrame::new(20.707233557, 203.74409 - 360.0, instant())
            .unwrap()
            .with_elevation(3067.694)
            .unwrap();
        let fixed = site.body_fixed_position();
        assert_relative_eq!(
            fixed,
            Vector3::new(
                -0.00003653799439776371,
                -0.00001607260397528885,
                0.000014988110430544328
            ),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_geocentric_position_keeps_norm_and_latitude() {
        let site = ObserverFrame::new(34.05, -118.24, instant()).unwrap();
        let geo = site.geocentric_position_j2000();

        assert_relative_eq!(geo.norm(), site.body_fixed_position().norm(), epsilon = 1e-15);
        // precession over 24 years moves the pole by ~0.13°
        let (_, delta, _) = crate::ref_system::cartesian_to_radec(&geo);
        let (_, delta_fixed, _) = crate::ref_system::cartesian_to_radec(&site.body_fixed_position());
        assert!((delta - delta_fixed).abs().to_degrees() < 0.2);
    }

    #[test]
    fn test_site_meridian_points_at_local_sidereal_time() {
        let site = ObserverFrame::new(0.0, 45.0, instant()).unwrap();
        let true_of_date = j2000_to_true_of_date(site.instant.to_mjd_tt_days());
        let tod = true_of_date * site.geocentric_position_j2000();
        let (alpha, _, _) = crate::ref_system::cartesian_to_radec(&tod);
        assert_relative_eq!(alpha, site.local_sidereal_time(), epsilon = 1e-12);
    }
}
