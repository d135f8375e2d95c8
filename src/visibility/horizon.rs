//! Equatorial of date → horizontal coordinates.
use nalgebra::Vector3;

use crate::{
    constants::{Degree, Radian, DPI},
    ref_system::cartesian_to_radec,
};

/// Altitude above the horizon and azimuth from North through East, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoord {
    pub altitude: Degree,
    pub azimuth: Degree,
}

/// Horizontal coordinates of an apparent direction.
///
/// Arguments
/// -----------------
/// * `direction`: apparent direction, true equator and equinox of date (any norm).
/// * `local_sidereal_time`: local apparent sidereal time, radians.
/// * `latitude`: geodetic latitude of the site, radians.
pub fn to_horizontal(
    direction: &Vector3<f64>,
    local_sidereal_time: Radian,
    latitude: Radian,
) -> HorizontalCoord {
    let (alpha, delta, _) = cartesian_to_radec(direction);
    let hour_angle = local_sidereal_time - alpha;

    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_dec, cos_dec) = delta.sin_cos();
    let (sin_ha, cos_ha) = hour_angle.sin_cos();

    let sin_alt = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha).clamp(-1.0, 1.0);
    let azimuth = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * cos_ha * sin_lat);

    HorizontalCoord {
        altitude: sin_alt.asin().to_degrees(),
        azimuth: azimuth.rem_euclid(DPI).to_degrees(),
    }
}

/// Unit vector, true equator of date, pointing at the given horizontal coordinates.
pub fn from_horizontal(
    coord: &HorizontalCoord,
    local_sidereal_time: Radian,
    latitude: Radian,
) -> Vector3<f64> {
    let (sin_alt, cos_alt) = coord.altitude.to_radians().sin_cos();
    let (sin_az, cos_az) = coord.azimuth.to_radians().sin_cos();
    let (sin_lat, cos_lat) = latitude.sin_cos();

    let sin_dec = sin_lat * sin_alt + cos_lat * cos_alt * cos_az;
    let cos_dec_cos_ha = cos_lat * sin_alt - sin_lat * cos_alt * cos_az;
    let cos_dec_sin_ha = -cos_alt * sin_az;

    let hour_angle = cos_dec_sin_ha.atan2(cos_dec_cos_ha);
    let delta = sin_dec.clamp(-1.0, 1.0).asin();
    let alpha = local_sidereal_time - hour_angle;

    crate::ref_system::radec_to_unit(alpha, delta)
}

#[cfg(test)]
mod test_horizon {
    use super::*;
    use crate::ref_system::radec_to_unit;
    use approx::assert_relative_eq;

    #[test]
    fn test_zenith_and_pole() {
        let lat = 34.05f64.to_radians();
        let lst = 1.3;

        let zenith = to_horizontal(&radec_to_unit(lst, lat), lst, lat);
        assert_relative_eq!(zenith.altitude, 90.0, epsilon = 1e-9);

        let pole = to_horizontal(&Vector3::z(), lst, lat);
        assert_relative_eq!(pole.altitude, 34.05, epsilon = 1e-9);
        assert_relative_eq!(pole.azimuth.min(360.0 - pole.azimuth), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_object_is_east() {
        // on the equator, a body on the celestial equator six hours before transit rises due east
        let lst = 0.0;
        let coord = to_horizontal(&radec_to_unit(std::f64::consts::FRAC_PI_2, 0.0), lst, 0.0);
        assert_relative_eq!(coord.altitude, 0.0, epsilon = 1e-9);
        assert_relative_eq!(coord.azimuth, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse() {
        let lat = (-33.9f64).to_radians();
        let lst = 4.2;
        for (alt, az) in [(30.0, 90.0), (-5.0, 10.0), (75.5, 250.25), (1.0, 359.0)] {
            let coord = HorizontalCoord {
                altitude: alt,
                azimuth: az,
            };
            let back = to_horizontal(&from_horizontal(&coord, lst, lat), lst, lat);
            assert_relative_eq!(back.altitude, alt, epsilon = 1e-9);
            assert_relative_eq!(back.azimuth, az, epsilon = 1e-9);
        }
    }
}
