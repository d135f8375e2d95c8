//! # Time utilities
//!
//! Sidereal time and the conversion of user supplied date/time strings into
//! [`hifitime::Epoch`] instants.
//!
//! All instants handed to the visibility engine are UTC. The engine derives from them:
//! * ephemeris time (seconds past J2000, TDB ≈ ET) for ephemeris lookups,
//! * MJD in TT for precession and nutation,
//! * MJD in UTC, used in place of UT1, for sidereal time.
//!
//! Using UTC for UT1 shifts sidereal time by at most 0.9 s, i.e. less than 0.004° on the sky,
//! well below the 0.01° display precision of the output.
use hifitime::Epoch;

use crate::{
    constants::{Radian, DPI, MJD, SECONDS_PER_DAY, T2000},
    earth_orientation::equequ,
    merai_errors::MeraiError,
};

/// Greenwich Mean Sidereal Time (IAU 1982 model).
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date in UT1 (UTC is an acceptable proxy here).
///
/// Return
/// ----------
/// * GMST in radians, normalized to `[0, 2π)`.
pub fn gmst(tjm: MJD) -> Radian {
    // GMST at 0h UT1, seconds
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // sidereal / solar day ratio
    const RAP: f64 = 1.00273790934;

    let day = tjm.floor();
    let t = (day - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;
    let gmst = gmst0 + tjm.fract() * DPI * RAP;

    gmst.rem_euclid(DPI)
}

/// Greenwich Apparent Sidereal Time: GMST plus the equation of the equinoxes.
///
/// Arguments
/// -----------------
/// * `instant`: the UTC instant of the observation.
///
/// Return
/// ----------
/// * GAST in radians, normalized to `[0, 2π)`.
pub fn gast(instant: &Epoch) -> Radian {
    let sidereal = gmst(instant.to_mjd_utc_days()) + equequ(instant.to_mjd_tt_days());
    sidereal.rem_euclid(DPI)
}

/// Local Apparent Sidereal Time for an east-positive longitude in radians.
pub fn last(instant: &Epoch, longitude: Radian) -> Radian {
    (gast(instant) + longitude).rem_euclid(DPI)
}

/// Parse an ISO-like UTC timestamp (`YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`, ...).
///
/// A trailing `Z` or `UTC` suffix is accepted; any other time scale suffix is rejected since every
/// instant in the library is UTC.
pub fn parse_utc_instant(text: &str) -> Result<Epoch, MeraiError> {
    let trimmed = text.trim().trim_end_matches('Z').trim_end_matches("UTC").trim();
    let (date, time) = match trimmed.split_once(|c: char| c == 'T' || c == ' ') {
        Some((date, time)) => (date, time),
        None => (trimmed, "00:00:00"),
    };
    utc_instant_from_parts(date, time)
}

/// Build a UTC instant from separate date (`YYYY-MM-DD`) and time (`HH:MM[:SS]`) strings.
pub fn utc_instant_from_parts(date: &str, time: &str) -> Result<Epoch, MeraiError> {
    let time = time.trim();
    let time = if time.matches(':').count() == 1 {
        format!("{time}:00")
    } else {
        time.to_string()
    };
    let text = format!("{}T{} UTC", date.trim(), time);

    Epoch::from_gregorian_str(&text).map_err(|e| MeraiError::InvalidEpoch(format!("{text}: {e}")))
}

/// Current UTC instant from the system clock.
pub fn now_utc() -> Result<Epoch, MeraiError> {
    Epoch::now().map_err(|e| MeraiError::InvalidEpoch(e.to_string()))
}
