//! # Constants and type definitions for Merai
//!
//! This module centralizes the **physical constants**, **conversion factors**, **common type
//! aliases** and the **display policy constants** used throughout the `merai` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - Visibility and chart policy (brightness cutoff, label threshold, zoom ladder)

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π
pub const DPI: f64 = 2. * std::f64::consts::PI;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical unit in kilometers (IAU 2012).
pub const AU: f64 = 149_597_870.7;

/// MJD of the J2000 epoch (2000-01-01 12:00 TT).
pub const T2000: f64 = 51544.5;

/// Degrees to radians.
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds to radians.
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours to radians.
pub const RADH: f64 = DPI / 24.0;

/// WGS84 equatorial radius, meters.
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 polar radius, meters.
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth equatorial radius in AU.
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Speed of light, km/s.
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light, AU/day.
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

pub type Degree = f64;
pub type ArcSec = f64;
pub type Radian = f64;
pub type Kilometer = f64;
pub type MJD = f64;

/// Seconds past J2000 in the ephemeris time scale (TDB ≈ ET).
pub type EphemerisTime = f64;

// -------------------------------------------------------------------------------------------------
// Visibility and chart policy
// -------------------------------------------------------------------------------------------------

/// Only stars strictly brighter than this apparent magnitude are evaluated.
pub const MAGNITUDE_CUTOFF: f64 = 2.0;

/// Stars are labelled on the chart only above this altitude (degrees).
pub const LABEL_MIN_ALTITUDE: Degree = 10.0;

/// Radial center of the zoom window (degrees of zenith distance).
pub const ZOOM_RADIAL_CENTER: Degree = 45.0;

/// Discrete zoom factors, from widest to tightest.
pub const ZOOM_LADDER: [f64; 5] = [0.7, 1.0, 1.3, 1.6, 2.0];

/// Ladder index used when an unknown zoom factor is requested.
pub const DEFAULT_ZOOM_INDEX: usize = 1;

/// Sentinel constellation for stars missing from the constellation map.
pub const UNKNOWN_CONSTELLATION: &str = "Unknown";

/// Sentinel constellation for every non-star object.
pub const NOT_APPLICABLE: &str = "N/A";

/// Timeout applied to every external HTTP call, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 5;
