//! # Topocentric visibility engine
//!
//! [`VisibilityEngine::compute_visible`] turns the loaded ephemeris and star catalog into the list
//! of objects above the local horizon for one [`ObserverFrame`].
//!
//! ## Apparent place
//!
//! ```text
//! body:  barycentric target(t - τ) - (Earth(t) + site(t))   light time τ, iterated
//! star:  unit vector from the catalog RA/Dec (J2000)
//!          └─> + v⊕ / c                                     first-order annual aberration
//!               └─> N · P                                   true equator and equinox of date
//!                    └─> hour angle = LAST - α  ─> altitude / azimuth
//! ```
//!
//! No atmospheric refraction is applied. Stars ignore parallax and proper motion.
//!
//! ## Output policy
//!
//! * bodies first, in the order of [`SOLAR_SYSTEM_BODIES`], then stars in catalog order,
//! * only stars strictly brighter than magnitude 2 are evaluated,
//! * altitude and azimuth are rounded to 0.01° and only objects with a rounded altitude strictly
//!   above 0 are kept,
//! * a body that cannot be computed is logged and skipped, it never aborts the query.
use std::{fmt, sync::Arc};

use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::{
    catalog::StarRecord,
    constants::{
        Degree, EphemerisTime, NOT_APPLICABLE, RADH, SECONDS_PER_DAY, UNKNOWN_CONSTELLATION,
        VLIGHT_AU,
    },
    earth_orientation::j2000_to_true_of_date,
    jpl_ephem::{BarycentricState, Ephemeris},
    merai_errors::MeraiError,
    observers::ObserverFrame,
    ref_system::radec_to_unit,
};
use bodies::{CelestialBody, SOLAR_SYSTEM_BODIES};
use horizon::{to_horizontal, HorizontalCoord};

pub mod bodies;
pub mod horizon;

/// Light-time iterations, enough to converge to well below a millisecond for the Moon and planets.
const LIGHT_TIME_ITERATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    Sun,
    Moon,
    Planet,
    Star,
    DeepSky,
    Other,
}

impl ObjectKind {
    /// Sun, Moon and planets.
    pub fn is_solar_system(&self) -> bool {
        matches!(self, ObjectKind::Sun | ObjectKind::Moon | ObjectKind::Planet)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Sun => "Sun",
            ObjectKind::Moon => "Moon",
            ObjectKind::Planet => "Planet",
            ObjectKind::Star => "Star",
            ObjectKind::DeepSky => "Deep Sky",
            ObjectKind::Other => "Other",
        };
        write!(f, "{s}")
    }
}

/// One object above the horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleObject {
    pub name: String,
    pub kind: ObjectKind,
    /// Degrees, rounded to 0.01.
    pub altitude: Degree,
    /// Degrees from North through East, rounded to 0.01.
    pub azimuth: Degree,
    /// Hipparcos number, stars only.
    pub catalog_id: Option<u32>,
    /// Constellation full name for stars, `"N/A"` for everything else.
    pub constellation: String,
}

impl VisibleObject {
    fn body(body: &CelestialBody, coord: HorizontalCoord) -> Self {
        VisibleObject {
            name: body.name.to_string(),
            kind: body.kind,
            altitude: coord.altitude,
            azimuth: coord.azimuth,
            catalog_id: None,
            constellation: NOT_APPLICABLE.to_string(),
        }
    }

    fn star(star: &StarRecord, coord: HorizontalCoord) -> Self {
        VisibleObject {
            name: star.display_name(),
            kind: ObjectKind::Star,
            altitude: coord.altitude,
            azimuth: coord.azimuth,
            catalog_id: Some(star.catalog_id),
            constellation: UNKNOWN_CONSTELLATION.to_string(),
        }
    }
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn rounded(coord: HorizontalCoord) -> HorizontalCoord {
    HorizontalCoord {
        altitude: round2(coord.altitude),
        // 359.996 must not become 360
        azimuth: round2(coord.azimuth) % 360.0,
    }
}

/// First-order aberration: unit direction shifted by the observer velocity over c.
fn aberrate(direction: &Vector3<f64>, velocity: Option<&Vector3<f64>>) -> Vector3<f64> {
    let unit = direction.normalize();
    match velocity {
        Some(v) => (unit + v / VLIGHT_AU).normalize(),
        None => unit,
    }
}

/// Everything shared by the objects of one query.
struct QueryGeometry {
    et: EphemerisTime,
    earth: Result<BarycentricState, MeraiError>,
    site: Vector3<f64>,
    true_of_date: Matrix3<f64>,
    local_sidereal_time: f64,
    latitude: f64,
}

impl QueryGeometry {
    fn new(ephemeris: &Ephemeris, observer: &ObserverFrame) -> Self {
        let instant = observer.instant;
        QueryGeometry {
            et: instant.to_et_seconds(),
            earth: ephemeris.earth_state(&instant),
            site: observer.geocentric_position_j2000(),
            true_of_date: j2000_to_true_of_date(instant.to_mjd_tt_days()),
            local_sidereal_time: observer.local_sidereal_time(),
            latitude: observer.latitude_rad(),
        }
    }

    fn horizontal(&self, apparent_j2000: &Vector3<f64>) -> HorizontalCoord {
        rounded(to_horizontal(
            &(self.true_of_date * apparent_j2000),
            self.local_sidereal_time,
            self.latitude,
        ))
    }

    fn body_direction(
        &self,
        ephemeris: &Ephemeris,
        body: &CelestialBody,
    ) -> Result<Vector3<f64>, MeraiError> {
        let earth = self
            .earth
            .as_ref()
            .map_err(|e| MeraiError::skipped(body.name, e))?;
        let observer = earth.position + self.site;

        let mut light_time = 0.0;
        let mut relative = Vector3::zeros();
        for _ in 0..LIGHT_TIME_ITERATIONS {
            let target = ephemeris
                .barycentric_state_et(body.key, self.et - light_time * SECONDS_PER_DAY)
                .map_err(|e| MeraiError::skipped(body.name, &e))?;
            relative = target.position - observer;
            light_time = relative.norm() / VLIGHT_AU;
        }

        if relative.norm() == 0.0 {
            return Err(MeraiError::ComputationSkipped {
                body: body.name.to_string(),
                reason: "target coincides with the observer".to_string(),
            });
        }

        Ok(aberrate(&relative, Some(&earth.velocity)))
    }

    fn star_direction(&self, star: &StarRecord) -> Vector3<f64> {
        let catalog = radec_to_unit(star.ra_hours * RADH, star.dec_degrees.to_radians());
        aberrate(&catalog, self.earth.as_ref().ok().map(|e| &e.velocity))
    }
}

/// Read-only engine over the process-wide ephemeris and star catalog.
///
/// Cloning is cheap and every query is independent: the engine can be shared across threads
/// without locking.
#[derive(Debug, Clone)]
pub struct VisibilityEngine {
    ephemeris: Arc<Ephemeris>,
    stars: Arc<Vec<StarRecord>>,
}

impl VisibilityEngine {
    pub fn new(ephemeris: Arc<Ephemeris>, stars: Arc<Vec<StarRecord>>) -> Self {
        VisibilityEngine { ephemeris, stars }
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    /// Every body and bright star above the horizon of `observer`.
    ///
    /// An empty result is valid: nothing is above the horizon (or everything failed, see logs).
    pub fn compute_visible(&self, observer: &ObserverFrame) -> Vec<VisibleObject> {
        let geometry = QueryGeometry::new(&self.ephemeris, observer);
        if let Err(e) = &geometry.earth {
            warn!("No Earth state for {observer}: {e}, stars are computed without aberration");
        }

        let mut visible: Vec<VisibleObject> = SOLAR_SYSTEM_BODIES
            .iter()
            .filter_map(|body| match geometry.body_direction(&self.ephemeris, body) {
                Ok(direction) => Some(VisibleObject::body(body, geometry.horizontal(&direction))),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .filter(|object| object.altitude > 0.0)
            .collect();
        let n_bodies = visible.len();

        visible.extend(
            self.stars
                .iter()
                .filter(|star| star.is_bright())
                .map(|star| {
                    VisibleObject::star(star, geometry.horizontal(&geometry.star_direction(star)))
                })
                .filter(|object| object.altitude > 0.0),
        );

        debug!(
            "{n_bodies} bodies and {} stars above the horizon for {observer}",
            visible.len() - n_bodies
        );
        visible
    }
}
