//! Closed table of the solar-system bodies evaluated by the engine.
//!
//! Planets are addressed through their system barycenters, the only planetary keys present in
//! every DE kernel. The Earth is deliberately absent: it is the observing platform.
use crate::jpl_ephem::naif::naif_ids::{NaifIds, PlanetaryBary};

use super::ObjectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelestialBody {
    pub key: NaifIds,
    pub name: &'static str,
    pub kind: ObjectKind,
}

const fn planet(bary: PlanetaryBary, name: &'static str) -> CelestialBody {
    CelestialBody {
        key: NaifIds::PB(bary),
        name,
        kind: ObjectKind::Planet,
    }
}

/// Evaluation order of the bodies: Sun, Moon, then planets outward.
pub static SOLAR_SYSTEM_BODIES: [CelestialBody; 10] = [
    CelestialBody {
        key: NaifIds::Sun,
        name: "Sun",
        kind: ObjectKind::Sun,
    },
    CelestialBody {
        key: NaifIds::Moon,
        name: "Moon",
        kind: ObjectKind::Moon,
    },
    planet(PlanetaryBary::Mercury, "Mercury"),
    planet(PlanetaryBary::Venus, "Venus"),
    planet(PlanetaryBary::Mars, "Mars"),
    planet(PlanetaryBary::Jupiter, "Jupiter"),
    planet(PlanetaryBary::Saturn, "Saturn"),
    planet(PlanetaryBary::Uranus, "Uranus"),
    planet(PlanetaryBary::Neptune, "Neptune"),
    planet(PlanetaryBary::Pluto, "Pluto"),
];
