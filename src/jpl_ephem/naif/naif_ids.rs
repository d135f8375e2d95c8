//! NAIF integer codes of the bodies found in DE-series planetary kernels.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetaryBary {
    Mercury = 1,
    Venus = 2,
    EarthMoon = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
}

impl PlanetaryBary {
    pub const ALL: [PlanetaryBary; 9] = [
        PlanetaryBary::Mercury,
        PlanetaryBary::Venus,
        PlanetaryBary::EarthMoon,
        PlanetaryBary::Mars,
        PlanetaryBary::Jupiter,
        PlanetaryBary::Saturn,
        PlanetaryBary::Uranus,
        PlanetaryBary::Neptune,
        PlanetaryBary::Pluto,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        PlanetaryBary::ALL.into_iter().find(|p| *p as i32 == id)
    }
}

impl fmt::Display for PlanetaryBary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanetaryBary::Mercury => "Mercury",
            PlanetaryBary::Venus => "Venus",
            PlanetaryBary::EarthMoon => "Earth-Moon",
            PlanetaryBary::Mars => "Mars",
            PlanetaryBary::Jupiter => "Jupiter",
            PlanetaryBary::Saturn => "Saturn",
            PlanetaryBary::Uranus => "Uranus",
            PlanetaryBary::Neptune => "Neptune",
            PlanetaryBary::Pluto => "Pluto",
        };
        write!(f, "{s} barycenter")
    }
}

/// A NAIF body code.
///
/// Codes that are not listed (planet mass centers such as 199 or 499, satellites, asteroids) are
/// kept as [`NaifIds::Other`] so that a kernel carrying extra segments still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaifIds {
    SSB,
    Sun,
    PB(PlanetaryBary),
    Moon,
    Earth,
    Other(i32),
}

impl NaifIds {
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => NaifIds::SSB,
            10 => NaifIds::Sun,
            301 => NaifIds::Moon,
            399 => NaifIds::Earth,
            _ => PlanetaryBary::from_id(id)
                .map(NaifIds::PB)
                .unwrap_or(NaifIds::Other(id)),
        }
    }

    pub fn to_id(&self) -> i32 {
        match self {
            NaifIds::SSB => 0,
            NaifIds::Sun => 10,
            NaifIds::PB(bary) => *bary as i32,
            NaifIds::Moon => 301,
            NaifIds::Earth => 399,
            NaifIds::Other(id) => *id,
        }
    }
}

impl From<i32> for NaifIds {
    fn from(id: i32) -> Self {
        NaifIds::from_id(id)
    }
}

impl From<NaifIds> for i32 {
    fn from(naif_id: NaifIds) -> Self {
        naif_id.to_id()
    }
}

impl fmt::Display for NaifIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaifIds::SSB => write!(f, "Solar System Barycenter"),
            NaifIds::Sun => write!(f, "Sun"),
            NaifIds::PB(bary) => write!(f, "{bary}"),
            NaifIds::Moon => write!(f, "Moon"),
            NaifIds::Earth => write!(f, "Earth"),
            NaifIds::Other(id) => write!(f, "NAIF {id}"),
        }
    }
}
