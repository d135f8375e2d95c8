//! Star id → constellation lookup.
//!
//! The map is built from any delimited file with a header row holding a `hip` column (Hipparcos
//! number, integer or float text) and a `con` column (IAU three-letter abbreviation), e.g. the
//! HYG database. Abbreviations are expanded to the constellation full name.
//!
//! Lookup misses are not errors: [`ConstellationMap::get`] answers `"Unknown"`.
use std::{collections::HashMap, fs::File, io::Read};

use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};

use super::hip_number;
use crate::{constants::UNKNOWN_CONSTELLATION, merai_errors::MeraiError};

/// IAU abbreviation (uppercase) → constellation name.
static CONSTELLATIONS: [(&str, &str); 88] = [
    ("AND", "Andromeda"),
    ("ANT", "Antlia"),
    ("APS", "Apus"),
    ("AQR", "Aquarius"),
    ("AQL", "Aquila"),
    ("ARA", "Ara"),
    ("ARI", "Aries"),
    ("AUR", "Auriga"),
    ("BOO", "Boötes"),
    ("CAE", "Caelum"),
    ("CAM", "Camelopardalis"),
    ("CNC", "Cancer"),
    ("CVN", "Canes Venatici"),
    ("CMA", "Canis Major"),
    ("CMI", "Canis Minor"),
    ("CAP", "Capricornus"),
    ("CAR", "Carina"),
    ("CAS", "Cassiopeia"),
    ("CEN", "Centaurus"),
    ("CEP", "Cepheus"),
    ("CET", "Cetus"),
    ("CHA", "Chamaeleon"),
    ("CIR", "Circinus"),
    ("COL", "Columba"),
    ("COM", "Coma Berenices"),
    ("CRA", "Corona Australis"),
    ("CRB", "Corona Borealis"),
    ("CRV", "Corvus"),
    ("CRT", "Crater"),
    ("CRU", "Crux"),
    ("CYG", "Cygnus"),
    ("DEL", "Delphinus"),
    ("DOR", "Dorado"),
    ("DRA", "Draco"),
    ("EQU", "Equuleus"),
    ("ERI", "Eridanus"),
    ("FOR", "Fornax"),
    ("GEM", "Gemini"),
    ("GRU", "Grus"),
    ("HER", "Hercules"),
    ("HOR", "Horologium"),
    ("HYA", "Hydra"),
    ("HYI", "Hydrus"),
    ("IND", "Indus"),
    ("LAC", "Lacerta"),
    ("LEO", "Leo"),
    ("LMI", "Leo Minor"),
    ("LEP", "Lepus"),
    ("LIB", "Libra"),
    ("LUP", "Lupus"),
    ("LYN", "Lynx"),
    ("LYR", "Lyra"),
    ("MEN", "Mensa"),
    ("MIC", "Microscopium"),
    ("MON", "Monoceros"),
    ("MUS", "Musca"),
    ("NOR", "Norma"),
    ("OCT", "Octans"),
    ("OPH", "Ophiuchus"),
    ("ORI", "Orion"),
    ("PAV", "Pavo"),
    ("PEG", "Pegasus"),
    ("PER", "Perseus"),
    ("PHE", "Phoenix"),
    ("PIC", "Pictor"),
    ("PSC", "Pisces"),
    ("PSA", "Piscis Austrinus"),
    ("PUP", "Puppis"),
    ("PYX", "Pyxis"),
    ("RET", "Reticulum"),
    ("SGE", "Sagitta"),
    ("SGR", "Sagittarius"),
    ("SCO", "Scorpius"),
    ("SCL", "Sculptor"),
    ("SCT", "Scutum"),
    ("SER", "Serpens"),
    ("SEX", "Sextans"),
    ("TAU", "Taurus"),
    ("TEL", "Telescopium"),
    ("TRI", "Triangulum"),
    ("TRA", "Triangulum Australe"),
    ("TUC", "Tucana"),
    ("UMA", "Ursa Major"),
    ("UMI", "Ursa Minor"),
    ("VEL", "Vela"),
    ("VIR", "Virgo"),
    ("VOL", "Volans"),
    ("VUL", "Vulpecula"),
];

/// Full name of an IAU constellation abbreviation (case-insensitive).
///
/// Unknown abbreviations are returned unchanged (uppercased).
pub fn constellation_full_name(abbreviation: &str) -> String {
    let key = abbreviation.trim().to_uppercase();
    CONSTELLATIONS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or(key)
}

/// Read-only map from Hipparcos number to constellation full name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstellationMap {
    names: HashMap<u32, String>,
}

impl ConstellationMap {
    /// Load the map from a file.
    ///
    /// A missing or unreadable file is [`MeraiError::DataUnavailable`]. A file without the `hip`
    /// or `con` header columns yields an empty map.
    pub fn load(path: &Utf8Path) -> Result<Self, MeraiError> {
        let file = File::open(path).map_err(|e| MeraiError::data_unavailable(path, e))?;
        let map = Self::from_reader(file).map_err(|e| MeraiError::data_unavailable(path, e))?;
        debug!("Loaded {} constellation entries from {path}", map.len());
        Ok(map)
    }

    /// Build the map from any delimited text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MeraiError> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let (Some(hip_idx), Some(con_idx)) = (column("hip"), column("con")) else {
            warn!("Constellation file has no 'hip'/'con' columns, constellation lookups will miss");
            return Ok(Self::default());
        };

        let mut names = HashMap::new();
        let mut skipped = 0usize;
        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let hip = record
                .get(hip_idx)
                .and_then(|h| h.parse::<f64>().ok())
                .and_then(hip_number);
            let con = record.get(con_idx).filter(|c| !c.is_empty());

            match (hip, con) {
                (Some(hip), Some(con)) => {
                    names.insert(hip, constellation_full_name(con));
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {skipped} constellation rows without usable 'hip' or 'con'");
        }
        Ok(ConstellationMap { names })
    }

    /// Constellation of a star, `"Unknown"` when the id is not in the map.
    pub fn get(&self, catalog_id: u32) -> &str {
        self.names
            .get(&catalog_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CONSTELLATION)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u32, String)> for ConstellationMap {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        ConstellationMap {
            names: iter.into_iter().collect(),
        }
    }
}
