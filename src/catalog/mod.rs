//! # Star catalog and constellation lookup
//!
//! Loaders for the static data sets used by the visibility engine and the enrichment stage:
//!
//! * [`hipparcos`]: the ESA Hipparcos main catalog (`hip_main.dat`),
//! * [`hyg`]: HYG-style CSV catalogs (`hygdata_v41.csv`), which also carry proper names,
//! * [`constellation`]: star id → constellation full name.
//!
//! Loading is done once at startup. Any missing or unusable file is a
//! [`MeraiError::DataUnavailable`], the rest of the system cannot work without these data.
use camino::Utf8Path;
use log::debug;

use crate::{constants::MAGNITUDE_CUTOFF, merai_errors::MeraiError};

pub mod constellation;
pub mod hipparcos;
pub mod hyg;

/// One star of the reference catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    /// Hipparcos identifier.
    pub catalog_id: u32,
    /// Right ascension, ICRS, hours.
    pub ra_hours: f64,
    /// Declination, ICRS, degrees.
    pub dec_degrees: f64,
    /// Apparent visual magnitude.
    pub magnitude: f64,
    pub proper_name: Option<String>,
}

impl StarRecord {
    /// Whether the star passes the brightness cutoff (strictly brighter than magnitude 2).
    pub fn is_bright(&self) -> bool {
        self.magnitude < MAGNITUDE_CUTOFF
    }

    /// Proper name if present and non-blank, otherwise `HIP <id>`.
    pub fn display_name(&self) -> String {
        match self.proper_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => hip_designation(self.catalog_id),
        }
    }
}

/// Synthetic `HIP <id>` designation.
pub fn hip_designation(catalog_id: u32) -> String {
    format!("HIP {catalog_id}")
}

/// Hipparcos number written as a float (`"32349"`, `"32349.0"`).
///
/// `None` unless the value is a whole number in `1 ..= u32::MAX`.
pub fn hip_number(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (1.0..=u32::MAX as f64).contains(&value)).then_some(value as u32)
}

/// Load a star catalog, picking the format from the file extension (`.csv` for HYG, anything else
/// for the Hipparcos main catalog).
///
/// Return
/// ----------
/// * The stars in file order, or [`MeraiError::DataUnavailable`] if the file is missing,
///   unreadable or yields no usable row.
pub fn load_star_catalog(path: &Utf8Path) -> Result<Vec<StarRecord>, MeraiError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let stars = if is_csv {
        hyg::read_hyg_file(path)
    } else {
        hipparcos::read_hipparcos_file(path)
    }
    .map_err(|e| MeraiError::data_unavailable(path, e))?;

    if stars.is_empty() {
        return Err(MeraiError::data_unavailable(path, "no usable star record"));
    }

    debug!(
        "Loaded {} stars from {path} ({} brighter than magnitude {MAGNITUDE_CUTOFF})",
        stars.len(),
        stars.iter().filter(|s| s.is_bright()).count()
    );
    Ok(stars)
}
