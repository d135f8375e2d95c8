//! Reader for HYG-style star catalogs (`hygdata_v41.csv` and compatible exports).
//!
//! Required columns: `hip`, `ra` (hours), `dec` (degrees), `mag`. Optional: `proper`.
//! Rows without a Hipparcos number (the Sun, Gliese-only or Yale-only entries) are skipped.
use std::{fs::File, io::Read};

use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;

use super::{hip_number, StarRecord};
use crate::merai_errors::MeraiError;

#[derive(Debug, Deserialize)]
struct HygRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    hip: Option<f64>,
    #[serde(default)]
    proper: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ra: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    dec: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    mag: Option<f64>,
}

impl HygRow {
    fn into_star(self) -> Option<StarRecord> {
        Some(StarRecord {
            catalog_id: self.hip.and_then(hip_number)?,
            ra_hours: self.ra?,
            dec_degrees: self.dec?,
            magnitude: self.mag?,
            proper_name: self.proper.filter(|name| !name.trim().is_empty()),
        })
    }
}

/// Parse a HYG catalog from any reader.
pub fn read_hyg<R: Read>(reader: R) -> Result<Vec<StarRecord>, MeraiError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = ["hip", "ra", "dec", "mag"]
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(MeraiError::MissingColumn(missing.to_string()));
    }

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for row in rdr.deserialize::<HygRow>() {
        let star = match row {
            Ok(row) => row.into_star(),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => None,
        };
        match star {
            Some(star) => stars.push(star),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} HYG rows without a usable Hipparcos number or position");
    }
    Ok(stars)
}

pub fn read_hyg_file(path: &Utf8Path) -> Result<Vec<StarRecord>, MeraiError> {
    read_hyg(File::open(path)?)
}
