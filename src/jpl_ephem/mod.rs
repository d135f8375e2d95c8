//! # Planetary ephemeris
//!
//! [`Ephemeris`] is the read-only handle on a JPL DE kernel. It is loaded once per process and
//! shared (behind an `Arc`) by every visibility query.
//!
//! All states returned here are **barycentric**, expressed in the mean equator and equinox of
//! J2000 (ICRF), in **AU** and **AU/day**.
use camino::Utf8Path;
use hifitime::Epoch;
use log::debug;
use nalgebra::Vector3;

use crate::{
    constants::{EphemerisTime, AU, SECONDS_PER_DAY},
    merai_errors::MeraiError,
};
use download_jpl_file::EphemSource;
use naif::{naif_data::NaifData, naif_ids::NaifIds};

pub mod download_jpl_file;
pub mod naif;

/// Barycentric position (AU) and velocity (AU/day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

#[derive(Debug, Clone)]
pub struct Ephemeris {
    naif: NaifData,
}

impl Ephemeris {
    /// Resolve `source` and decode the kernel.
    ///
    /// Every failure (missing file, unreadable or malformed kernel) is reported as
    /// [`MeraiError::DataUnavailable`].
    pub fn load(source: &EphemSource) -> Result<Self, MeraiError> {
        let path = source.resolve()?;
        Self::from_path(&path)
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, MeraiError> {
        let naif = NaifData::read_naif_file(path)
            .map_err(|e| MeraiError::data_unavailable(path, e))?;
        if let Some(header) = &naif.header {
            debug!("Ephemeris {header} loaded from {path}");
        }
        Ok(Ephemeris { naif })
    }

    pub fn from_naif(naif: NaifData) -> Self {
        Ephemeris { naif }
    }

    pub fn naif(&self) -> &NaifData {
        &self.naif
    }

    /// DE version announced in the kernel comments, if any.
    pub fn version(&self) -> Option<&str> {
        self.naif.header.as_ref().map(|h| h.version.as_str())
    }

    pub fn has_body(&self, target: NaifIds) -> bool {
        self.naif.has_target(target.to_id())
    }

    /// Barycentric state of `target` at ephemeris time `et`.
    pub fn barycentric_state_et(
        &self,
        target: NaifIds,
        et: EphemerisTime,
    ) -> Result<BarycentricState, MeraiError> {
        let (position, velocity) = self.naif.barycentric_state(target.to_id(), et)?;
        Ok(BarycentricState {
            position: position / AU,
            velocity: velocity * SECONDS_PER_DAY / AU,
        })
    }

    /// Barycentric state of `target` at `epoch`.
    pub fn barycentric_state(
        &self,
        target: NaifIds,
        epoch: &Epoch,
    ) -> Result<BarycentricState, MeraiError> {
        self.barycentric_state_et(target, epoch.to_et_seconds())
    }

    /// Barycentric state of the geocenter.
    pub fn earth_state(&self, epoch: &Epoch) -> Result<BarycentricState, MeraiError> {
        self.barycentric_state(NaifIds::Earth, epoch)
    }
}
