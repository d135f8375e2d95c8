//! In-memory SPK kernel: every Chebyshev segment decoded and indexed by target body.
//!
//! Loading steps
//! -------------
//! 1. file record ([`DAFHeader`]), validated as a little-endian SPK kernel,
//! 2. comment area (records `2 .. fward - 1`), scanned for an optional [`JPLEphemHeader`],
//! 3. linked list of summary records starting at `fward`, one [`Summary`] per segment,
//! 4. for every segment, its [`DirectoryData`] footer and its [`EphemerisRecord`]s.
//!
//! Lookups chain segments: a segment gives the state of `target` relative to `center`, so the
//! barycentric state of a body is the sum of the segments met while walking from the body to the
//! solar-system barycenter (e.g. Moon → Earth-Moon barycenter → SSB).
use std::{collections::HashMap, fmt};

use camino::Utf8Path;
use log::debug;
use nalgebra::Vector3;

use super::{
    daf_header::{DAFHeader, DAF_RECORD_LEN},
    directory::DirectoryData,
    ephemeris_record::EphemerisRecord,
    jpl_ephem_header::JPLEphemHeader,
    naif_ids::NaifIds,
    spk_type::SpkDataType,
    summary_record::{Summary, SummaryControl},
};
use crate::{constants::EphemerisTime, merai_errors::MeraiError};

/// Longest center chain followed before giving up (guards against cyclic kernels).
const MAX_CHAIN_DEPTH: usize = 8;

#[derive(Debug, Clone)]
pub struct NaifSegment {
    pub summary: Summary,
    pub directory: DirectoryData,
    pub records: Vec<EphemerisRecord>,
}

impl NaifSegment {
    /// Position (km) and velocity (km/s) of the target relative to the segment center.
    pub fn state(&self, et: EphemerisTime) -> (Vector3<f64>, Vector3<f64>) {
        self.records[self.directory.record_index(et)].interpolate(et)
    }
}

#[derive(Debug, Clone)]
pub struct NaifData {
    pub daf_header: DAFHeader,
    pub header: Option<JPLEphemHeader>,
    segments: HashMap<i32, Vec<NaifSegment>>,
}

fn nom_error<E: fmt::Display>(e: E) -> MeraiError {
    MeraiError::NomParsingError(e.to_string())
}

fn record_bytes(kernel: &[u8], record: usize) -> Result<&[u8], MeraiError> {
    let start = record.saturating_sub(1) * DAF_RECORD_LEN;
    kernel
        .get(start..start + DAF_RECORD_LEN)
        .ok_or_else(|| MeraiError::NomParsingError(format!("DAF record {record} is truncated")))
}

impl NaifData {
    /// Read and decode a kernel from disk.
    pub fn read_naif_file(path: &Utf8Path) -> Result<Self, MeraiError> {
        let kernel = std::fs::read(path)?;
        let data = Self::from_bytes(&kernel)?;
        debug!(
            "Loaded SPK kernel {path} ({} bytes, {} segments)",
            kernel.len(),
            data.segment_count()
        );
        Ok(data)
    }

    /// Decode a kernel already loaded in memory.
    pub fn from_bytes(kernel: &[u8]) -> Result<Self, MeraiError> {
        let (_, daf_header) = DAFHeader::parse(record_bytes(kernel, 1)?).map_err(nom_error)?;
        daf_header.validate()?;

        let fward = daf_header.fward as usize;
        let comment_end = ((fward - 1) * DAF_RECORD_LEN).min(kernel.len());
        let comment = String::from_utf8_lossy(&kernel[DAF_RECORD_LEN.min(comment_end)..comment_end])
            .replace(|c: char| c == '\0' || c == '\u{4}', "\n");
        let header = JPLEphemHeader::parse(&comment).ok().map(|(_, h)| h);

        let summary_len = daf_header.summary_size() * 8;
        let max_records = kernel.len() / DAF_RECORD_LEN;
        let mut segments: HashMap<i32, Vec<NaifSegment>> = HashMap::new();

        let mut next = fward;
        let mut visited = 0;
        while next != 0 {
            visited += 1;
            if visited > max_records {
                return Err(MeraiError::NomParsingError(
                    "cyclic summary record list".to_string(),
                ));
            }

            let record = record_bytes(kernel, next)?;
            let (mut input, control) = SummaryControl::parse(record).map_err(nom_error)?;

            for _ in 0..control.nsum {
                let (summary_bytes, rest) = input.split_at(summary_len.min(input.len()));
                input = rest;
                let (_, summary) = Summary::parse(summary_bytes).map_err(nom_error)?;

                let segment = Self::read_segment(kernel, summary)?;
                segments
                    .entry(segment.summary.target)
                    .or_default()
                    .push(segment);
            }

            next = control.next;
        }

        if segments.is_empty() {
            return Err(MeraiError::NomParsingError(
                "kernel holds no segment".to_string(),
            ));
        }

        Ok(NaifData {
            daf_header,
            header,
            segments,
        })
    }

    fn read_segment(kernel: &[u8], summary: Summary) -> Result<NaifSegment, MeraiError> {
        let data_type = SpkDataType::try_from(summary.data_type)?;
        let address = |addr: i32| {
            usize::try_from(addr).map_err(|_| {
                MeraiError::NomParsingError(format!(
                    "negative address {addr} in the summary of NAIF id {}",
                    summary.target
                ))
            })
        };
        let directory = DirectoryData::parse(kernel, address(summary.final_addr)?)?;
        let records = EphemerisRecord::parse_segment(
            kernel,
            address(summary.initial_addr)?,
            &directory,
            data_type,
        )?;
        if records.is_empty() {
            return Err(MeraiError::NomParsingError(format!(
                "segment of NAIF id {} holds no record",
                summary.target
            )));
        }

        Ok(NaifSegment {
            summary,
            directory,
            records,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    /// NAIF codes of every body that has at least one segment, sorted.
    pub fn targets(&self) -> Vec<i32> {
        let mut targets: Vec<i32> = self.segments.keys().copied().collect();
        targets.sort_unstable();
        targets
    }

    pub fn has_target(&self, target: i32) -> bool {
        self.segments.contains_key(&target)
    }

    /// Segment giving `target` at `et`.
    pub fn segment(&self, target: i32, et: EphemerisTime) -> Result<&NaifSegment, MeraiError> {
        let candidates = self
            .segments
            .get(&target)
            .ok_or(MeraiError::EphemerisKeyMissing(target))?;

        candidates
            .iter()
            .find(|segment| segment.summary.covers(et))
            .ok_or(MeraiError::EpochOutOfRange { target, et })
    }

    /// State of `target` relative to the solar-system barycenter.
    ///
    /// Return
    /// ----------
    /// * `(position, velocity)` in km and km/s, mean J2000 equatorial frame.
    pub fn barycentric_state(
        &self,
        target: i32,
        et: EphemerisTime,
    ) -> Result<(Vector3<f64>, Vector3<f64>), MeraiError> {
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        let mut body = target;

        for _ in 0..MAX_CHAIN_DEPTH {
            if body == NaifIds::SSB.to_id() {
                return Ok((position, velocity));
            }
            let segment = self.segment(body, et)?;
            let (pos, vel) = segment.state(et);
            position += pos;
            velocity += vel;
            body = segment.summary.center;
        }

        Err(MeraiError::NomParsingError(format!(
            "center chain of NAIF id {target} does not reach the barycenter"
        )))
    }
}

impl fmt::Display for NaifData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.daf_header)?;
        if let Some(header) = &self.header {
            writeln!(f, "Ephemeris: {header}")?;
        }
        for target in self.targets() {
            for segment in &self.segments[&target] {
                writeln!(
                    f,
                    "{} wrt {}: {}",
                    NaifIds::from_id(target),
                    NaifIds::from_id(segment.summary.center),
                    segment.directory
                )?;
            }
        }
        Ok(())
    }
}
