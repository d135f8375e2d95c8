//! Segment directory (footer) of an SPK Chebyshev segment.
//!
//! The last four double words of a type 2/3 segment describe how its records are laid out:
//!
//! * `init`: start epoch of the first record (ET seconds past J2000),
//! * `intlen`: time span covered by each record (seconds),
//! * `rsize`: record size in **double words**,
//! * `n_records`: number of records.
//!
//! DAF addresses count 8-byte words starting at 1, so the footer of a segment ending at address
//! `final_addr` starts at byte `(final_addr - 4) * 8`.
use std::fmt;

use hifitime::{Duration, Epoch};
use nom::{number::complete::le_f64, sequence::tuple, IResult};

use crate::{constants::EphemerisTime, merai_errors::MeraiError};

/// Largest record size or record count accepted in a footer.
const MAX_COUNT_WORD: f64 = u32::MAX as f64;

#[derive(Debug, PartialEq, Clone)]
pub struct DirectoryData {
    pub init: EphemerisTime,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

fn parse_words(input: &[u8]) -> IResult<&[u8], (f64, f64, f64, f64)> {
    tuple((le_f64, le_f64, le_f64, le_f64))(input)
}

impl DirectoryData {
    /// Read the footer of the segment whose last address is `final_addr`.
    ///
    /// Arguments
    /// -----------------
    /// * `kernel`: the whole kernel file.
    /// * `final_addr`: last double word address of the segment (from its summary).
    pub fn parse(kernel: &[u8], final_addr: usize) -> Result<Self, MeraiError> {
        let start = final_addr
            .checked_sub(4)
            .and_then(|word| word.checked_mul(8))
            .ok_or_else(|| {
                MeraiError::NomParsingError(format!("invalid segment end address {final_addr}"))
            })?;
        let footer = start
            .checked_add(32)
            .and_then(|end| kernel.get(start..end))
            .ok_or_else(|| {
                MeraiError::NomParsingError(format!(
                    "segment directory at byte {start} is truncated"
                ))
            })?;

        let (_, (init, intlen, rsize, n_records)) =
            parse_words(footer).map_err(|e| MeraiError::NomParsingError(e.to_string()))?;

        let is_count = |w: f64| w.is_finite() && w.fract() == 0.0 && w <= MAX_COUNT_WORD;
        if !init.is_finite()
            || !intlen.is_finite()
            || intlen <= 0.0
            || !is_count(rsize)
            || !is_count(n_records)
            || rsize < 3.0
            || n_records < 1.0
        {
            return Err(MeraiError::NomParsingError(format!(
                "inconsistent segment directory (intlen={intlen}, rsize={rsize}, n={n_records})"
            )));
        }

        Ok(DirectoryData {
            init,
            intlen,
            rsize: rsize as usize,
            n_records: n_records as usize,
        })
    }

    /// Index of the record covering `et`, clamped to the available records.
    pub fn record_index(&self, et: EphemerisTime) -> usize {
        let idx = ((et - self.init) / self.intlen).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.n_records - 1)
        }
    }
}

impl fmt::Display for DirectoryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "init {} | record length {} | rsize {} | {} records",
            Epoch::from_et_seconds(self.init),
            Duration::from_seconds(self.intlen),
            self.rsize,
            self.n_records
        )
    }
}
