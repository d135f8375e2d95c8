//! Chebyshev ephemeris records and their interpolation.
//!
//! Each record of an SPK type 2/3 segment holds, as little-endian doubles:
//! 1. `mid`: midpoint of the covered interval (ET seconds past J2000),
//! 2. `radius`: half length of the interval (seconds),
//! 3. `ncoeff` coefficients for X, then Y, then Z (km),
//! 4. for type 3 only, `ncoeff` coefficients for each velocity component (ignored here, the
//!    velocity is obtained by differentiating the position polynomial).
//!
//! The normalized time is `t = (et - mid) / radius`, clamped to `[-1, 1]`.
use nalgebra::Vector3;
use nom::{multi::count, number::complete::le_f64, sequence::tuple, IResult};

use super::{directory::DirectoryData, spk_type::SpkDataType};
use crate::{constants::EphemerisTime, merai_errors::MeraiError};

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    pub mid: EphemerisTime,
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl EphemerisRecord {
    fn parse_record(input: &[u8], ncoeff: usize) -> IResult<&[u8], Self> {
        let (input, (mid, radius)) = tuple((le_f64, le_f64))(input)?;
        let (input, x) = count(le_f64, ncoeff)(input)?;
        let (input, y) = count(le_f64, ncoeff)(input)?;
        let (input, z) = count(le_f64, ncoeff)(input)?;
        Ok((
            input,
            EphemerisRecord {
                mid,
                radius,
                x,
                y,
                z,
            },
        ))
    }

    /// Decode every record of a segment.
    ///
    /// Arguments
    /// -----------------
    /// * `kernel`: the whole kernel file.
    /// * `initial_addr`: first double word address of the segment (1-based).
    /// * `directory`: the segment footer.
    /// * `data_type`: SPK type of the segment, which fixes the number of coefficient sets.
    pub fn parse_segment(
        kernel: &[u8],
        initial_addr: usize,
        directory: &DirectoryData,
        data_type: SpkDataType,
    ) -> Result<Vec<Self>, MeraiError> {
        let ncoeff = (directory.rsize - 2) / data_type.components();
        if ncoeff == 0 {
            return Err(MeraiError::NomParsingError(format!(
                "record size {} too small for {data_type}",
                directory.rsize
            )));
        }

        let overflow = || {
            MeraiError::NomParsingError(format!(
                "segment at address {initial_addr} with {} records of {} words overflows",
                directory.n_records, directory.rsize
            ))
        };
        let record_len = directory.rsize.checked_mul(8).ok_or_else(overflow)?;
        let start = initial_addr
            .saturating_sub(1)
            .checked_mul(8)
            .ok_or_else(overflow)?;
        let end = directory
            .n_records
            .checked_mul(record_len)
            .and_then(|len| start.checked_add(len))
            .ok_or_else(overflow)?;
        let segment = kernel.get(start..end).ok_or_else(|| {
            MeraiError::NomParsingError(format!("segment bytes {start}..{end} are truncated"))
        })?;

        segment
            .chunks_exact(record_len)
            .map(|chunk| {
                Self::parse_record(chunk, ncoeff)
                    .map(|(_, record)| record)
                    .map_err(|e| MeraiError::NomParsingError(e.to_string()))
            })
            .collect()
    }

    /// Evaluate the record at `ephem_time`.
    ///
    /// Return
    /// ----------
    /// * `(position, velocity)` in km and km/s.
    pub fn interpolate(&self, ephem_time: EphemerisTime) -> (Vector3<f64>, Vector3<f64>) {
        let t = ((ephem_time - self.mid) / self.radius).clamp(-1.0, 1.0);
        let n = self.x.len();

        // T_k(t) and dT_k/dt
        let mut poly = vec![0.0; n];
        let mut deriv = vec![0.0; n];
        poly[0] = 1.0;
        if n > 1 {
            poly[1] = t;
            deriv[1] = 1.0;
        }
        for k in 2..n {
            poly[k] = 2.0 * t * poly[k - 1] - poly[k - 2];
            deriv[k] = 2.0 * poly[k - 1] + 2.0 * t * deriv[k - 1] - deriv[k - 2];
        }

        let eval = |coeffs: &[f64], basis: &[f64]| -> f64 {
            coeffs.iter().zip(basis).map(|(c, b)| c * b).sum()
        };

        let position = Vector3::new(
            eval(&self.x, &poly),
            eval(&self.y, &poly),
            eval(&self.z, &poly),
        );
        let velocity = Vector3::new(
            eval(&self.x, &deriv),
            eval(&self.y, &deriv),
            eval(&self.z, &deriv),
        ) / self.radius;

        (position, velocity)
    }
}

#[cfg(test)]
mod test_ephemeris_record {
    use super::*;
    use approx::assert_relative_eq;

    fn record() -> EphemerisRecord {
        EphemerisRecord {
            mid: 1000.0,
            radius: 500.0,
            x: vec![10.0, 2.0, 0.5],
            y: vec![-3.0, 0.0, 0.0],
            z: vec![1.0, 1.0, 0.0],
        }
    }

    #[test]
    fn test_interpolate_at_midpoint() {
        // t = 0: T0 = 1, T1 = 0, T2 = -1
        let (pos, vel) = record().interpolate(1000.0);
        assert_relative_eq!(pos, Vector3::new(9.5, -3.0, 1.0), epsilon = 1e-12);
        // dT1/dt = 1, dT2/dt = 4t = 0
        assert_relative_eq!(vel, Vector3::new(2.0, 0.0, 1.0) / 500.0, epsilon = 1e-15);
    }

    #[test]
    fn test_interpolate_at_bounds() {
        // t = 1: every T_k = 1, dT2/dt = 4
        let (pos, vel) = record().interpolate(1500.0);
        assert_relative_eq!(pos, Vector3::new(12.5, -3.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(vel.x, (2.0 + 0.5 * 4.0) / 500.0, epsilon = 1e-15);

        // outside the record the time is clamped
        let (clamped, _) = record().interpolate(9000.0);
        assert_relative_eq!(clamped, pos, epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let rec = EphemerisRecord {
            mid: 0.0,
            radius: 86400.0,
            x: vec![1.0e8, 3.0e5, -2.0e3, 40.0, 1.5],
            y: vec![5.0e7, -1.0e5, 7.0e2, -3.0, 0.2],
            z: vec![2.0e7, 4.0e4, 1.0e2, 9.0, -0.7],
        };
        let h = 1.0;
        let (p1, _) = rec.interpolate(1234.0 - h);
        let (p2, _) = rec.interpolate(1234.0 + h);
        let (_, vel) = rec.interpolate(1234.0);
        assert_relative_eq!(vel, (p2 - p1) / (2.0 * h), epsilon = 1e-6);
    }

    #[test]
    fn test_parse_segment() {
        let dir = DirectoryData {
            init: 0.0,
            intlen: 200.0,
            rsize: 8,
            n_records: 2,
        };
        let mut kernel = vec![0u8; 8]; // address 1 is padding
        for rec in 0..2 {
            let words = [
                100.0 + 200.0 * rec as f64,
                100.0,
                1.0,
                2.0,
                3.0,
                4.0,
                5.0,
                6.0,
            ];
            for w in words {
                kernel.extend_from_slice(&f64::to_le_bytes(w));
            }
        }

        let records =
            EphemerisRecord::parse_segment(&kernel, 2, &dir, SpkDataType::ChebyshevPositionOnly)
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mid, 300.0);
        assert_eq!(records[0].x, vec![1.0, 2.0]);
        assert_eq!(records[0].z, vec![5.0, 6.0]);

        let huge = DirectoryData {
            n_records: usize::MAX / 4,
            ..dir.clone()
        };
        assert!(matches!(
            EphemerisRecord::parse_segment(&kernel, 2, &huge, SpkDataType::ChebyshevPositionOnly),
            Err(MeraiError::NomParsingError(_))
        ));
        assert!(EphemerisRecord::parse_segment(
            &kernel,
            usize::MAX,
            &dir,
            SpkDataType::ChebyshevPositionOnly
        )
        .is_err());

        assert!(EphemerisRecord::parse_segment(
            &kernel[..60],
            2,
            &dir,
            SpkDataType::ChebyshevPositionOnly
        )
        .is_err());
    }
}
