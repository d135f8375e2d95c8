//! DAF (Double precision Array File) file record.
//!
//! The first 1024 bytes of a NAIF SPK kernel describe the container:
//!
//! * **`idword`**: format identifier, `"DAF/SPK"` for planetary kernels,
//! * **`nd`** / **`ni`**: number of double / integer components of each segment summary
//!   (`2` and `6` for SPK),
//! * **`fward`** / **`bward`**: record numbers (1-based) of the first and last summary records,
//! * **`free`**: first free address (1-based, in double words),
//! * **`locfmt`**: binary format of the numbers stored in the file (`"LTL-IEEE"` or `"BIG-IEEE"`).
//!
//! Only little-endian kernels are accepted, which covers every DE-series file distributed by NAIF.
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use nom::{bytes::complete::take, number::complete::le_i32, sequence::tuple, IResult};

use crate::merai_errors::MeraiError;

/// Size in bytes of one DAF physical record.
pub const DAF_RECORD_LEN: usize = 1024;

#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    pub idword: String,
    pub internal_filename: String,
    pub nd: i32,
    pub ni: i32,
    pub fward: i32,
    pub bward: i32,
    pub free: i32,
    pub locfmt: String,
}

fn ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

impl DAFHeader {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, (idword, nd, ni, ifname)) =
            tuple((take(8usize), le_i32, le_i32, take(60usize)))(input)?;
        let (input, (fward, bward, free, locfmt)) =
            tuple((le_i32, le_i32, le_i32, take(8usize)))(input)?;

        Ok((
            input,
            DAFHeader {
                idword: ascii(idword),
                internal_filename: ascii(ifname),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: ascii(locfmt),
            },
        ))
    }

    /// Number of double words in one segment summary.
    pub fn summary_size(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }

    /// Check that the file is a little-endian SPK kernel with the usual summary layout.
    pub fn validate(&self) -> Result<(), MeraiError> {
        if self.idword != "DAF/SPK" {
            return Err(MeraiError::NomParsingError(format!(
                "not an SPK kernel (id word {:?})",
                self.idword
            )));
        }
        if !self.locfmt.is_empty() && self.locfmt != "LTL-IEEE" {
            return Err(MeraiError::NomParsingError(format!(
                "unsupported binary format {}",
                self.locfmt
            )));
        }
        if self.nd != 2 || self.ni != 6 {
            return Err(MeraiError::NomParsingError(format!(
                "unexpected summary layout ND={} NI={}",
                self.nd, self.ni
            )));
        }
        if self.fward < 2 {
            return Err(MeraiError::NomParsingError(format!(
                "invalid first summary record {}",
                self.fward
            )));
        }
        Ok(())
    }
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("DAF file record"), Cell::new("")]);

        table.add_row(vec![Cell::new("ID word"), Cell::new(&self.idword)]);
        table.add_row(vec![
            Cell::new("Internal name"),
            Cell::new(&self.internal_filename),
        ]);
        table.add_row(vec![
            Cell::new("ND / NI"),
            Cell::new(format!("{} / {}", self.nd, self.ni)),
        ]);
        table.add_row(vec![
            Cell::new("Summary records"),
            Cell::new(format!("{} .. {}", self.fward, self.bward)),
        ]);
        table.add_row(vec![Cell::new("Free address"), Cell::new(self.free)]);
        table.add_row(vec![Cell::new("Binary format"), Cell::new(&self.locfmt)]);

        write!(f, "{table}")
    }
}

#[cfg(test)]
mod test_daf_header {
    use super::*;

    fn file_record(idword: &[u8; 8], locfmt: &[u8; 8]) -> Vec<u8> {
        let mut record = Vec::with_capacity(DAF_RECORD_LEN);
        record.extend_from_slice(idword);
        record.extend_from_slice(&2i32.to_le_bytes());
        record.extend_from_slice(&6i32.to_le_bytes());
        let mut name = [b' '; 60];
        name[..7].copy_from_slice(b"NIO2SPK");
        record.extend_from_slice(&name);
        record.extend_from_slice(&4i32.to_le_bytes());
        record.extend_from_slice(&4i32.to_le_bytes());
        record.extend_from_slice(&14974889i32.to_le_bytes());
        record.extend_from_slice(locfmt);
        record.resize(DAF_RECORD_LEN, 0);
        record
    }

    #[test]
    fn test_parse_daf_header() {
        let bytes = file_record(b"DAF/SPK ", b"LTL-IEEE");
        let (_, header) = DAFHeader::parse(&bytes).unwrap();

        assert_eq!(
            header,
            DAFHeader {
                idword: "DAF/SPK".to_string(),
                internal_filename: "NIO2SPK".to_string(),
                nd: 2,
                ni: 6,
                fward: 4,
                bward: 4,
                free: 14974889,
                locfmt: "LTL-IEEE".to_string(),
            }
        );
        assert_eq!(header.summary_size(), 5);
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_reject_big_endian_and_foreign_files() {
        let (_, big) = DAFHeader::parse(&file_record(b"DAF/SPK ", b"BIG-IEEE")).unwrap();
        assert!(big.validate().is_err());

        let (_, pck) = DAFHeader::parse(&file_record(b"DAF/PCK ", b"LTL-IEEE")).unwrap();
        assert!(pck.validate().is_err());
    }

    #[test]
    fn test_truncated_header() {
        assert!(DAFHeader::parse(&[0u8; 40]).is_err());
    }

    #[test]
    fn test_display_daf_header() {
        let (_, header) = DAFHeader::parse(&file_record(b"DAF/SPK ", b"LTL-IEEE")).unwrap();
        let output = format!("{header}");
        assert!(output.contains("DAF/SPK"));
        assert!(output.contains("NIO2SPK"));
        assert!(output.contains("2 / 6"));
        assert!(output.contains("LTL-IEEE"));
    }
}
