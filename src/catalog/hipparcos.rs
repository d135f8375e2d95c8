//! Reader for the Hipparcos main catalog (`hip_main.dat`, ESA 1997).
//!
//! The file is `|`-delimited, without header. The fields used are:
//!
//! | index | field | content |
//! |---|---|---|
//! | 1 | HIP | Hipparcos number |
//! | 5 | Vmag | visual magnitude |
//! | 8 | RAdeg | right ascension, ICRS, degrees |
//! | 9 | DEdeg | declination, ICRS, degrees |
//!
//! A few hundred entries have no astrometric solution (blank position); they are skipped.
use std::{fs::File, io::Read};

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use super::StarRecord;
use crate::merai_errors::MeraiError;

const FIELD_HIP: usize = 1;
const FIELD_VMAG: usize = 5;
const FIELD_RA_DEG: usize = 8;
const FIELD_DE_DEG: usize = 9;

fn parse_row(record: &StringRecord) -> Option<StarRecord> {
    let field = |idx: usize| record.get(idx).filter(|value| !value.is_empty());

    Some(StarRecord {
        catalog_id: field(FIELD_HIP)?.parse().ok()?,
        ra_hours: field(FIELD_RA_DEG)?.parse::<f64>().ok()? / 15.0,
        dec_degrees: field(FIELD_DE_DEG)?.parse().ok()?,
        magnitude: field(FIELD_VMAG)?.parse().ok()?,
        proper_name: None,
    })
}

/// Parse a Hipparcos main catalog from any reader.
pub fn read_hipparcos<R: Read>(reader: R) -> Result<Vec<StarRecord>, MeraiError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let star = match result {
            Ok(record) => parse_row(&record),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => None,
        };
        match star {
            Some(star) => stars.push(star),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} Hipparcos entries without position or magnitude");
    }
    Ok(stars)
}

pub fn read_hipparcos_file(path: &Utf8Path) -> Result<Vec<StarRecord>, MeraiError> {
    read_hipparcos(File::open(path)?)
}

#[cfg(test)]
mod test_hipparcos {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
H|       32349|  |06 45 08.92|-16 42 58.0|-1.44| |H|101.28715539|-16.71611582| |   379.21|
H|       30438|  |06 23 57.11|-52 41 44.4|-0.62| |H| 95.98787763|-52.69571799| |    10.43|
H|           1|  |00 00 00.22|+01 05 20.4| 9.10| |H|  0.00091185|  1.08901332| |     3.54|
H|         120|  |00 01 36.10|-77 31 26.3|12.35| |H|            |            | |         |
";

    #[test]
    fn test_read_hipparcos() {
        let stars = read_hipparcos(SAMPLE.as_bytes()).unwrap();
        assert_eq!(stars.len(), 3);

        let sirius = &stars[0];
        assert_eq!(sirius.catalog_id, 32349);
        assert_relative_eq!(sirius.ra_hours, 101.28715539 / 15.0);
        assert_relative_eq!(sirius.dec_degrees, -16.71611582);
        assert_relative_eq!(sirius.magnitude, -1.44);
        assert_eq!(sirius.proper_name, None);

        // file order is kept
        assert_eq!(stars[1].catalog_id, 30438);
        assert_eq!(stars[2].catalog_id, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_hipparcos("".as_bytes()).unwrap().is_empty());
    }
}
