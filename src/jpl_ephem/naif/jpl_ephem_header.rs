//! Text header found in the comment area of JPL DE kernels.
//!
//! ```text
//! JPL planetary and lunar ephemeris DE421
//!
//! Integrated 29 Feb 2008
//!
//! ...
//! ```
//!
//! Only the version and the integration date are extracted. Kernels without this header (or
//! produced by other tools) load fine, the header is simply absent.
use std::fmt;

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::not_line_ending,
    sequence::{preceded, tuple},
    IResult,
};

#[derive(Debug, PartialEq, Clone)]
pub struct JPLEphemHeader {
    pub version: String,
    pub creation_date: Option<String>,
}

fn line_after<'a>(marker: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tuple((take_until(marker), tag(marker))), not_line_ending)
}

impl JPLEphemHeader {
    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (input, version) = line_after("JPL planetary and lunar ephemeris ")(input)?;
        let (input, creation_date) = match line_after("Integrated ")(input) {
            Ok((rest, date)) => (rest, Some(date.trim().to_string())),
            Err(_) => (input, None),
        };

        Ok((
            input,
            JPLEphemHeader {
                version: version.trim().to_string(),
                creation_date,
            },
        ))
    }
}

impl fmt::Display for JPLEphemHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.creation_date {
            Some(date) => write!(f, "{} (integrated {date})", self.version),
            None => write!(f, "{}", self.version),
        }
    }
}

#[cfg(test)]
mod test_jpl_header {
    use super::*;

    #[test]
    fn test_parse_header() {
        let text = "\n\nJPL planetary and lunar ephemeris DE421\n\nIntegrated 29 Feb 2008\n\nCompared to DE418...\n";
        let (_, header) = JPLEphemHeader::parse(text).unwrap();
        assert_eq!(
            header,
            JPLEphemHeader {
                version: "DE421".to_string(),
                creation_date: Some("29 Feb 2008".to_string())
            }
        );
        assert_eq!(header.to_string(), "DE421 (integrated 29 Feb 2008)");
    }

    #[test]
    fn test_header_without_date() {
        let (_, header) = JPLEphemHeader::parse("JPL planetary and lunar ephemeris DE440\n").unwrap();
        assert_eq!(header.version, "DE440");
        assert_eq!(header.creation_date, None);
    }

    #[test]
    fn test_foreign_comment() {
        assert!(JPLEphemHeader::parse("SPK written by a custom tool\n").is_err());
    }
}
