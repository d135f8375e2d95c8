//! Segment summaries (descriptors) stored in the DAF summary records.
//!
//! A summary record starts with three doubles (next record, previous record, number of
//! summaries) followed by up to 25 packed summaries. For SPK each summary holds two doubles
//! (coverage start and end, ET seconds past J2000) and six integers (target, center, frame,
//! data type, first and last address of the segment).
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use hifitime::Epoch;
use nom::{
    number::complete::{le_f64, le_i32},
    sequence::tuple,
    IResult,
};

use super::naif_ids::NaifIds;
use crate::constants::EphemerisTime;

#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    pub start_epoch: EphemerisTime,
    pub end_epoch: EphemerisTime,
    pub target: i32,
    pub center: i32,
    pub frame_id: i32,
    pub data_type: i32,
    pub initial_addr: i32,
    pub final_addr: i32,
}

/// Control words at the head of a summary record.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SummaryControl {
    pub next: usize,
    pub prev: usize,
    pub nsum: usize,
}

impl SummaryControl {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, (next, prev, nsum)) = tuple((le_f64, le_f64, le_f64))(input)?;
        Ok((
            input,
            SummaryControl {
                next: next as usize,
                prev: prev as usize,
                nsum: nsum as usize,
            },
        ))
    }
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, (start_epoch, end_epoch)) = tuple((le_f64, le_f64))(input)?;
        let (input, (target, center, frame_id, data_type, initial_addr, final_addr)) =
            tuple((le_i32, le_i32, le_i32, le_i32, le_i32, le_i32))(input)?;

        Ok((
            input,
            Summary {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    pub fn covers(&self, et: EphemerisTime) -> bool {
        (self.start_epoch..=self.end_epoch).contains(&et)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![Cell::new("Field"), Cell::new("Value")]);

        let rows = [
            ("start_epoch", Epoch::from_et_seconds(self.start_epoch).to_string()),
            ("end_epoch", Epoch::from_et_seconds(self.end_epoch).to_string()),
            ("target", NaifIds::from_id(self.target).to_string()),
            ("center", NaifIds::from_id(self.center).to_string()),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", self.data_type.to_string()),
            (
                "addresses",
                format!("{} .. {}", self.initial_addr, self.final_addr),
            ),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }

        write!(f, "{table}")
    }
}
