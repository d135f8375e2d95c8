//! # Tabular display of visible objects
//!
//! Borrowing adaptors that print a query result as a `comfy-table` table:
//!
//! - [`VisibleTable`]: `Name | Type | Altitude (°) | Azimuth (°) | Constellation | HIP`
//! - [`DescribedTable`]: `Name | Type | Altitude (°) | Description | Image`, descriptions
//!   truncated to a tile-sized excerpt.
//!
//! ```rust,ignore
//! use merai::display::VisibleTableExt;
//!
//! println!("{}", objects.table().sorted_by_altitude());
//! ```
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{enrichment::DescribedObject, visibility::VisibleObject};

/// Longest description excerpt shown in a table cell, characters.
const MAX_DESCRIPTION_LEN: usize = 120;

pub struct VisibleTable<'a> {
    objects: &'a [VisibleObject],
    sorted: bool,
}

impl<'a> VisibleTable<'a> {
    pub fn new(objects: &'a [VisibleObject]) -> Self {
        VisibleTable {
            objects,
            sorted: false,
        }
    }

    /// Highest objects first.
    pub fn sorted_by_altitude(mut self) -> Self {
        self.sorted = true;
        self
    }

    fn rows(&self) -> Vec<&'a VisibleObject> {
        let mut rows: Vec<&VisibleObject> = self.objects.iter().collect();
        if self.sorted {
            rows.sort_by(|a, b| b.altitude.total_cmp(&a.altitude));
        }
        rows
    }
}

impl fmt::Display for VisibleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.objects.is_empty() {
            return writeln!(f, "No object above the horizon.");
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Name"),
            Cell::new("Type"),
            Cell::new("Altitude (°)"),
            Cell::new("Azimuth (°)"),
            Cell::new("Constellation"),
            Cell::new("HIP"),
        ]);

        for object in self.rows() {
            table.add_row(Row::from(vec![
                Cell::new(&object.name),
                Cell::new(object.kind),
                Cell::new(format!("{:.2}", object.altitude)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", object.azimuth)).set_alignment(CellAlignment::Right),
                Cell::new(&object.constellation),
                Cell::new(object.catalog_id.map(|id| id.to_string()).unwrap_or_default())
                    .set_alignment(CellAlignment::Right),
            ]));
        }

        write!(f, "{table}")
    }
}

pub trait VisibleTableExt {
    fn table(&self) -> VisibleTable<'_>;
}

impl VisibleTableExt for [VisibleObject] {
    fn table(&self) -> VisibleTable<'_> {
        VisibleTable::new(self)
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_LEN {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_DESCRIPTION_LEN).collect();
        format!("{}...", cut.trim_end())
    }
}

pub struct DescribedTable<'a> {
    objects: &'a [DescribedObject],
}

impl<'a> DescribedTable<'a> {
    pub fn new(objects: &'a [DescribedObject]) -> Self {
        DescribedTable { objects }
    }
}

impl fmt::Display for DescribedTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Name"),
                Cell::new("Type"),
                Cell::new("Altitude (°)"),
                Cell::new("Description"),
                Cell::new("Image"),
            ]);

        for described in self.objects {
            table.add_row(Row::from(vec![
                Cell::new(described.display_name()),
                Cell::new(described.object.kind),
                Cell::new(format!("{:.2}", described.object.altitude))
                    .set_alignment(CellAlignment::Right),
                Cell::new(
                    described
                        .description()
                        .map(excerpt)
                        .unwrap_or_else(|| "Description not available.".to_string()),
                ),
                Cell::new(described.image_url().unwrap_or("-")),
            ]));
        }

        write!(f, "{table}")
    }
}
