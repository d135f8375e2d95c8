//! Discrete zoom ladder of the sky chart.
use std::fmt;

use crate::constants::{Degree, DEFAULT_ZOOM_INDEX, ZOOM_LADDER, ZOOM_RADIAL_CENTER};

/// Position on the zoom ladder `[0.7, 1.0, 1.3, 1.6, 2.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomLevel(usize);

impl Default for ZoomLevel {
    fn default() -> Self {
        ZoomLevel(DEFAULT_ZOOM_INDEX)
    }
}

impl ZoomLevel {
    /// Level of a ladder factor. Factors outside the ladder fall back to `1.0`.
    pub fn from_factor(factor: f64) -> Self {
        ZOOM_LADDER
            .iter()
            .position(|step| (step - factor).abs() < 1e-9)
            .map(ZoomLevel)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < ZOOM_LADDER.len()).then_some(ZoomLevel(index))
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn factor(&self) -> f64 {
        ZOOM_LADDER[self.0]
    }

    /// Next tighter level, unchanged at the top of the ladder.
    pub fn zoom_in(self) -> Self {
        ZoomLevel((self.0 + 1).min(ZOOM_LADDER.len() - 1))
    }

    /// Next wider level, unchanged at the bottom of the ladder.
    pub fn zoom_out(self) -> Self {
        ZoomLevel(self.0.saturating_sub(1))
    }

    /// Window of zenith distance shown: `90 / factor` degrees wide around 45°, clamped to [0, 90].
    pub fn radial_range(&self) -> [Degree; 2] {
        let half_width = ZOOM_RADIAL_CENTER / self.factor();
        [
            (ZOOM_RADIAL_CENTER - half_width).max(0.0),
            (ZOOM_RADIAL_CENTER + half_width).min(90.0),
        ]
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}
