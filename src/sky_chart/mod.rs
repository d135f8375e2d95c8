//! # Sky chart projector
//!
//! [`project`] maps visible objects onto a polar chart description ([`ChartSpec`]):
//!
//! * radius `r = 90 - altitude` (zenith at the center, horizon on the rim),
//! * angle `θ = azimuth`, origin at North, increasing **clockwise** (compass convention).
//!
//! The spec is purely declarative. Turning it into an image or an interactive figure is the job of
//! a [`render::ChartRenderer`].
use hifitime::Epoch;
use itertools::Itertools;

use crate::{
    constants::{Degree, LABEL_MIN_ALTITUDE},
    observers::ObserverFrame,
    visibility::{ObjectKind, VisibleObject},
};
use style::{style_for, MarkerStyle};
use zoom::ZoomLevel;

pub mod render;
pub mod style;
pub mod zoom;

/// Zenith distance of the horizon, the outer boundary of the chart.
pub const CHART_OUTER_RADIUS: Degree = 90.0;

/// Cardinal directions, compass angles.
const CARDINALS: [(&str, Degree); 4] = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub kind: ObjectKind,
    /// Zenith distance, degrees.
    pub r: Degree,
    /// Azimuth, degrees clockwise from North.
    pub theta: Degree,
    pub style: MarkerStyle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub kind: ObjectKind,
    pub label: String,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardinalMarker {
    pub label: &'static str,
    pub theta: Degree,
    pub r: Degree,
}

/// Where the angular axis starts and which way it turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarOrientation {
    /// Compass direction of `θ = 0`.
    pub zero_location: &'static str,
    pub clockwise: bool,
}

impl Default for PolarOrientation {
    fn default() -> Self {
        PolarOrientation {
            zero_location: "N",
            clockwise: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub instant: Epoch,
    pub orientation: PolarOrientation,
    pub zoom: ZoomLevel,
    /// Zenith distance window `[low, high]`, degrees.
    pub radial_range: [Degree; 2],
    pub points: Vec<ChartPoint>,
    pub legend: Vec<LegendEntry>,
    pub cardinals: Vec<CardinalMarker>,
}

impl ChartSpec {
    /// Whether a point falls inside the radial window.
    pub fn in_window(&self, point: &ChartPoint) -> bool {
        let [low, high] = self.radial_range;
        (low..=high).contains(&point.r)
    }

    pub fn points_of(&self, kind: ObjectKind) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter().filter(move |p| p.kind == kind)
    }
}

/// Chart title for an observer.
pub fn chart_title(observer: &ObserverFrame) -> String {
    format!(
        "Sky Chart for Lat: {:.2}, Lon: {:.2}\nAt {}",
        observer.latitude, observer.longitude, observer.instant
    )
}

fn label_for(object: &VisibleObject) -> Option<String> {
    let labelled = object.kind.is_solar_system()
        || (object.kind == ObjectKind::Star && object.altitude > LABEL_MIN_ALTITUDE);
    labelled.then(|| object.name.clone())
}

/// Project visible objects on the polar chart.
///
/// Objects below the horizon are dropped even if present in the input. Points keep the input
/// order; the legend has one entry per plotted kind, in order of first appearance.
pub fn project(objects: &[VisibleObject], observer: &ObserverFrame, zoom: ZoomLevel) -> ChartSpec {
    let points: Vec<ChartPoint> = objects
        .iter()
        .filter(|object| object.altitude >= 0.0)
        .map(|object| ChartPoint {
            name: object.name.clone(),
            kind: object.kind,
            r: CHART_OUTER_RADIUS - object.altitude,
            theta: object.azimuth,
            style: style_for(object.kind),
            label: label_for(object),
        })
        .collect();

    let legend = points
        .iter()
        .map(|point| point.kind)
        .unique()
        .map(|kind| LegendEntry {
            kind,
            label: kind.to_string(),
            style: style_for(kind),
        })
        .collect();

    let cardinals = CARDINALS
        .iter()
        .map(|&(label, theta)| CardinalMarker {
            label,
            theta,
            r: CHART_OUTER_RADIUS,
        })
        .collect();

    ChartSpec {
        title: chart_title(observer),
        instant: observer.instant,
        orientation: PolarOrientation::default(),
        zoom,
        radial_range: zoom.radial_range(),
        points,
        legend,
        cardinals,
    }
}
