//! Marker style of every object kind.
use std::fmt;

use crate::visibility::ObjectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Star,
    Circle,
    Square,
    Point,
}

impl MarkerShape {
    /// Plotly `marker.symbol` name.
    pub fn plotly_symbol(&self) -> &'static str {
        match self {
            MarkerShape::Star => "star",
            MarkerShape::Circle => "circle",
            MarkerShape::Square => "square",
            MarkerShape::Point => "circle-dot",
        }
    }
}

/// Matplotlib-like marker code.
impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarkerShape::Star => "*",
            MarkerShape::Circle => "o",
            MarkerShape::Square => "s",
            MarkerShape::Point => ".",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: &'static str,
    /// Relative marker area.
    pub size: f64,
    pub alpha: f64,
    pub edge_color: Option<&'static str>,
}

const fn style(
    shape: MarkerShape,
    color: &'static str,
    size: f64,
    alpha: f64,
    edge_color: Option<&'static str>,
) -> MarkerStyle {
    MarkerStyle {
        shape,
        color,
        size,
        alpha,
        edge_color,
    }
}

pub const STAR_STYLE: MarkerStyle = style(MarkerShape::Star, "white", 20.0, 0.85, None);
pub const PLANET_STYLE: MarkerStyle = style(MarkerShape::Circle, "gold", 50.0, 1.0, Some("black"));
pub const SUN_STYLE: MarkerStyle = style(MarkerShape::Circle, "yellow", 100.0, 1.0, Some("black"));
pub const MOON_STYLE: MarkerStyle =
    style(MarkerShape::Circle, "lightgray", 80.0, 1.0, Some("black"));
pub const DEEP_SKY_STYLE: MarkerStyle = style(MarkerShape::Square, "cyan", 30.0, 1.0, None);
pub const OTHER_STYLE: MarkerStyle = style(MarkerShape::Point, "grey", 10.0, 0.7, None);

pub fn style_for(kind: ObjectKind) -> MarkerStyle {
    match kind {
        ObjectKind::Star => STAR_STYLE,
        ObjectKind::Planet => PLANET_STYLE,
        ObjectKind::Sun => SUN_STYLE,
        ObjectKind::Moon => MOON_STYLE,
        ObjectKind::DeepSky => DEEP_SKY_STYLE,
        ObjectKind::Other => OTHER_STYLE,
    }
}
