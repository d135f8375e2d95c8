//! Rendering backends for a [`ChartSpec`].
//!
//! * [`SvgRenderer`]: static image, self-contained SVG document,
//! * [`JsonFigureRenderer`]: interactive figure description (Plotly `scatterpolar` layout).
use std::fmt::Write;

use serde_json::{json, Value};

use super::{style::MarkerShape, ChartPoint, ChartSpec, CHART_OUTER_RADIUS};
use crate::merai_errors::MeraiError;

/// Radial offset of an object label, degrees of zenith distance.
const LABEL_OFFSET: f64 = 3.0;

/// Radial offset of the cardinal letters beyond the boundary.
const CARDINAL_OFFSET: f64 = 7.0;

/// Altitude rings, zenith distance.
const RING_STEP: f64 = 30.0;

pub trait ChartRenderer {
    type Artifact;

    fn render(&self, spec: &ChartSpec) -> Result<Self::Artifact, MeraiError>;
}

/// SVG sky chart: dark background, altitude rings, markers, labels, legend and title.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Width and height of the image, pixels.
    pub size: u32,
    pub background: String,
    pub sky_color: String,
    pub label_color: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        SvgRenderer {
            size: 800,
            background: "#0f2027".to_string(),
            sky_color: "#050A0E".to_string(),
            label_color: "skyblue".to_string(),
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Pixel frame of the polar plot.
struct PlotFrame {
    cx: f64,
    cy: f64,
    radius: f64,
    low: f64,
    high: f64,
}

impl PlotFrame {
    fn new(size: f64, radial_range: [f64; 2]) -> Self {
        PlotFrame {
            cx: size * 0.45,
            cy: size * 0.55,
            radius: size * 0.36,
            low: radial_range[0],
            high: radial_range[1],
        }
    }

    fn pixel_radius(&self, r: f64) -> f64 {
        (r - self.low) / (self.high - self.low) * self.radius
    }

    /// Pixel position of `(r, θ)`, θ clockwise from the top.
    fn xy(&self, r: f64, theta: f64) -> (f64, f64) {
        let rho = self.pixel_radius(r);
        let (sin, cos) = theta.to_radians().sin_cos();
        (self.cx + rho * sin, self.cy - rho * cos)
    }
}

fn star_polygon(x: f64, y: f64, outer: f64) -> String {
    let inner = outer * 0.45;
    (0..10)
        .map(|k| {
            let radius = if k % 2 == 0 { outer } else { inner };
            let angle = (k as f64 * 36.0).to_radians();
            format!("{:.1},{:.1}", x + radius * angle.sin(), y - radius * angle.cos())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl SvgRenderer {
    fn marker(&self, out: &mut String, point: &ChartPoint, x: f64, y: f64) -> std::fmt::Result {
        let style = &point.style;
        let half = style.size.sqrt() * 0.6;
        let paint = format!(
            r#"fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}""#,
            style.color,
            style.alpha,
            style.edge_color.unwrap_or("none"),
            if style.edge_color.is_some() { 1 } else { 0 }
        );

        match style.shape {
            MarkerShape::Circle | MarkerShape::Point => writeln!(
                out,
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="{half:.1}" {paint}/>"#
            ),
            MarkerShape::Square => writeln!(
                out,
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" {paint}/>"#,
                x - half,
                y - half,
                2.0 * half,
                2.0 * half
            ),
            MarkerShape::Star => writeln!(
                out,
                r#"<polygon points="{}" {paint}/>"#,
                star_polygon(x, y, half * 1.4)
            ),
        }
    }

    fn write_svg(&self, spec: &ChartSpec) -> Result<String, std::fmt::Error> {
        let size = self.size as f64;
        let frame = PlotFrame::new(size, spec.radial_range);
        let mut out = String::new();

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}" font-family="sans-serif">"#,
            self.size
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, self.background)?;
        writeln!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="lightgrey" stroke-opacity="0.7"/>"#,
            frame.cx, frame.cy, frame.radius, self.sky_color
        )?;

        // title, one tspan per line
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" fill="gold" font-size="{:.0}" text-anchor="middle">"#,
            frame.cx,
            size * 0.05,
            size * 0.022
        )?;
        for (k, line) in spec.title.lines().enumerate() {
            writeln!(
                out,
                r#"<tspan x="{:.1}" dy="{}">{}</tspan>"#,
                frame.cx,
                if k == 0 { "0" } else { "1.2em" },
                escape_xml(line)
            )?;
        }
        writeln!(out, "</text>")?;

        // altitude rings and their labels
        let mut ring = RING_STEP;
        while ring <= CHART_OUTER_RADIUS {
            if ring > frame.low && ring <= frame.high {
                writeln!(
                    out,
                    r##"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="#303040" stroke-dasharray="2,3"/>"##,
                    frame.cx,
                    frame.cy,
                    frame.pixel_radius(ring)
                )?;
                let (x, y) = frame.xy(ring, 0.0);
                writeln!(
                    out,
                    r#"<text x="{:.1}" y="{:.1}" fill="lightgrey" font-size="10">{}°</text>"#,
                    x + 3.0,
                    y + 12.0,
                    CHART_OUTER_RADIUS - ring
                )?;
            }
            ring += RING_STEP;
        }

        for point in spec.points.iter().filter(|p| spec.in_window(p)) {
            let (x, y) = frame.xy(point.r, point.theta);
            self.marker(&mut out, point, x, y)?;

            if let Some(label) = &point.label {
                let (lx, ly) = frame.xy(point.r + LABEL_OFFSET, point.theta);
                writeln!(
                    out,
                    r#"<text x="{lx:.1}" y="{ly:.1}" fill="{}" fill-opacity="0.85" font-size="9" text-anchor="middle">{}</text>"#,
                    self.label_color,
                    escape_xml(label)
                )?;
            }
        }

        for cardinal in &spec.cardinals {
            let (x, y) = frame.xy(frame.high + CARDINAL_OFFSET, cardinal.theta);
            writeln!(
                out,
                r#"<text x="{x:.1}" y="{y:.1}" fill="lightgrey" font-size="16" font-weight="bold" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                cardinal.label
            )?;
        }

        if !spec.legend.is_empty() {
            let x0 = size * 0.84;
            let y0 = size * 0.75;
            writeln!(
                out,
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#2c5364" stroke="gold"/>"##,
                x0 - 12.0,
                y0 - 16.0,
                size * 0.15,
                18.0 * spec.legend.len() as f64 + 10.0
            )?;
            for (k, entry) in spec.legend.iter().enumerate() {
                let y = y0 + 18.0 * k as f64;
                let swatch = ChartPoint {
                    name: entry.label.clone(),
                    kind: entry.kind,
                    r: 0.0,
                    theta: 0.0,
                    style: entry.style,
                    label: None,
                };
                self.marker(&mut out, &swatch, x0, y - 4.0)?;
                writeln!(
                    out,
                    r#"<text x="{:.1}" y="{y:.1}" fill="white" font-size="11">{}</text>"#,
                    x0 + 12.0,
                    escape_xml(&entry.label)
                )?;
            }
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

impl ChartRenderer for SvgRenderer {
    type Artifact = String;

    fn render(&self, spec: &ChartSpec) -> Result<String, MeraiError> {
        let [low, high] = spec.radial_range;
        if self.size == 0 || low >= high {
            return Err(MeraiError::RenderError(format!(
                "cannot draw a {}px chart over radial range [{low}, {high}]",
                self.size
            )));
        }
        self.write_svg(spec)
            .map_err(|e| MeraiError::RenderError(e.to_string()))
    }
}

/// Plotly figure (`data` + `layout`) with one `scatterpolar` trace per object kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFigureRenderer;

impl ChartRenderer for JsonFigureRenderer {
    type Artifact = Value;

    fn render(&self, spec: &ChartSpec) -> Result<Value, MeraiError> {
        let traces: Vec<Value> = spec
            .legend
            .iter()
            .map(|entry| {
                let points: Vec<&ChartPoint> = spec.points_of(entry.kind).collect();
                let edge_width = u8::from(entry.style.edge_color.is_some());
                json!({
                    "type": "scatterpolar",
                    "mode": "markers+text",
                    "name": entry.label,
                    "r": points.iter().map(|p| p.r).collect::<Vec<_>>(),
                    "theta": points.iter().map(|p| p.theta).collect::<Vec<_>>(),
                    "text": points.iter().map(|p| p.label.clone().unwrap_or_default()).collect::<Vec<_>>(),
                    "hovertext": points.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
                    "textposition": "top center",
                    "marker": {
                        "symbol": entry.style.shape.plotly_symbol(),
                        "color": entry.style.color,
                        "size": (entry.style.size.sqrt() * 2.0).round(),
                        "opacity": entry.style.alpha,
                        "line": {
                            "color": entry.style.edge_color.unwrap_or("rgba(0,0,0,0)"),
                            "width": edge_width,
                        },
                    },
                })
            })
            .collect();

        let direction = if spec.orientation.clockwise {
            "clockwise"
        } else {
            "counterclockwise"
        };

        Ok(json!({
            "data": traces,
            "layout": {
                "title": { "text": spec.title.replace('\n', "<br>") },
                "showlegend": true,
                "paper_bgcolor": "#0f2027",
                "font": { "color": "lightgrey" },
                "polar": {
                    "bgcolor": "#050A0E",
                    "angularaxis": {
                        "rotation": 90,
                        "direction": direction,
                        "tickmode": "array",
                        "tickvals": spec.cardinals.iter().map(|c| c.theta).collect::<Vec<_>>(),
                        "ticktext": spec.cardinals.iter().map(|c| c.label).collect::<Vec<_>>(),
                    },
                    "radialaxis": {
                        "range": spec.radial_range,
                        "tickvals": [0, 30, 60, 90],
                        "ticktext": ["90°", "60°", "30°", "0°"],
                    },
                },
            },
        }))
    }
}
