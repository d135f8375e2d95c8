//! # merai
//!
//! Topocentric sky visibility and polar sky charts.
//!
//! Given an observer (latitude, longitude, UTC instant), `merai` computes which of the Sun, the
//! Moon, the planets and the bright stars are above the local horizon, and projects them onto a
//! polar chart (zenith at the center, North up, azimuth clockwise).
//!
//! ## Pipeline
//!
//! ```text
//! JPL DE kernel ─┐
//! star catalog  ─┼─> VisibilityEngine::compute_visible ─> enrich ─> project ─> ChartRenderer
//! constellations ┘          (ObserverFrame)          (ConstellationMap)  (ZoomLevel)
//! ```
//!
//! The heavy data (ephemeris, catalog, constellation map) is loaded once by [`merai::Merai`] and
//! shared read-only by every query.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use merai::merai::{Merai, MeraiConfig};
//! use merai::observers::ObserverFrame;
//! use merai::sky_chart::{render::{ChartRenderer, SvgRenderer}, zoom::ZoomLevel};
//! use merai::time::parse_utc_instant;
//!
//! let merai = Merai::new(MeraiConfig::default())?;
//! let observer = ObserverFrame::new(34.05, -118.24, parse_utc_instant("2024-04-10T04:00:00")?)?;
//!
//! for object in merai.visible_objects(&observer) {
//!     println!("{} {} {:.2} {:.2}", object.name, object.kind, object.altitude, object.azimuth);
//! }
//!
//! let chart = merai.sky_chart(&observer, ZoomLevel::default());
//! let svg = SvgRenderer::default().render(&chart)?;
//! # Ok::<(), merai::merai_errors::MeraiError>(())
//! ```
pub mod catalog;
pub mod constants;
pub mod display;
pub mod earth_orientation;
pub mod enrichment;
pub mod env_state;
pub mod jpl_ephem;
pub mod merai;
pub mod merai_errors;
pub mod observers;
pub mod ref_system;
pub mod sky_chart;
pub mod time;
pub mod visibility;
