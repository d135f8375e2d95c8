mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use common::{los_angeles, patch_footer, scenario_kernel, star_at, temp_path, write_file};
use merai::{
    catalog::StarRecord,
    jpl_ephem::download_jpl_file::EphemSource,
    merai::{Merai, MeraiConfig},
    merai_errors::MeraiError,
    observers::ObserverFrame,
    sky_chart::{
        render::{ChartRenderer, JsonFigureRenderer, SvgRenderer},
        zoom::ZoomLevel,
    },
    visibility::ObjectKind,
};

fn hyg_line(star: &StarRecord, proper: &str, con: &str) -> String {
    format!(
        "{},{},{},{},{},{},{}\n",
        star.catalog_id, star.catalog_id, proper, star.ra_hours, star.dec_degrees, star.magnitude, con
    )
}

/// Kernel, HYG catalog and constellation file on disk for `observer`.
fn setup(name: &str, observer: &ObserverFrame) -> MeraiConfig {
    let kernel = scenario_kernel(observer, &[(10, 30.0, 90.0), (4, 20.0, 200.0)]);

    let sirius = star_at(observer, 32349, -1.46, 20.0, 120.0);
    let zenith = star_at(observer, 11767, 1.97, 90.0, 0.0);
    let low = star_at(observer, 30438, -0.74, 5.0, 210.0);
    let below = star_at(observer, 27989, 0.45, -10.0, 70.0);
    let mut csv = String::from("id,hip,proper,ra,dec,mag,con\n");
    csv.push_str(&hyg_line(&sirius, "Sirius", "CMa"));
    csv.push_str(&hyg_line(&zenith, "", "UMi"));
    csv.push_str(&hyg_line(&low, "Canopus", "Car"));
    csv.push_str(&hyg_line(&below, "Betelgeuse", "Ori"));

    let catalog = write_file(&format!("{name}_hyg.csv"), csv.as_bytes());
    MeraiConfig {
        ephemeris: EphemSource::Path(write_file(&format!("{name}.bsp"), &kernel)),
        star_catalog: catalog.clone(),
        constellation_file: catalog,
        http_timeout: Duration::from_millis(500),
    }
}

#[test]
fn test_visible_objects_are_enriched() {
    let observer = los_angeles();
    let merai = Merai::new(setup("enriched", &observer)).unwrap();
    assert_eq!(merai.engine().ephemeris().version(), Some("DE-SYNTH"));

    let visible = merai.visible_objects(&observer);
    let rows: Vec<(&str, &str)> = visible
        .iter()
        .map(|o| (o.name.as_str(), o.constellation.as_str()))
        .collect();
    assert_eq!(
        rows,
        [
            ("Sun", "N/A"),
            ("Mars", "N/A"),
            ("Sirius", "Canis Major"),
            ("HIP 11767", "Ursa Minor"),
            ("Canopus", "Carina"),
        ]
    );
}

#[test]
fn test_constellation_file_without_columns() {
    let observer = los_angeles();
    let config = MeraiConfig {
        constellation_file: write_file("nocols.csv", b"id,name\n1,foo\n"),
        ..setup("nocols", &observer)
    };
    let merai = Merai::new(config).unwrap();
    assert!(merai.constellations().is_empty());

    let visible = merai.visible_objects(&observer);
    for object in &visible {
        match object.kind {
            ObjectKind::Star => assert_eq!(object.constellation, "Unknown"),
            _ => assert_eq!(object.constellation, "N/A"),
        }
    }
}

#[test]
fn test_sky_chart() {
    let observer = los_angeles();
    let merai = Merai::new(setup("chart", &observer)).unwrap();

    let spec = merai.sky_chart(&observer, ZoomLevel::default());
    assert_eq!(spec.points.len(), 5);

    let zenith = &spec.points[3];
    assert_relative_eq!(zenith.r, 0.0, epsilon = 1e-9);
    assert_eq!(zenith.label.as_deref(), Some("HIP 11767"));

    let sun = &spec.points[0];
    assert_relative_eq!(sun.r, 60.0, epsilon = 1e-9);
    assert_relative_eq!(sun.theta, 90.0, epsilon = 1e-9);

    // Canopus at 5° keeps its point but gets no label
    assert_eq!(spec.points[4].label, None);

    let legend: Vec<&str> = spec.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, ["Sun", "Planet", "Star"]);

    let svg = SvgRenderer::default().render(&spec).unwrap();
    assert!(svg.contains(">Sirius</text>"));
    let figure = JsonFigureRenderer.render(&spec).unwrap();
    assert_eq!(figure["data"].as_array().unwrap().len(), 3);

    let tight = merai.sky_chart(&observer, ZoomLevel::default().zoom_in().zoom_in().zoom_in());
    assert_eq!(tight.radial_range, [22.5, 67.5]);
    assert_eq!(tight.points.len(), spec.points.len());
}

#[test]
fn test_missing_data_files() {
    let observer = los_angeles();
    let config = setup("missing", &observer);

    let no_catalog = MeraiConfig {
        star_catalog: temp_path("does_not_exist.dat"),
        ..config.clone()
    };
    assert!(matches!(
        Merai::new(no_catalog),
        Err(MeraiError::DataUnavailable { .. })
    ));

    let bad_kernel = MeraiConfig {
        ephemeris: EphemSource::Path(write_file("garbage.bsp", &[1u8; 4096])),
        ..config.clone()
    };
    assert!(matches!(
        Merai::new(bad_kernel),
        Err(MeraiError::DataUnavailable { .. })
    ));

    // NaN record count in the Earth footer
    let corrupt = patch_footer(scenario_kernel(&observer, &[]), 1, 3, f64::NAN);
    let corrupt_kernel = MeraiConfig {
        ephemeris: EphemSource::Path(write_file("corrupt.bsp", &corrupt)),
        ..config.clone()
    };
    assert!(matches!(
        Merai::new(corrupt_kernel),
        Err(MeraiError::DataUnavailable { .. })
    ));

    let no_constellations = MeraiConfig {
        constellation_file: temp_path("no_constellations.csv"),
        ..config
    };
    assert!(matches!(
        Merai::new(no_constellations),
        Err(MeraiError::DataUnavailable { .. })
    ));
}
