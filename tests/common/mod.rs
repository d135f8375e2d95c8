#![allow(dead_code)]

use camino::Utf8PathBuf;
use merai::{
    catalog::StarRecord,
    constants::{AU, RADH},
    earth_orientation::j2000_to_true_of_date,
    observers::ObserverFrame,
    ref_system::cartesian_to_radec,
    time::parse_utc_instant,
    visibility::horizon::{from_horizontal, HorizontalCoord},
};
use nalgebra::Vector3;

const RECORD_LEN: usize = 1024;

/// Coverage half width of the synthetic segments, seconds past J2000.
pub const COVERAGE: f64 = 1.0e10;

/// Barycentric position of the Earth-Moon barycenter used by every scenario, km.
pub const EMB_POSITION: [f64; 3] = [AU, 0.0, 0.0];

/// SPK type 2 kernel, one constant record per `(target, center, position km)` segment.
pub fn spk_bytes(segments: &[(i32, i32, [f64; 3])]) -> Vec<u8> {
    let still: Vec<MovingSegment> = segments
        .iter()
        .map(|&(target, center, position)| MovingSegment {
            target,
            center,
            position,
            velocity: [0.0; 3],
        })
        .collect();
    spk_bytes_moving(&still, 0.0)
}

/// Segment in uniform motion relative to its center.
#[derive(Debug, Clone, Copy)]
pub struct MovingSegment {
    pub target: i32,
    pub center: i32,
    /// km, at the reference epoch.
    pub position: [f64; 3],
    /// km/s.
    pub velocity: [f64; 3],
}

/// SPK type 2 kernel with one linear record per segment, each segment at `position` at the
/// reference epoch `et` (seconds past J2000).
pub fn spk_bytes_moving(segments: &[MovingSegment], et: f64) -> Vec<u8> {
    let mut bytes = vec![0u8; 3 * RECORD_LEN];
    bytes[..8].copy_from_slice(b"DAF/SPK ");
    bytes[8..12].copy_from_slice(&2i32.to_le_bytes());
    bytes[12..16].copy_from_slice(&6i32.to_le_bytes());
    bytes[76..80].copy_from_slice(&3i32.to_le_bytes());
    bytes[80..84].copy_from_slice(&3i32.to_le_bytes());
    bytes[88..96].copy_from_slice(b"LTL-IEEE");
    let comment = b"JPL planetary and lunar ephemeris DE-SYNTH\0Integrated 1 Jan 2000\0";
    bytes[RECORD_LEN..RECORD_LEN + comment.len()].copy_from_slice(comment);

    let mut summaries = Vec::new();
    for w in [0.0f64, 0.0, segments.len() as f64] {
        summaries.extend_from_slice(&w.to_le_bytes());
    }
    for segment in segments {
        let first = bytes.len() / 8 + 1;
        // p(t) = c0 + c1 * (t / COVERAGE)
        let (p, v) = (segment.position, segment.velocity);
        let words = [
            0.0,
            COVERAGE,
            p[0] - v[0] * et,
            v[0] * COVERAGE,
            p[1] - v[1] * et,
            v[1] * COVERAGE,
            p[2] - v[2] * et,
            v[2] * COVERAGE,
        ];
        let footer = [-COVERAGE, 2.0 * COVERAGE, 8.0, 1.0];
        for w in words.iter().chain(footer.iter()) {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let last = bytes.len() / 8;
        summaries.extend_from_slice(&(-COVERAGE).to_le_bytes());
        summaries.extend_from_slice(&COVERAGE.to_le_bytes());
        for w in [segment.target, segment.center, 1, 2, first as i32, last as i32] {
            summaries.extend_from_slice(&w.to_le_bytes());
        }
    }
    bytes[2 * RECORD_LEN..2 * RECORD_LEN + summaries.len()].copy_from_slice(&summaries);
    bytes
}

/// Overwrite word `word` (0 = init .. 3 = record count) of the footer of the `segment`-th segment.
pub fn patch_footer(mut bytes: Vec<u8>, segment: usize, word: usize, value: f64) -> Vec<u8> {
    let offset = 3 * RECORD_LEN + segment * 12 * 8 + (8 + word) * 8;
    bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
    bytes
}

/// Unique path in the system temp directory.
pub fn temp_path(name: &str) -> Utf8PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("merai_{}_{name}", std::process::id()));
    Utf8PathBuf::from_path_buf(path).expect("temp dir is UTF-8")
}

pub fn write_file(name: &str, content: &[u8]) -> Utf8PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, content).expect("temp file is writable");
    path
}

/// Los Angeles, 2024-04-10 04:00 UTC.
pub fn los_angeles() -> ObserverFrame {
    ObserverFrame::new(
        34.05,
        -118.24,
        parse_utc_instant("2024-04-10T04:00:00").unwrap(),
    )
    .unwrap()
}

/// Apparent J2000 direction of a point seen at `(altitude, azimuth)` by `observer`.
pub fn direction_j2000(observer: &ObserverFrame, altitude: f64, azimuth: f64) -> Vector3<f64> {
    let coord = HorizontalCoord { altitude, azimuth };
    let tod = from_horizontal(
        &coord,
        observer.local_sidereal_time(),
        observer.latitude_rad(),
    );
    j2000_to_true_of_date(observer.instant.to_mjd_tt_days()).transpose() * tod
}

/// Barycentric position (km) of a body seen at `(altitude, azimuth)` from `observer`, `distance`
/// AU away, with the Earth at the EMB position.
pub fn body_at(observer: &ObserverFrame, altitude: f64, azimuth: f64, distance: f64) -> [f64; 3] {
    let site = Vector3::from(EMB_POSITION) + observer.geocentric_position_j2000() * AU;
    let target = site + direction_j2000(observer, altitude, azimuth) * distance * AU;
    [target.x, target.y, target.z]
}

/// Kernel with the Earth at the EMB and every `(naif id, altitude, azimuth)` body placed for
/// `observer`, one AU away.
pub fn scenario_kernel(observer: &ObserverFrame, bodies: &[(i32, f64, f64)]) -> Vec<u8> {
    let mut segments = vec![(3, 0, EMB_POSITION), (399, 3, [0.0; 3])];
    segments.extend(
        bodies
            .iter()
            .map(|&(id, alt, az)| (id, 0, body_at(observer, alt, az, 1.0))),
    );
    spk_bytes(&segments)
}

/// Catalog star seen at `(altitude, azimuth)` from `observer`.
pub fn star_at(
    observer: &ObserverFrame,
    catalog_id: u32,
    magnitude: f64,
    altitude: f64,
    azimuth: f64,
) -> StarRecord {
    let (alpha, delta, _) = cartesian_to_radec(&direction_j2000(observer, altitude, azimuth));
    StarRecord {
        catalog_id,
        ra_hours: alpha / RADH,
        dec_degrees: delta.to_degrees(),
        magnitude,
        proper_name: None,
    }
}
