//! Test helpers for writing courier input files.

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::GeoCoordinate;
use tempfile::TempDir;

/// Main St runs east from the depot; Oak Ave runs north from its far end.
pub(super) const CORNER_MAP: &str = "\
Main St
2
0 0 0 0.01
0 0.01 0 0.02
Oak Ave
1
0 0.02 0.01 0.02
";

pub(super) const CORNER_DELIVERIES: &str = "0 0\n0.01 0.02:parcel\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Map and delivery files in a temporary directory.
#[derive(Debug)]
pub(super) struct InputFiles {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) map: Utf8PathBuf,
    pub(super) deliveries: Utf8PathBuf,
}

impl InputFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let map = root.join("corner.map");
        let deliveries = root.join("corner.deliveries");
        Self {
            _dir: dir,
            root,
            map,
            deliveries,
        }
    }

    pub(super) fn with_corner() -> Self {
        let files = Self::new();
        write_utf8(&files.map, CORNER_MAP.as_bytes());
        write_utf8(&files.deliveries, CORNER_DELIVERIES.as_bytes());
        files
    }
}

/// Expected text output for the corner fixture.
pub(super) fn corner_directions() -> Vec<String> {
    let point = |text: &str| -> GeoCoordinate { text.parse().expect("valid coordinate") };
    let main = point("0 0").distance_miles(&point("0 0.02"));
    let oak = point("0 0.02").distance_miles(&point("0.01 0.02"));
    vec![
        format!("Proceed east on Main St for {main:.2} miles"),
        "Turn left on Oak Ave".to_owned(),
        format!("Proceed north on Oak Ave for {oak:.2} miles"),
        "Deliver parcel".to_owned(),
        format!("Proceed south on Oak Ave for {oak:.2} miles"),
        "Turn right on Main St".to_owned(),
        format!("Proceed west on Main St for {main:.2} miles"),
        format!("Total distance: {:.2} miles", 2.0 * (main + oak)),
    ]
}
