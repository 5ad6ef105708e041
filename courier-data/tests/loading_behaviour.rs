//! Behaviour tests for loading map and delivery files.
#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

use std::cell::RefCell;

use camino::Utf8PathBuf;
use courier_core::{GeoCoordinate, StreetGraph, StreetMap};
use courier_data::{
    DeliveryLoadError, DeliveryManifest, MapLoadError, load_deliveries, load_street_map,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct LoadWorld {
    path: RefCell<Option<Utf8PathBuf>>,
    map: RefCell<Option<Result<StreetMap, MapLoadError>>>,
    manifest: RefCell<Option<Result<DeliveryManifest, DeliveryLoadError>>>,
}

#[fixture]
fn world() -> LoadWorld {
    LoadWorld::default()
}

fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn point(text: &str) -> GeoCoordinate {
    text.trim_matches('"').parse().expect("valid coordinate")
}

fn path(world: &LoadWorld) -> Utf8PathBuf {
    world.path.borrow().clone().expect("path set by a given step")
}

#[given("the Westwood map file")]
fn westwood_map(world: &LoadWorld) {
    world.path.replace(Some(fixture_path("westwood.map")));
}

#[given("the Westwood deliveries file")]
fn westwood_deliveries(world: &LoadWorld) {
    world.path.replace(Some(fixture_path("westwood.deliveries")));
}

#[given("a map path that does not exist")]
fn missing_map(world: &LoadWorld) {
    world.path.replace(Some(fixture_path("no-such.map")));
}

#[when("I load the street map")]
fn load_map(world: &LoadWorld) {
    let result = load_street_map(&path(world));
    world.map.replace(Some(result));
}

#[when("I load the deliveries")]
fn load_manifest(world: &LoadWorld) {
    let result = load_deliveries(&path(world));
    world.manifest.replace(Some(result));
}

#[then("the map has {segments} segments over {vertices} vertices")]
fn map_size(world: &LoadWorld, segments: usize, vertices: usize) {
    let map = world.map.borrow();
    let map = map
        .as_ref()
        .expect("map loaded")
        .as_ref()
        .expect("map parses");
    assert_eq!(map.segment_count(), segments);
    assert_eq!(map.vertex_count(), vertices);
}

#[then("the vertex {vertex} has {count} outgoing segments")]
fn vertex_degree(world: &LoadWorld, vertex: String, count: usize) {
    let map = world.map.borrow();
    let map = map
        .as_ref()
        .expect("map loaded")
        .as_ref()
        .expect("map parses");
    assert_eq!(map.outgoing_segments(&point(&vertex)).len(), count);
}

#[then("the depot is {depot}")]
fn depot_is(world: &LoadWorld, depot: String) {
    let manifest = world.manifest.borrow();
    let manifest = manifest
        .as_ref()
        .expect("manifest loaded")
        .as_ref()
        .expect("manifest parses");
    assert_eq!(manifest.depot, point(&depot));
}

#[then("the deliveries are {first} then {second}")]
fn deliveries_are(world: &LoadWorld, first: String, second: String) {
    let manifest = world.manifest.borrow();
    let manifest = manifest
        .as_ref()
        .expect("manifest loaded")
        .as_ref()
        .expect("manifest parses");
    let items: Vec<&str> = manifest
        .deliveries
        .iter()
        .map(|delivery| delivery.item.as_str())
        .collect();
    assert_eq!(
        items,
        [first.trim_matches('"'), second.trim_matches('"')]
    );
}

#[then("loading fails because the file could not be opened")]
fn open_failed(world: &LoadWorld) {
    let expected = path(world);
    let map = world.map.borrow();
    let result = map.as_ref().expect("map load attempted");
    assert!(
        matches!(result, Err(MapLoadError::Open { path, .. }) if *path == expected),
        "{result:?}"
    );
}

#[scenario(path = "tests/features/loading.feature", index = 0)]
fn load_westwood_map(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/loading.feature", index = 1)]
fn load_westwood_deliveries(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/loading.feature", index = 2)]
fn missing_map_file(world: LoadWorld) {
    let _ = world;
}
