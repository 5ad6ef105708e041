//! Behavioural tests for `DeliveryPlanner` using rstest-bdd.

#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

use std::cell::RefCell;

use courier_core::test_support::{grid_coordinate, grid_map};
use courier_core::{DeliveryRequest, GeoCoordinate, StreetMap};
use courier_solver::{
    AStarRouter, AnnealingOptimizer, DeliveryCommand, DeliveryPlan, DeliveryPlanner, PlanError,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const SPACING: f64 = 0.01;
const SEED: u64 = 17;

#[derive(Debug, Default)]
struct PlannerWorld {
    map: RefCell<StreetMap>,
    depot: RefCell<Option<GeoCoordinate>>,
    deliveries: RefCell<Vec<DeliveryRequest>>,
    outcome: RefCell<Option<Result<DeliveryPlan, PlanError>>>,
}

impl PlannerWorld {
    fn plan(&self) -> DeliveryPlan {
        self.outcome
            .borrow()
            .clone()
            .expect("planning was attempted")
            .expect("planning succeeded")
    }

    fn error(&self) -> PlanError {
        self.outcome
            .borrow()
            .clone()
            .expect("planning was attempted")
            .expect_err("planning failed")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn parse_vertex(text: &str) -> (u32, u32) {
    let (row, column) = text.trim().split_once(',').expect("vertex as row,column");
    (
        row.trim().parse().expect("numeric row"),
        column.trim().parse().expect("numeric column"),
    )
}

#[given("a {rows} by {columns} street grid with the depot at vertex {depot}")]
fn given_grid_and_depot(world: &PlannerWorld, rows: u32, columns: u32, depot: String) {
    world.map.replace(grid_map(rows, columns, SPACING));
    let (row, column) = parse_vertex(&depot);
    world
        .depot
        .replace(Some(grid_coordinate(row, column, SPACING)));
}

#[given("deliveries at vertices {vertices}")]
fn given_grid_deliveries(world: &PlannerWorld, vertices: String) {
    let mut deliveries = world.deliveries.borrow_mut();
    for (index, vertex) in vertices.split(" and ").enumerate() {
        let (row, column) = parse_vertex(vertex);
        deliveries.push(DeliveryRequest::new(
            grid_coordinate(row, column, SPACING),
            format!("parcel-{index}"),
        ));
    }
}

#[given("a delivery at {location}")]
fn given_delivery_at(world: &PlannerWorld, location: String) {
    let coordinate: GeoCoordinate = location
        .trim_matches('"')
        .parse()
        .expect("feature uses a valid coordinate");
    world
        .deliveries
        .borrow_mut()
        .push(DeliveryRequest::new(coordinate, "stray parcel"));
}

#[when("I plan the deliveries")]
fn when_plan(world: &PlannerWorld) {
    let map = world.map.borrow();
    let planner = DeliveryPlanner::new(AStarRouter::new(&*map), AnnealingOptimizer::new(SEED));
    let depot = world.depot.borrow().clone().expect("depot configured");
    let outcome = planner.plan(&depot, &world.deliveries.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the plan delivers {count} items")]
fn then_delivers(world: &PlannerWorld, count: usize) {
    assert_eq!(world.plan().delivery_count(), count);
}

#[then("the plan's total distance equals the sum of its proceed commands")]
fn then_total_matches(world: &PlannerWorld) {
    let plan = world.plan();
    let proceeds: f64 = plan
        .commands
        .iter()
        .filter_map(|command| match command {
            DeliveryCommand::Proceed { distance_miles, .. } => Some(*distance_miles),
            _ => None,
        })
        .sum();
    assert!((plan.total_distance_miles - proceeds).abs() < 1e-9);
}

#[then("the last command is a proceed command")]
fn then_returns_to_depot(world: &PlannerWorld) {
    let plan = world.plan();
    assert!(matches!(
        plan.commands.last(),
        Some(DeliveryCommand::Proceed { .. })
    ));
}

#[then("planning fails with an invalid location")]
fn then_invalid_location(world: &PlannerWorld) {
    assert!(matches!(world.error(), PlanError::InvalidLocation { .. }));
}

#[then("planning fails because there are no deliveries")]
fn then_no_deliveries(world: &PlannerWorld) {
    assert_eq!(world.error(), PlanError::EmptyDeliveries);
}

#[scenario(path = "tests/features/delivery_planner.feature", index = 0)]
fn every_delivery_is_made(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/delivery_planner.feature", index = 1)]
fn off_map_delivery_fails(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/delivery_planner.feature", index = 2)]
fn empty_delivery_list_fails(world: PlannerWorld) {
    let _ = world;
}
