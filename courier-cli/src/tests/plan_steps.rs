//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{InputFiles, corner_directions, write_utf8};
use super::*;
use crate::plan::run_plan_with;
use courier_solver::{DeliveryPlan, PlanError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct PlanWorld {
    files: InputFiles,
    include_map: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        Self {
            files: InputFiles::new(),
            include_map: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "courier".to_owned(),
            "plan".to_owned(),
            self.files.deliveries.as_str().to_owned(),
        ];
        if *self.include_map.borrow() {
            argv.extend([format!("--{ARG_PLAN_MAP}"), self.files.map.as_str().to_owned()]);
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

#[given("a street map and deliveries exist on disk")]
fn inputs_exist(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.files.map, super::helpers::CORNER_MAP.as_bytes());
    write_utf8(
        &world.files.deliveries,
        super::helpers::CORNER_DELIVERIES.as_bytes(),
    );
}

#[given("I request JSON output")]
fn request_json(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_FORMAT}"), "json".to_owned()]);
}

#[given("I omit the map path")]
fn omit_map(#[from(world)] world: &PlanWorld) {
    *world.include_map.borrow_mut() = false;
}

#[given("the deliveries include a stop off the map")]
fn stop_off_map(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.files.deliveries, b"0 0\n0.01 0.02:parcel\n5 5:lost\n");
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command prints turn-by-turn directions")]
fn prints_directions(#[from(world)] world: &PlanWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, corner_directions());
}

#[then("the command prints the plan as JSON")]
fn prints_json(#[from(world)] world: &PlanWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let plan: DeliveryPlan =
        serde_json::from_slice(&world.stdout.borrow()).expect("output should be a JSON plan");
    assert_eq!(plan.delivery_count(), 1);
}

#[then("the command fails because the map path is missing")]
fn fails_missing_map(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_PLAN_MAP),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because a stop is off the map")]
fn fails_off_map(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::Plan(PlanError::InvalidLocation { coordinate }) => {
            assert_eq!(coordinate.to_string(), "5 5");
        }
        other => panic!("expected Plan(InvalidLocation), found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_as_text, "planning a tour as text");
register_plan_scenario!(plan_as_json, "planning a tour as JSON");
register_plan_scenario!(plan_missing_map, "rejecting a missing map path");
register_plan_scenario!(plan_off_map_stop, "rejecting stops off the street map");
