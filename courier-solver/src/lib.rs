//! Route search, stop ordering and plan assembly for courier.
//!
//! This crate implements the traits from [`courier_core`]:
//!
//! - [`AStarRouter`] is a [`PathFinder`](courier_core::PathFinder) running A*
//!   over any [`StreetGraph`](courier_core::StreetGraph), with an optional
//!   expansion budget.
//! - [`AnnealingOptimizer`] is an
//!   [`OrderOptimizer`](courier_core::OrderOptimizer) that reorders stops by
//!   simulated annealing on straight-line tour length.
//! - [`DeliveryPlanner`] combines the two into a turn-by-turn
//!   [`DeliveryPlan`].
//!
//! With the `parallel` feature the planner routes the legs of a tour
//! concurrently on the `rayon` thread pool. Its tests only build with that
//! feature on, so run the suite with `--all-features` as well.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod annealing;
mod astar;
mod planner;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use annealing::{
    AnnealingOptimizer, AnnealingSchedule, DEFAULT_COOLING_FACTOR, DEFAULT_FINAL_TEMPERATURE,
    DEFAULT_INITIAL_TEMPERATURE, MAX_SCHEDULE_ITERATIONS,
};
pub use astar::{AStarRouter, RouterConfig};
pub use planner::{
    DeliveryCommand, DeliveryPlan, DeliveryPlanner, Heading, PlanError, TurnDirection,
    segment_angle, turn_angle,
};
