//! Facade crate for courier delivery planning.
//!
//! This crate re-exports the core domain types and exposes the solver and
//! file loaders behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    DeliveryRequest, GeoCoordinate, GeoCoordinateError, Leg, OptimizeError, OptimizeReport,
    OrderOptimizer, PathFinder, RouteError, StreetGraph, StreetMap, StreetSegment,
};

#[cfg(feature = "solver")]
pub use courier_solver::{
    AStarRouter, AnnealingOptimizer, AnnealingSchedule, DeliveryCommand, DeliveryPlan,
    DeliveryPlanner, PlanError, RouterConfig,
};

#[cfg(feature = "loaders")]
pub use courier_data::{
    DeliveryLoadError, DeliveryManifest, MapLoadError, load_deliveries, load_street_map,
};
