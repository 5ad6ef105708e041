//! Core domain types for the courier route planner.
//!
//! Coordinates, street segments and delivery stops live here together with
//! the [`StreetGraph`], [`PathFinder`] and [`OrderOptimizer`] traits that
//! the solver crate implements. The [`store`] module provides the growable
//! hash map every index in the workspace is built on.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
mod optimizer;
mod routing;
mod segment;
pub mod store;
mod street_map;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use coordinate::{Axis, GeoCoordinate, GeoCoordinateError, great_circle_miles};
pub use optimizer::{OptimizeError, OptimizeReport, OrderOptimizer, tour_length_miles};
pub use routing::{Leg, PathFinder, RouteError};
pub use segment::{DeliveryRequest, StreetSegment};
pub use store::{ExpandableMap, StoreError};
pub use street_map::{StreetGraph, StreetMap};
