//! Text loaders for courier street maps and delivery manifests.
//!
//! Responsibilities:
//! - Parse street map records into a [`courier_core::StreetMap`].
//! - Parse a depot and its deliveries into a [`DeliveryManifest`].
//! - Report failures with the offending line number.
//!
//! Boundaries:
//! - Files are opened through `cap-std` with UTF-8 paths from `camino`.
//! - No routing or ordering happens here; see `courier-solver`.

#![forbid(unsafe_code)]

mod deliveries;
mod fs;
mod lines;
mod map;

pub use deliveries::{DeliveryLoadError, DeliveryManifest, load_deliveries, parse_deliveries};
pub use fs::{is_regular_file, open_input};
pub use map::{MapLoadError, load_street_map, parse_street_map};
