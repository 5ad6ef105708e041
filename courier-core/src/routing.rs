//! Point-to-point routing contract.

use thiserror::Error;

use crate::{GeoCoordinate, StreetSegment};

/// One travelled leg: the segments from start to end and their total length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Segments in travel order; `segments[i].end == segments[i + 1].start`.
    pub segments: Vec<StreetSegment>,
    /// Sum of segment lengths in miles.
    pub distance_miles: f64,
}

impl Leg {
    /// A leg that goes nowhere.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
            distance_miles: 0.0,
        }
    }

    /// Build a leg from ordered segments, summing their lengths.
    #[must_use]
    pub fn from_segments(segments: Vec<StreetSegment>) -> Self {
        let distance_miles = segments.iter().map(StreetSegment::length_miles).sum();
        Self {
            segments,
            distance_miles,
        }
    }

    /// Whether the leg has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Errors returned by [`PathFinder::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A coordinate is not a vertex of the street graph.
    #[error("{coordinate} is not on any street")]
    InvalidLocation {
        /// The unknown coordinate.
        coordinate: GeoCoordinate,
    },
    /// Both endpoints are valid but no street path joins them.
    #[error("no route from {start} to {end}")]
    NoRoute {
        /// Requested origin.
        start: GeoCoordinate,
        /// Requested destination.
        end: GeoCoordinate,
    },
    /// The search expanded more nodes than its configured budget allows.
    #[error("search gave up after {expansions} expansions")]
    BudgetExhausted {
        /// Expansions performed before giving up.
        expansions: usize,
    },
}

/// Find street paths between coordinates.
///
/// Implementations must be `Send + Sync` so legs can be routed concurrently.
pub trait PathFinder: Send + Sync {
    /// Shortest path from `start` to `end`.
    ///
    /// Returns an empty leg when `start == end`.
    fn route(&self, start: &GeoCoordinate, end: &GeoCoordinate) -> Result<Leg, RouteError>;

    /// Whether `coordinate` can take part in a route at all.
    fn is_routable(&self, coordinate: &GeoCoordinate) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coordinate(text: &str) -> GeoCoordinate {
        text.parse().expect("valid coordinate")
    }

    #[rstest]
    fn leg_distance_sums_segments() {
        let a = coordinate("0 0");
        let b = coordinate("0 0.01");
        let c = coordinate("0.01 0.01");
        let first = StreetSegment::new(a, b.clone(), "Alpha");
        let second = StreetSegment::new(b, c, "Beta");
        let expected = first.length_miles() + second.length_miles();
        let leg = Leg::from_segments(vec![first, second]);
        assert!((leg.distance_miles - expected).abs() < 1e-12);
        assert!(!leg.is_empty());
    }

    #[rstest]
    fn empty_leg_has_zero_distance() {
        let leg = Leg::empty();
        assert!(leg.is_empty());
        assert!(leg.distance_miles.abs() < f64::EPSILON);
    }

    #[rstest]
    fn errors_name_the_coordinates() {
        let err = RouteError::InvalidLocation {
            coordinate: coordinate("1 2"),
        };
        assert_eq!(err.to_string(), "1 2 is not on any street");
    }
}
