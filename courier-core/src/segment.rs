//! Street segments and delivery stops.

use std::fmt;
use std::sync::Arc;

use crate::GeoCoordinate;

/// A directed piece of street between two coordinates.
///
/// Maps store every segment together with its [`reversed`](Self::reversed)
/// counterpart, so the graph is effectively undirected.
///
/// # Examples
/// ```
/// use courier_core::{GeoCoordinate, StreetSegment};
///
/// let a: GeoCoordinate = "34.0 -118.0".parse()?;
/// let b: GeoCoordinate = "34.1 -118.0".parse()?;
/// let segment = StreetSegment::new(a.clone(), b.clone(), "Main St");
/// let back = segment.reversed();
/// assert_eq!(back.start, b);
/// assert_eq!(back.end, a);
/// assert_eq!(back.street_name(), "Main St");
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSegment {
    /// Where the segment begins.
    pub start: GeoCoordinate,
    /// Where the segment ends.
    pub end: GeoCoordinate,
    /// Street the segment belongs to; shared between a segment and its reverse.
    pub street: Arc<str>,
}

impl StreetSegment {
    /// Construct a segment from `start` to `end` on `street`.
    pub fn new(start: GeoCoordinate, end: GeoCoordinate, street: impl Into<Arc<str>>) -> Self {
        Self {
            start,
            end,
            street: street.into(),
        }
    }

    /// The same street traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            street: Arc::clone(&self.street),
        }
    }

    /// Name of the street.
    #[must_use]
    pub fn street_name(&self) -> &str {
        &self.street
    }

    /// Great-circle length of the segment in miles.
    #[must_use]
    pub fn length_miles(&self) -> f64 {
        self.start.distance_miles(&self.end)
    }
}

impl fmt::Display for StreetSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.street, self.start, self.end)
    }
}

/// A stop to visit and the item to hand over there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRequest {
    /// Where the item is delivered.
    pub location: GeoCoordinate,
    /// What is delivered.
    pub item: String,
}

impl DeliveryRequest {
    /// Construct a delivery of `item` to `location`.
    pub fn new(location: GeoCoordinate, item: impl Into<String>) -> Self {
        Self {
            location,
            item: item.into(),
        }
    }
}
