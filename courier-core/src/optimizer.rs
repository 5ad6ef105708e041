//! Delivery-order optimisation contract.
//!
//! An [`OrderOptimizer`] reorders stops in place to shorten the straight-line
//! tour that starts and ends at the depot. It reports the tour length before
//! and after so callers can judge the gain.

use thiserror::Error;

use crate::{DeliveryRequest, GeoCoordinate};

/// Outcome of one optimisation call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeReport {
    /// Crow-flight tour length of the order supplied by the caller, in miles.
    pub original_miles: f64,
    /// Crow-flight tour length of the order written back, in miles.
    pub optimized_miles: f64,
    /// Candidate moves evaluated.
    pub iterations: u32,
}

/// Errors returned by [`OrderOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// There was nothing to order.
    #[error("at least one delivery is required")]
    EmptyDeliveries,
    /// The optimiser's parameters cannot produce a search.
    #[error("invalid annealing schedule: {0}")]
    InvalidSchedule(&'static str),
}

/// Reorder deliveries to shorten the depot-to-depot tour.
pub trait OrderOptimizer: Send + Sync {
    /// Reorder `deliveries` in place.
    ///
    /// The slice is written once, after the search finishes; on error it is
    /// left untouched.
    fn optimize(
        &self,
        depot: &GeoCoordinate,
        deliveries: &mut [DeliveryRequest],
    ) -> Result<OptimizeReport, OptimizeError>;
}

/// Great-circle length of `depot → stops… → depot` in miles.
///
/// An empty stop list has length zero.
///
/// # Examples
/// ```
/// use courier_core::{tour_length_miles, DeliveryRequest, GeoCoordinate};
///
/// let depot: GeoCoordinate = "0 0".parse()?;
/// let stop = DeliveryRequest::new("0 1".parse()?, "parcel");
/// let out_and_back = 2.0 * depot.distance_miles(&stop.location);
/// assert!((tour_length_miles(&depot, &[stop]) - out_and_back).abs() < 1e-9);
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[must_use]
pub fn tour_length_miles(depot: &GeoCoordinate, stops: &[DeliveryRequest]) -> f64 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    let between: f64 = stops
        .windows(2)
        .map(|pair| match pair {
            [from, to] => from.location.distance_miles(&to.location),
            _ => 0.0,
        })
        .sum();
    depot.distance_miles(&first.location) + between + last.location.distance_miles(depot)
}
