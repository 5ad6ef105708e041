//! Test-only utilities for `courier-solver`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use courier_core::{
    DeliveryRequest, GeoCoordinate, OptimizeError, OptimizeReport, OrderOptimizer,
    tour_length_miles,
};

/// An [`OrderOptimizer`] that leaves the caller's order untouched.
///
/// Lets planner tests predict the exact command sequence.
///
/// # Examples
/// ```rust
/// use courier_core::{DeliveryRequest, OrderOptimizer};
/// use courier_solver::test_support::KeepOrder;
///
/// let depot = "0 0".parse().expect("valid");
/// let mut stops = vec![
///     DeliveryRequest::new("0 2".parse().expect("valid"), "far"),
///     DeliveryRequest::new("0 1".parse().expect("valid"), "near"),
/// ];
/// let report = KeepOrder.optimize(&depot, &mut stops).expect("non-empty");
/// assert_eq!(stops[0].item, "far");
/// assert_eq!(report.iterations, 0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepOrder;

impl OrderOptimizer for KeepOrder {
    fn optimize(
        &self,
        depot: &GeoCoordinate,
        deliveries: &mut [DeliveryRequest],
    ) -> Result<OptimizeReport, OptimizeError> {
        if deliveries.is_empty() {
            return Err(OptimizeError::EmptyDeliveries);
        }
        let miles = tour_length_miles(depot, deliveries);
        Ok(OptimizeReport {
            original_miles: miles,
            optimized_miles: miles,
            iterations: 0,
        })
    }
}

/// Parse a `"<lat> <lon>"` literal.
///
/// # Panics
/// Panics if `text` is not a valid coordinate.
#[must_use]
#[expect(clippy::expect_used, reason = "test helper fails loudly on bad fixtures")]
pub fn coordinate(text: &str) -> GeoCoordinate {
    text.parse().expect("valid coordinate literal")
}

/// Delivery of `item` at the `"<lat> <lon>"` literal `location`.
///
/// # Panics
/// Panics if `location` is not a valid coordinate.
#[must_use]
pub fn delivery(location: &str, item: &str) -> DeliveryRequest {
    DeliveryRequest::new(coordinate(location), item)
}
