//! Multi-stop delivery planning.
//!
//! [`DeliveryPlanner`] orders the stops with an [`OrderOptimizer`], routes
//! every leg of the depot-to-depot tour with a [`PathFinder`] and turns the
//! travelled segments into [`DeliveryCommand`]s.

mod commands;

use std::iter;

use courier_core::{
    DeliveryRequest, GeoCoordinate, Leg, OptimizeError, OptimizeReport, OrderOptimizer,
    PathFinder, RouteError,
};
use thiserror::Error;

pub use commands::{DeliveryCommand, Heading, TurnDirection, segment_angle, turn_angle};

/// A complete turn-by-turn plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPlan {
    /// Instructions in travel order.
    pub commands: Vec<DeliveryCommand>,
    /// Road distance of the whole tour in miles.
    pub total_distance_miles: f64,
    /// Straight-line tour lengths before and after reordering.
    pub crow_flight: OptimizeReport,
}

impl DeliveryPlan {
    /// Number of `Deliver` commands.
    #[must_use]
    pub fn delivery_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DeliveryCommand::Deliver { .. }))
            .count()
    }
}

/// Errors returned by [`DeliveryPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No deliveries were supplied.
    #[error("at least one delivery is required")]
    EmptyDeliveries,
    /// The order optimiser rejected its input.
    #[error("failed to order deliveries: {0}")]
    Optimize(#[from] OptimizeError),
    /// The depot or a delivery is not on the street map.
    #[error("{coordinate} is not on any street")]
    InvalidLocation {
        /// The unknown coordinate.
        coordinate: GeoCoordinate,
    },
    /// A leg of the tour could not be routed.
    #[error("no route from {start} to {end}")]
    NoRoute {
        /// Origin of the failing leg.
        start: GeoCoordinate,
        /// Destination of the failing leg.
        end: GeoCoordinate,
    },
    /// A leg search hit the router's expansion budget.
    #[error("search from {start} to {end} gave up after {expansions} expansions")]
    SearchBudgetExhausted {
        /// Origin of the failing leg.
        start: GeoCoordinate,
        /// Destination of the failing leg.
        end: GeoCoordinate,
        /// Expansions performed before giving up.
        expansions: usize,
    },
}

impl PlanError {
    fn from_route(error: RouteError, start: &GeoCoordinate, end: &GeoCoordinate) -> Self {
        match error {
            RouteError::InvalidLocation { coordinate } => Self::InvalidLocation { coordinate },
            RouteError::NoRoute { start, end } => Self::NoRoute { start, end },
            RouteError::BudgetExhausted { expansions } => Self::SearchBudgetExhausted {
                start: start.clone(),
                end: end.clone(),
                expansions,
            },
        }
    }
}

/// Plans depot-to-depot delivery tours.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryRequest, GeoCoordinate, StreetMap, StreetSegment};
/// use courier_solver::{AStarRouter, AnnealingOptimizer, DeliveryPlanner};
///
/// let depot: GeoCoordinate = "34.00 -118.00".parse()?;
/// let shop: GeoCoordinate = "34.01 -118.00".parse()?;
/// let map = StreetMap::from_segments([StreetSegment::new(depot.clone(), shop.clone(), "Main St")]);
/// let planner = DeliveryPlanner::new(AStarRouter::new(&map), AnnealingOptimizer::new(1));
///
/// let plan = planner
///     .plan(&depot, &[DeliveryRequest::new(shop, "flowers")])
///     .expect("both ends are on Main St");
/// let lines: Vec<String> = plan.commands.iter().map(ToString::to_string).collect();
/// assert_eq!(lines[0], "Proceed north on Main St for 0.69 miles");
/// assert_eq!(lines[1], "Deliver flowers");
/// assert_eq!(lines[2], "Proceed south on Main St for 0.69 miles");
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryPlanner<P, O> {
    router: P,
    optimizer: O,
}

impl<P, O> DeliveryPlanner<P, O>
where
    P: PathFinder,
    O: OrderOptimizer,
{
    /// Planner using `router` for legs and `optimizer` for stop order.
    pub const fn new(router: P, optimizer: O) -> Self {
        Self { router, optimizer }
    }

    /// The leg router.
    #[must_use]
    pub const fn router(&self) -> &P {
        &self.router
    }

    /// The stop-order optimiser.
    #[must_use]
    pub const fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Plan a tour from `depot` through every delivery and back.
    ///
    /// `deliveries` is copied before reordering; the caller's slice is not
    /// modified.
    ///
    /// # Errors
    /// [`PlanError::EmptyDeliveries`] for an empty list,
    /// [`PlanError::InvalidLocation`] if the depot or a stop is off the map,
    /// [`PlanError::NoRoute`] or [`PlanError::SearchBudgetExhausted`] if a
    /// leg cannot be routed, and [`PlanError::Optimize`] if ordering fails.
    pub fn plan(
        &self,
        depot: &GeoCoordinate,
        deliveries: &[DeliveryRequest],
    ) -> Result<DeliveryPlan, PlanError> {
        if deliveries.is_empty() {
            return Err(PlanError::EmptyDeliveries);
        }
        let mut ordered = deliveries.to_vec();
        let crow_flight = self.optimizer.optimize(depot, &mut ordered)?;

        for coordinate in iter::once(depot).chain(ordered.iter().map(|d| &d.location)) {
            if !self.router.is_routable(coordinate) {
                return Err(PlanError::InvalidLocation {
                    coordinate: coordinate.clone(),
                });
            }
        }

        let waypoints: Vec<&GeoCoordinate> = iter::once(depot)
            .chain(ordered.iter().map(|d| &d.location))
            .chain(iter::once(depot))
            .collect();
        let legs = self.route_legs(&waypoints)?;

        let mut commands = Vec::new();
        for (index, leg) in legs.iter().enumerate() {
            commands::push_leg_commands(&leg.segments, &mut commands);
            if let Some(stop) = ordered.get(index) {
                commands.push(DeliveryCommand::Deliver {
                    item: stop.item.clone(),
                });
            }
        }
        let total_distance_miles: f64 = legs.iter().map(|leg| leg.distance_miles).sum();

        log::debug!(
            "planned {} deliveries over {} legs: {total_distance_miles:.3} miles",
            ordered.len(),
            legs.len()
        );
        Ok(DeliveryPlan {
            commands,
            total_distance_miles,
            crow_flight,
        })
    }

    fn route_leg(&self, start: &GeoCoordinate, end: &GeoCoordinate) -> Result<Leg, PlanError> {
        self.router
            .route(start, end)
            .map_err(|error| PlanError::from_route(error, start, end))
    }

    #[cfg(not(feature = "parallel"))]
    fn route_legs(&self, waypoints: &[&GeoCoordinate]) -> Result<Vec<Leg>, PlanError> {
        waypoints
            .iter()
            .zip(waypoints.iter().skip(1))
            .map(|(start, end)| self.route_leg(start, end))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn route_legs(&self, waypoints: &[&GeoCoordinate]) -> Result<Vec<Leg>, PlanError> {
        use rayon::prelude::*;

        let pairs: Vec<(&GeoCoordinate, &GeoCoordinate)> = waypoints
            .iter()
            .copied()
            .zip(waypoints.iter().copied().skip(1))
            .collect();
        pairs
            .par_iter()
            .map(|(start, end)| self.route_leg(start, end))
            .collect()
    }
}
