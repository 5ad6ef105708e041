//! A* shortest-path search over a [`StreetGraph`].
//!
//! The heuristic is the great-circle distance to the goal, which never
//! exceeds any road distance. The goal test happens when a successor is
//! generated, so the search returns as soon as an expanded coordinate has a
//! segment ending at the goal.

mod frontier;

use courier_core::{
    ExpandableMap, GeoCoordinate, Leg, PathFinder, RouteError, StreetGraph, StreetSegment,
    great_circle_miles,
};

use frontier::{Frontier, SearchNode};

/// Configuration for [`AStarRouter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Upper bound on node expansions per search; `None` searches until the
    /// frontier is empty.
    pub max_expansions: Option<usize>,
}

impl RouterConfig {
    /// Bound each search to `limit` expansions.
    #[must_use]
    pub const fn with_max_expansions(self, limit: usize) -> Self {
        Self {
            max_expansions: Some(limit),
            ..self
        }
    }
}

/// Point-to-point router over a borrowed or owned street graph.
///
/// Each call to [`route`](PathFinder::route) owns its own frontier and
/// explored stores, so one router can serve concurrent searches.
///
/// # Examples
/// ```
/// use courier_core::{GeoCoordinate, PathFinder, StreetMap, StreetSegment};
/// use courier_solver::AStarRouter;
///
/// let a: GeoCoordinate = "34.00 -118.00".parse()?;
/// let b: GeoCoordinate = "34.01 -118.00".parse()?;
/// let map = StreetMap::from_segments([StreetSegment::new(a.clone(), b.clone(), "Main St")]);
/// let router = AStarRouter::new(&map);
///
/// let leg = router.route(&a, &b).expect("adjacent vertices are connected");
/// assert_eq!(leg.segments.len(), 1);
/// assert!((leg.distance_miles - a.distance_miles(&b)).abs() < 1e-9);
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AStarRouter<G> {
    graph: G,
    config: RouterConfig,
}

impl<G: StreetGraph> AStarRouter<G> {
    /// Router with no expansion budget.
    #[must_use]
    pub fn new(graph: G) -> Self {
        Self::with_config(graph, RouterConfig::default())
    }

    /// Router with explicit configuration.
    #[must_use]
    pub const fn with_config(graph: G, config: RouterConfig) -> Self {
        Self { graph, config }
    }

    /// The graph searched by this router.
    #[must_use]
    pub const fn graph(&self) -> &G {
        &self.graph
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> RouterConfig {
        self.config
    }

    fn search(
        &self,
        start: &GeoCoordinate,
        end: &GeoCoordinate,
    ) -> Result<Vec<StreetSegment>, RouteError> {
        let mut frontier = Frontier::default();
        let mut explored: ExpandableMap<GeoCoordinate, SearchNode> = ExpandableMap::new();
        frontier.push(
            start.clone(),
            SearchNode::origin(great_circle_miles(start, end)),
        );
        let mut expansions = 0_usize;

        while let Some((coordinate, node)) = frontier.pop() {
            if explored
                .find(&coordinate)
                .is_some_and(|seen| seen.estimated_total <= node.estimated_total)
            {
                continue;
            }
            if self
                .config
                .max_expansions
                .is_some_and(|limit| expansions >= limit)
            {
                log::debug!("route {start} -> {end}: budget exhausted after {expansions} expansions");
                return Err(RouteError::BudgetExhausted { expansions });
            }
            expansions += 1;

            for segment in self.graph.outgoing_segments(&coordinate) {
                if segment.end == *end {
                    let goal = successor(&node, segment, end);
                    explored.associate(coordinate, node);
                    explored.associate(end.clone(), goal);
                    log::debug!("route {start} -> {end}: found after {expansions} expansions");
                    return reconstruct(&explored, start, end).ok_or_else(|| {
                        RouteError::NoRoute {
                            start: start.clone(),
                            end: end.clone(),
                        }
                    });
                }
                let next = successor(&node, segment, end);
                let superseded = frontier.has_better(&segment.end, next.estimated_total)
                    || explored
                        .find(&segment.end)
                        .is_some_and(|seen| seen.estimated_total < next.estimated_total);
                if !superseded {
                    frontier.push(segment.end.clone(), next);
                }
            }
            explored.associate(coordinate, node);
        }

        log::debug!("route {start} -> {end}: no route after {expansions} expansions");
        Err(RouteError::NoRoute {
            start: start.clone(),
            end: end.clone(),
        })
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "path costs are sums of great-circle distances"
)]
fn successor(parent: &SearchNode, segment: &StreetSegment, goal: &GeoCoordinate) -> SearchNode {
    let cost = parent.cost + segment.length_miles();
    SearchNode {
        cost,
        estimated_total: cost + great_circle_miles(&segment.end, goal),
        incoming: Some(segment.clone()),
    }
}

/// Walk incoming segments back from `end` until one starts at `start`.
///
/// Returns `None` if the back-pointer chain is broken or cyclic.
fn reconstruct(
    explored: &ExpandableMap<GeoCoordinate, SearchNode>,
    start: &GeoCoordinate,
    end: &GeoCoordinate,
) -> Option<Vec<StreetSegment>> {
    let mut path = Vec::new();
    let mut at = end;
    while at != start {
        let Some(segment) = explored.find(at).and_then(|node| node.incoming.as_ref()) else {
            log::warn!("route {start} -> {end}: back-pointer chain broken at {at}");
            debug_assert!(false, "explored node without incoming segment");
            return None;
        };
        if path.len() > explored.len() {
            log::warn!("route {start} -> {end}: back-pointer chain forms a cycle");
            debug_assert!(false, "cyclic back-pointer chain");
            return None;
        }
        path.push(segment.clone());
        at = &segment.start;
    }
    path.reverse();
    Some(path)
}

impl<G: StreetGraph> PathFinder for AStarRouter<G> {
    fn route(&self, start: &GeoCoordinate, end: &GeoCoordinate) -> Result<Leg, RouteError> {
        if start == end {
            return Ok(Leg::empty());
        }
        for coordinate in [start, end] {
            if !self.graph.contains(coordinate) {
                return Err(RouteError::InvalidLocation {
                    coordinate: coordinate.clone(),
                });
            }
        }
        self.search(start, end).map(Leg::from_segments)
    }

    fn is_routable(&self, coordinate: &GeoCoordinate) -> bool {
        self.graph.contains(coordinate)
    }
}
