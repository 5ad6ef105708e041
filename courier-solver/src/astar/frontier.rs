//! Open set for the A* search.
//!
//! Heap entries are never removed early. The store keeps the best node per
//! coordinate, and entries that no longer match it are dropped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use courier_core::{ExpandableMap, GeoCoordinate, StreetSegment};

/// Search state for one coordinate.
#[derive(Debug, Clone)]
pub(super) struct SearchNode {
    /// Travelled distance from the origin, in miles.
    pub(super) cost: f64,
    /// `cost` plus the straight-line estimate to the goal.
    pub(super) estimated_total: f64,
    /// Segment that reached this coordinate; `None` only for the origin.
    pub(super) incoming: Option<StreetSegment>,
}

impl SearchNode {
    pub(super) const fn origin(estimate: f64) -> Self {
        Self {
            cost: 0.0,
            estimated_total: estimate,
            incoming: None,
        }
    }
}

#[derive(Debug)]
struct FrontierEntry {
    estimated_total: f64,
    sequence: u64,
    coordinate: GeoCoordinate,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so `BinaryHeap` pops the lowest estimate, oldest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_total
            .total_cmp(&self.estimated_total)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Default)]
pub(super) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    best: ExpandableMap<GeoCoordinate, SearchNode>,
    next_sequence: u64,
}

impl Frontier {
    pub(super) fn push(&mut self, coordinate: GeoCoordinate, node: SearchNode) {
        self.heap.push(FrontierEntry {
            estimated_total: node.estimated_total,
            sequence: self.next_sequence,
            coordinate: coordinate.clone(),
        });
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.best.associate(coordinate, node);
    }

    /// Lowest-estimate live entry, skipping stale ones.
    pub(super) fn pop(&mut self) -> Option<(GeoCoordinate, SearchNode)> {
        while let Some(entry) = self.heap.pop() {
            let Some(node) = self.best.find(&entry.coordinate) else {
                continue;
            };
            if node.estimated_total < entry.estimated_total {
                continue;
            }
            let node = node.clone();
            return Some((entry.coordinate, node));
        }
        None
    }

    /// Whether `coordinate` is already queued with a strictly lower estimate.
    pub(super) fn has_better(&self, coordinate: &GeoCoordinate, estimated_total: f64) -> bool {
        self.best
            .find(coordinate)
            .is_some_and(|node| node.estimated_total < estimated_total)
    }
}
