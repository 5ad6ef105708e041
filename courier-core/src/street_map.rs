//! Street-graph adjacency.
//!
//! [`StreetGraph`] is the only boundary the path search consumes: given a
//! coordinate it returns the segments that start there. [`StreetMap`] is the
//! in-memory implementation built from loaded segments.

use crate::store::{DefaultKeyHasher, ExpandableMap};
use crate::{GeoCoordinate, StreetSegment};

/// Read-only adjacency over street segments.
///
/// Unknown coordinates yield an empty slice. Implementations must be safe to
/// query from several threads at once, since independent searches may share
/// one graph.
pub trait StreetGraph: Send + Sync {
    /// Segments whose `start` equals `coordinate`.
    fn outgoing_segments(&self, coordinate: &GeoCoordinate) -> &[StreetSegment];

    /// Whether `coordinate` is a vertex with at least one outgoing segment.
    fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        !self.outgoing_segments(coordinate).is_empty()
    }
}

impl<G: StreetGraph + ?Sized> StreetGraph for &G {
    fn outgoing_segments(&self, coordinate: &GeoCoordinate) -> &[StreetSegment] {
        (**self).outgoing_segments(coordinate)
    }
}

/// Street segments indexed by start coordinate.
///
/// Every inserted segment is stored with its reverse so the map is
/// effectively undirected.
///
/// # Examples
/// ```
/// use courier_core::{GeoCoordinate, StreetGraph, StreetMap, StreetSegment};
///
/// let a: GeoCoordinate = "34.0 -118.0".parse()?;
/// let b: GeoCoordinate = "34.1 -118.0".parse()?;
/// let map = StreetMap::from_segments([StreetSegment::new(a.clone(), b.clone(), "Main St")]);
///
/// assert_eq!(map.outgoing_segments(&a).len(), 1);
/// assert_eq!(map.outgoing_segments(&b)[0].end, a);
/// assert_eq!(map.segment_count(), 2);
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Default)]
pub struct StreetMap {
    adjacency: ExpandableMap<GeoCoordinate, Vec<StreetSegment>, DefaultKeyHasher>,
    segment_count: usize,
}

impl StreetMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from segments, adding each one's reverse.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = StreetSegment>,
    {
        let mut map = Self::new();
        for segment in segments {
            map.insert(segment);
        }
        map
    }

    /// Add `segment` and its reverse.
    pub fn insert(&mut self, segment: StreetSegment) {
        let reverse = segment.reversed();
        self.push(segment);
        self.push(reverse);
    }

    fn push(&mut self, segment: StreetSegment) {
        if let Some(outgoing) = self.adjacency.find_mut(&segment.start) {
            outgoing.push(segment);
        } else {
            self.adjacency.associate(segment.start.clone(), vec![segment]);
        }
        self.segment_count += 1;
    }

    /// Number of stored directed segments (twice the inserted count).
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Number of distinct coordinates with outgoing segments.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Every stored directed segment, in unspecified order.
    pub fn segments(&self) -> impl Iterator<Item = &StreetSegment> + '_ {
        self.adjacency.iter().flat_map(|(_, outgoing)| outgoing.iter())
    }
}

impl StreetGraph for StreetMap {
    fn outgoing_segments(&self, coordinate: &GeoCoordinate) -> &[StreetSegment] {
        self.adjacency
            .find(coordinate)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl FromIterator<StreetSegment> for StreetMap {
    fn from_iter<T: IntoIterator<Item = StreetSegment>>(iter: T) -> Self {
        Self::from_segments(iter)
    }
}
