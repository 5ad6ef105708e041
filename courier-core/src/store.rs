//! Chained hash table with a caller-supplied hash strategy.
//!
//! [`ExpandableMap`] backs the street-graph adjacency index and the
//! frontier/explored sets of the path search. It keeps its load factor at or
//! below a configured maximum by doubling and rehashing before an insertion of
//! a new key would exceed it. There is no removal; [`ExpandableMap::reset`]
//! is the only way to shrink.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Number of buckets in a new or reset map.
pub const INITIAL_CAPACITY: usize = 8;

/// Maximum load factor used by [`ExpandableMap::new`].
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.5;

/// Smallest maximum load factor [`ExpandableMap::with_load_factor`] accepts.
///
/// At this factor one entry already needs 1024 buckets.
pub const MIN_MAX_LOAD_FACTOR: f64 = 1.0 / 1024.0;

/// Hash strategy for keys of type `K`.
///
/// Implementations must be deterministic and consistent with `K`'s
/// equality: equal keys hash equally. Closures `Fn(&K) -> u64` implement the
/// trait directly.
pub trait KeyHasher<K: ?Sized> {
    /// Hash `key` to a bucket-independent 64-bit value.
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K) -> u64,
{
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Hashes any `Hash` key with a fixed-key SipHash, so results are stable
/// across map instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultKeyHasher;

impl<K: Hash + ?Sized> KeyHasher<K> for DefaultKeyHasher {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Errors returned when configuring an [`ExpandableMap`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StoreError {
    /// The maximum load factor must be finite and at least
    /// [`MIN_MAX_LOAD_FACTOR`].
    #[error("maximum load factor must be finite and at least 1/1024, got {0}")]
    InvalidLoadFactor(f64),
}

/// Bucketed hash map that grows by doubling.
///
/// Instances own their buckets exclusively; the type is deliberately not
/// `Clone`.
///
/// # Examples
/// ```
/// use courier_core::store::ExpandableMap;
///
/// let mut map = ExpandableMap::new();
/// map.associate("depot", 1);
/// map.associate("depot", 2);
/// assert_eq!(map.find(&"depot"), Some(&2));
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.find(&"missing"), None);
/// ```
pub struct ExpandableMap<K, V, H = DefaultKeyHasher> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    max_load_factor: f64,
    hasher: H,
}

impl<K, V> ExpandableMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty map with [`DefaultKeyHasher`] and the default load factor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultKeyHasher)
    }
}

impl<K, V> Default for ExpandableMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> ExpandableMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K>,
{
    /// Empty map using `hasher` and the default load factor.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            buckets: empty_buckets(INITIAL_CAPACITY),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher,
        }
    }

    /// Empty map using `hasher` and an explicit maximum load factor.
    ///
    /// # Errors
    /// [`StoreError::InvalidLoadFactor`] unless the factor is finite and at
    /// least [`MIN_MAX_LOAD_FACTOR`].
    pub fn with_load_factor(hasher: H, max_load_factor: f64) -> Result<Self, StoreError> {
        if !max_load_factor.is_finite() || max_load_factor < MIN_MAX_LOAD_FACTOR {
            return Err(StoreError::InvalidLoadFactor(max_load_factor));
        }
        let mut map = Self::with_hasher(hasher);
        map.max_load_factor = max_load_factor;
        Ok(map)
    }

    /// Insert `value` for `key`, replacing any previous association.
    ///
    /// Growth happens before a new key is placed, so the load factor never
    /// exceeds the configured maximum once this returns.
    pub fn associate(&mut self, key: K, value: V) {
        if let Some(existing) = self.find_mut(&key) {
            *existing = value;
            return;
        }
        self.reserve_for(self.len + 1);
        let index = self.bucket_index(&key);
        self.buckets[index].push((key, value));
        self.len += 1;
    }

    /// Value associated with `key`, if any.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Mutable access to the value associated with `key`, if any.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Whether `key` has an association.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Drop every entry and return to [`INITIAL_CAPACITY`] buckets.
    pub fn reset(&mut self) {
        self.buckets = empty_buckets(INITIAL_CAPACITY);
        self.len = 0;
    }

    fn bucket_index(&self, key: &K) -> usize {
        let capacity = self.buckets.len() as u64;
        // The remainder is below the bucket count, which is a `usize`.
        (self.hasher.hash_key(key) % capacity) as usize
    }

    fn reserve_for(&mut self, entries: usize) {
        let mut capacity = self.buckets.len();
        while exceeds(entries, capacity, self.max_load_factor) {
            let Some(doubled) = capacity.checked_mul(2) else {
                break;
            };
            capacity = doubled;
        }
        if capacity != self.buckets.len() {
            self.rehash(capacity);
        }
    }

    fn rehash(&mut self, capacity: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K, V, H> ExpandableMap<K, V, H> {
    /// Number of distinct keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Configured maximum load factor.
    #[must_use]
    pub const fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Entries per bucket right now.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        ratio(self.len, self.buckets.len())
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|(key, value)| (key, value))
    }
}

impl<K, V, H> fmt::Debug for ExpandableMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableMap")
            .field("len", &self.len)
            .field("capacity", &self.buckets.len())
            .field("max_load_factor", &self.max_load_factor)
            .finish_non_exhaustive()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<(K, V)>> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}

fn ratio(entries: usize, capacity: usize) -> f64 {
    entries as f64 / capacity as f64
}

fn exceeds(entries: usize, capacity: usize, max_load_factor: f64) -> bool {
    ratio(entries, capacity) > max_load_factor
}
