//! The [`OpenAddressTable`] map

use core::borrow::Borrow;
use core::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::config::{TableConfig, DEFAULT_LOAD_FACTOR};
use crate::raw::RawTable;
use crate::stats::StatisticsGenerator;

#[inline]
fn hash<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hash map with open addressing and linear probing
///
/// Removing an entry leaves a tombstone in its slot: lookups continue past
/// tombstones, while inserting a new key reuses the first tombstone on its
/// probe sequence. Tombstones are only discarded when the table grows, which
/// happens as soon as the number of entries reaches
/// `load_factor * capacity`. The table never shrinks.
///
/// Keys must implement [`Hash`] and [`Eq`] consistently, and a stored key's
/// hash value must not change (e.g. through interior mutability). Otherwise,
/// the results of lookups are unspecified (but never undefined behavior).
#[derive(Clone, Debug)]
pub struct OpenAddressTable<K, V> {
    raw: RawTable<K, V>,
    load_factor: f64,
}

impl<K: Hash + Eq, V> OpenAddressTable<K, V> {
    /// Create an empty table with the default capacity and load factor
    #[inline]
    pub fn new() -> Self {
        Self::with_config(&TableConfig::default())
    }

    /// Create an empty table with `capacity` slots and the default load factor
    ///
    /// An invalid `capacity` is replaced by the default, see
    /// [`TableConfig::initial_capacity`].
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(&TableConfig::new(capacity, DEFAULT_LOAD_FACTOR))
    }

    /// Create an empty table with `capacity` slots that grows once the number
    /// of entries reaches `load_factor * capacity`
    ///
    /// Invalid values are replaced by the defaults, see [`TableConfig`].
    #[inline]
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_config(&TableConfig::new(capacity, load_factor))
    }

    /// Create an empty table from `config`
    pub fn with_config(config: &TableConfig) -> Self {
        OpenAddressTable {
            raw: RawTable::with_slots(config.capacity_or_default(RawTable::<K, V>::MAX_SLOTS)),
            load_factor: config.load_factor_or_default(),
        }
    }

    /// Insert `value` for `key`, returning the previous value if `key` was
    /// already present
    ///
    /// If the key was present, the stored key is kept and only the value is
    /// replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash(&key);
        match self.raw.find_or_find_insert_slot(hash, |k| *k == key) {
            Ok(slot) => Some(self.raw.replace_at_slot(slot, value)),
            Err(slot) => {
                self.raw.insert_in_slot(hash, slot, key, value);
                if self.is_full() {
                    self.raw.grow();
                }
                None
            }
        }
    }

    /// Get a reference to the value for `key`
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(hash(key), |k| key.eq(k.borrow()))
    }

    /// Get a mutable reference to the value for `key`
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get_mut(hash(key), |k| key.eq(k.borrow()))
    }

    /// Returns `true` iff the table contains an entry for `key`
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.find(hash(key), |k| key.eq(k.borrow())).is_some()
    }

    /// Remove the entry for `key`, returning its value
    ///
    /// The entry's slot becomes a tombstone.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, value) = self.raw.remove_entry(hash(key), |k| key.eq(k.borrow()))?;
        Some(value)
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.load_factor * self.raw.slots() as f64 <= self.raw.len() as f64
    }
}

impl<K, V> OpenAddressTable<K, V> {
    /// Get the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Same as [`Self::len()`]
    #[inline]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` iff the table contains no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Get the number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.slots()
    }

    /// Get the load factor
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Get the number of tombstones left behind by removals since the last
    /// growth (or [`Self::clear()`])
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.raw.tombstones()
    }

    /// Remove all entries and tombstones, keeping the capacity
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear()
    }
}

impl<K: Hash + Eq, V> Default for OpenAddressTable<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> StatisticsGenerator for OpenAddressTable<K, V> {
    #[cfg(not(feature = "statistics"))]
    fn print_stats(&self) {}

    #[cfg(feature = "statistics")]
    fn print_stats(&self) {
        let slots = self.raw.slots();
        let c = crate::stats::take();
        println!(
            "[OpenAddressTable] fill level: {:.2} %, tombstones: {:.2} %, lookups: {}, avg. probe length: {:.2}, insertions: {}, tombstone reuses: {}, grows: {}",
            100.0 * self.raw.len() as f32 / slots as f32,
            100.0 * self.raw.tombstones() as f32 / slots as f32,
            c.lookups,
            c.probes as f32 / c.lookups.max(1) as f32,
            c.insertions,
            c.tombstone_reuses,
            c.grows,
        );
    }
}
