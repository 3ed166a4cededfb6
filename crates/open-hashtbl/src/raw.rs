//! Slot-level `RawTable` API
//!
//! [`RawTable`] does not hash anything itself. Callers pass the hash value of
//! a key along with an equality predicate, and receive slot indices they can
//! use for subsequent operations.

use core::mem;

use crate::stats;

// === Structs =================================================================

/// Raw open addressing table with linear probing and tombstone deletion
///
/// The home index of a hash value is its non-negative magnitude (the hash
/// with the most significant bit cleared) modulo the number of slots. Probing
/// advances by one slot at a time and wraps around at the end of the array.
#[derive(Clone, Debug)]
pub struct RawTable<K, V> {
    data: Box<[Slot<K, V>]>,

    /// The number of occupied slots
    len: usize,
    /// The number of tombstones
    tombstones: usize,
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    /// Never occupied since the slot array was allocated
    Free,
    /// Previously occupied. Lookups continue past it, insertions may reuse it.
    Tombstone,
    Occupied {
        /// Hash value of `key`, kept to place the entry again on growth
        hash: u64,
        key: K,
        value: V,
    },
}

/// Non-negative magnitude of a hash value
#[inline]
fn magnitude(hash: u64) -> usize {
    hash as usize & (usize::MAX >> 1)
}

// === RawTable Impls ==========================================================

impl<K, V> RawTable<K, V> {
    /// Maximum number of slots such that the slot array stays addressable
    pub const MAX_SLOTS: usize = isize::MAX as usize / mem::size_of::<Slot<K, V>>();

    /// Create a new table with `slots` free slots
    ///
    /// Panics if `slots` is 0 or exceeds [`Self::MAX_SLOTS`].
    #[track_caller]
    pub fn with_slots(slots: usize) -> Self {
        assert_ne!(slots, 0, "a table needs at least one slot");
        assert!(
            slots <= Self::MAX_SLOTS,
            "requested capacity {slots} is too large"
        );
        RawTable {
            data: Self::free_slots(slots),
            len: 0,
            tombstones: 0,
        }
    }

    fn free_slots(slots: usize) -> Box<[Slot<K, V>]> {
        let mut data = Vec::with_capacity(slots);
        data.resize_with(slots, || Slot::Free);
        data.into_boxed_slice()
    }

    /// Get the number of entries stored in the table
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` iff no entries are stored in the table
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of slots
    #[inline]
    pub fn slots(&self) -> usize {
        self.data.len()
    }

    /// Get the number of tombstones
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Get the home index for `hash`
    #[inline]
    pub fn home(&self, hash: u64) -> usize {
        magnitude(hash) % self.data.len()
    }

    /// Slot indices of the probe sequence for `hash`
    ///
    /// Every slot is visited exactly once, starting at the home index.
    #[inline]
    fn probe_seq(&self, hash: u64) -> impl Iterator<Item = usize> {
        let slots = self.data.len();
        let home = self.home(hash);
        (0..slots).map(move |i| {
            let index = home + i;
            if index >= slots {
                index - slots
            } else {
                index
            }
        })
    }

    /// Find the index of an entry
    ///
    /// `eq` is only called for occupied slots with a matching hash value.
    /// Tombstones are skipped, the search stops at the first free slot.
    pub fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        stats::lookup();

        for index in self.probe_seq(hash) {
            stats::probe();
            match &self.data[index] {
                Slot::Free => return None,
                Slot::Tombstone => {}
                Slot::Occupied { hash: h, key, .. } => {
                    if *h == hash && eq(key) {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    /// Find the index of an entry or a slot to insert it
    ///
    /// Returns `Ok(index)` if the entry was found and `Err(index)` for an
    /// insertion slot. The insertion slot is the first tombstone or free slot
    /// on the probe sequence.
    ///
    /// `eq` is only called for occupied slots with a matching hash value.
    ///
    /// Panics if the key is absent and every slot is occupied.
    pub fn find_or_find_insert_slot(
        &self,
        hash: u64,
        eq: impl Fn(&K) -> bool,
    ) -> Result<usize, usize> {
        stats::lookup();
        let mut first_tombstone = None;

        for index in self.probe_seq(hash) {
            stats::probe();
            match &self.data[index] {
                Slot::Free => return Err(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied { hash: h, key, .. } => {
                    if *h == hash && eq(key) {
                        return Ok(index);
                    }
                }
            }
        }

        match first_tombstone {
            Some(index) => Err(index),
            None => panic!("all {} slots are occupied", self.data.len()),
        }
    }

    /// Get a reference to the value of an entry
    #[inline]
    pub fn get(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<&V> {
        let index = self.find(hash, eq)?;
        self.get_at_slot(index).map(|(_, value)| value)
    }

    /// Get a mutable reference to the value of an entry
    #[inline]
    pub fn get_mut(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<&mut V> {
        let index = self.find(hash, eq)?;
        self.get_at_slot_mut(index).map(|(_, value)| value)
    }

    /// Get the key and value stored at `slot`, if `slot` is occupied
    ///
    /// Panics if `slot` is out of bounds.
    #[inline]
    pub fn get_at_slot(&self, slot: usize) -> Option<(&K, &V)> {
        match &self.data[slot] {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    /// Get the key and a mutable reference to the value stored at `slot`, if
    /// `slot` is occupied
    ///
    /// Panics if `slot` is out of bounds.
    #[inline]
    pub fn get_at_slot_mut(&mut self, slot: usize) -> Option<(&K, &mut V)> {
        match &mut self.data[slot] {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    /// Replace the value stored at the occupied `slot`, returning the previous
    /// one
    ///
    /// The stored key is left untouched.
    #[track_caller]
    pub fn replace_at_slot(&mut self, slot: usize, value: V) -> V {
        match &mut self.data[slot] {
            Slot::Occupied { value: old, .. } => mem::replace(old, value),
            _ => panic!("slot {slot} is not occupied"),
        }
    }

    /// Insert an entry in `slot`
    ///
    /// `hash` is the hash value of `key`. `slot` must be a free slot or a
    /// tombstone, as returned by [`Self::find_or_find_insert_slot()`] in the
    /// `Err` case with no modifications in between. Otherwise, the table may
    /// end up with duplicate keys.
    ///
    /// Panics if `slot` is occupied.
    #[track_caller]
    pub fn insert_in_slot(&mut self, hash: u64, slot: usize, key: K, value: V) {
        let entry = &mut self.data[slot];
        match entry {
            Slot::Occupied { .. } => panic!("slot {slot} is occupied"),
            Slot::Tombstone => {
                self.tombstones -= 1;
                stats::tombstone_reuse();
            }
            Slot::Free => {}
        }
        *entry = Slot::Occupied { hash, key, value };
        self.len += 1;
        stats::insertion();
    }

    /// Remove the entry at `slot`, leaving a tombstone
    ///
    /// Returns the entry's key and value.
    ///
    /// Panics if `slot` is not occupied.
    #[track_caller]
    pub fn remove_at_slot(&mut self, slot: usize) -> (K, V) {
        match mem::replace(&mut self.data[slot], Slot::Tombstone) {
            Slot::Occupied { key, value, .. } => {
                self.len -= 1;
                self.tombstones += 1;
                (key, value)
            }
            other => {
                self.data[slot] = other;
                panic!("slot {slot} is not occupied");
            }
        }
    }

    /// Find and remove an entry, returning its key and value
    #[inline]
    pub fn remove_entry(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<(K, V)> {
        let index = self.find(hash, eq)?;
        Some(self.remove_at_slot(index))
    }

    /// Double the number of slots
    ///
    /// Every entry is placed at the first free slot of its probe sequence in
    /// the new array. Tombstones are discarded. Keys are neither hashed nor
    /// compared.
    ///
    /// Panics if the doubled slot count exceeds [`Self::MAX_SLOTS`].
    #[cold]
    pub fn grow(&mut self) {
        let old_slots = self.data.len();
        let new_slots = match old_slots.checked_mul(2) {
            Some(n) if n <= Self::MAX_SLOTS => n,
            _ => panic!("capacity overflow"),
        };

        #[cfg(feature = "logging")]
        log::trace!(
            "growing table from {old_slots} to {new_slots} slots ({} entries, {} tombstones discarded)",
            self.len,
            self.tombstones,
        );
        stats::grow();

        let old_data = mem::replace(&mut self.data, Self::free_slots(new_slots));
        self.tombstones = 0;

        for slot in old_data.into_vec() {
            let Slot::Occupied { hash, key, value } = slot else {
                continue;
            };
            // `self.len < new_slots`, so there is a free slot
            let mut index = self.home(hash);
            while !matches!(self.data[index], Slot::Free) {
                index = (index + 1) % new_slots;
            }
            self.data[index] = Slot::Occupied { hash, key, value };
        }
    }

    /// Clear the table
    ///
    /// This drops all entries, discards all tombstones and does not change
    /// the number of slots.
    pub fn clear(&mut self) {
        if self.len == 0 && self.tombstones == 0 {
            return;
        }
        for slot in self.data.iter_mut() {
            *slot = Slot::Free;
        }
        self.len = 0;
        self.tombstones = 0;
    }
}

// === Tests ===================================================================
