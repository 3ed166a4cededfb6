//! Probe statistics
//!
//! The counters are process-wide and only maintained if the `statistics`
//! feature is enabled. Otherwise, all recording functions compile to nothing.

/// Trait for generating and printing statistics
///
/// Implementors of this trait in this crate do not print anything unless the
/// `statistics` feature is enabled.
pub trait StatisticsGenerator {
    /// Print statistics to stdout and reset the counters
    fn print_stats(&self);
}

#[cfg(feature = "statistics")]
mod counters {
    use std::sync::atomic::AtomicU64;

    pub static LOOKUPS: AtomicU64 = AtomicU64::new(0);
    pub static PROBES: AtomicU64 = AtomicU64::new(0);
    pub static INSERTIONS: AtomicU64 = AtomicU64::new(0);
    pub static TOMBSTONE_REUSES: AtomicU64 = AtomicU64::new(0);
    pub static GROWS: AtomicU64 = AtomicU64::new(0);
}

macro_rules! record {
    ($name:ident, $counter:ident) => {
        #[inline(always)]
        pub(crate) fn $name() {
            #[cfg(feature = "statistics")]
            counters::$counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

record!(lookup, LOOKUPS);
record!(probe, PROBES);
record!(insertion, INSERTIONS);
record!(tombstone_reuse, TOMBSTONE_REUSES);
record!(grow, GROWS);

/// Snapshot of the counters, taken by [`take()`]
#[cfg(feature = "statistics")]
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct Counters {
    pub lookups: u64,
    pub probes: u64,
    pub insertions: u64,
    pub tombstone_reuses: u64,
    pub grows: u64,
}

/// Read and reset all counters
#[cfg(feature = "statistics")]
pub(crate) fn take() -> Counters {
    use std::sync::atomic::Ordering::Relaxed;
    Counters {
        lookups: counters::LOOKUPS.swap(0, Relaxed),
        probes: counters::PROBES.swap(0, Relaxed),
        insertions: counters::INSERTIONS.swap(0, Relaxed),
        tombstone_reuses: counters::TOMBSTONE_REUSES.swap(0, Relaxed),
        grows: counters::GROWS.swap(0, Relaxed),
    }
}
