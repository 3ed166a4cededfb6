//! Construction options

use derive_builder::Builder;

/// Number of slots used if no valid initial capacity is given
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used if no valid load factor is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// Options for constructing an [`OpenAddressTable`][crate::OpenAddressTable]
///
/// The builder accepts any value. Values that are out of range are replaced by
/// the defaults once a table is constructed from the options, they are never
/// reported as an error:
///
/// ```
/// # use open_hashtbl::*;
/// let config = TableConfigBuilder::default()
///     .initial_capacity(0)
///     .initial_load_factor(0.75)
///     .build()
///     .unwrap();
/// let table = OpenAddressTable::<u32, u32>::with_config(&config);
/// assert_eq!(table.capacity(), DEFAULT_CAPACITY);
/// assert_eq!(table.load_factor(), 0.75);
/// ```
#[non_exhaustive]
#[derive(Clone, Builder, Debug, PartialEq)]
pub struct TableConfig {
    /// Initial number of slots
    ///
    /// Falls back to [`DEFAULT_CAPACITY`] if 0 or so large that the slot
    /// array would not be addressable.
    #[builder(default = "DEFAULT_CAPACITY")]
    pub initial_capacity: usize,

    /// Ratio of live entries to slots at which the table doubles its capacity
    ///
    /// Falls back to [`DEFAULT_LOAD_FACTOR`] if outside of `[0, 1]` (or NaN).
    /// A load factor of 0 makes the table grow after every insertion.
    #[builder(default = "DEFAULT_LOAD_FACTOR")]
    pub initial_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            initial_capacity: DEFAULT_CAPACITY,
            initial_load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Create options with the given capacity and load factor
    pub fn new(initial_capacity: usize, initial_load_factor: f64) -> Self {
        TableConfig {
            initial_capacity,
            initial_load_factor,
        }
    }

    /// The initial capacity, or [`DEFAULT_CAPACITY`] if it is 0 or exceeds
    /// `max_capacity`
    pub(crate) fn capacity_or_default(&self, max_capacity: usize) -> usize {
        let capacity = self.initial_capacity;
        if capacity == 0 || capacity > max_capacity {
            #[cfg(feature = "logging")]
            log::debug!("initial capacity {capacity} is invalid, using {DEFAULT_CAPACITY}");
            return DEFAULT_CAPACITY;
        }
        capacity
    }

    /// The initial load factor, or [`DEFAULT_LOAD_FACTOR`] if it is outside of
    /// `[0, 1]`
    pub(crate) fn load_factor_or_default(&self) -> f64 {
        let load_factor = self.initial_load_factor;
        if !(0.0..=1.0).contains(&load_factor) {
            #[cfg(feature = "logging")]
            log::debug!("initial load factor {load_factor} is invalid, using {DEFAULT_LOAD_FACTOR}");
            return DEFAULT_LOAD_FACTOR;
        }
        load_factor
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = TableConfigBuilder::default().build().unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.initial_load_factor, 0.5);
    }

    #[test]
    fn capacity_fallback() {
        assert_eq!(TableConfig::new(0, 0.5).capacity_or_default(100), 16);
        assert_eq!(TableConfig::new(101, 0.5).capacity_or_default(100), 16);
        assert_eq!(TableConfig::new(100, 0.5).capacity_or_default(100), 100);
        assert_eq!(TableConfig::new(1, 0.5).capacity_or_default(100), 1);
    }

    #[test]
    fn load_factor_fallback() {
        for load_factor in [-0.1, 1.01, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = TableConfig::new(16, load_factor);
            assert_eq!(config.load_factor_or_default(), 0.5);
        }
        for load_factor in [0.0, 0.25, 1.0] {
            let config = TableConfig::new(16, load_factor);
            assert_eq!(config.load_factor_or_default(), load_factor);
        }
    }
}
