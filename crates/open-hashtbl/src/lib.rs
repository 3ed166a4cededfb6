//! Hash table with open addressing, linear probing and tombstone deletion
//!
//! ## Example
//!
//! ```
//! use open_hashtbl::OpenAddressTable;
//!
//! let mut table = OpenAddressTable::new();
//! assert_eq!(table.put("answer", 41), None);
//! assert_eq!(table.put("answer", 42), Some(41));
//! assert_eq!(table.get("answer"), Some(&42));
//! assert_eq!(table.size(), 1);
//!
//! assert_eq!(table.remove("answer"), Some(42));
//! assert_eq!(table.remove("answer"), None);
//! assert!(table.is_empty());
//! ```
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod raw;
mod stats;
mod table;

pub use config::{
    TableConfig, TableConfigBuilder, TableConfigBuilderError, DEFAULT_CAPACITY,
    DEFAULT_LOAD_FACTOR,
};
pub use stats::StatisticsGenerator;
pub use table::OpenAddressTable;
