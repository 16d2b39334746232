pub mod entry;
pub mod filter;
pub mod hash;
pub mod logger;
pub mod natural;
pub mod stats;

pub use entry::{
    BiosSet, CatalogEntry, Disk, EntryKind, ItemStatus, ItemType, Machine, Release, Rom,
    SIZE_UNKNOWN, SIZE_ZERO, Source,
};
pub use filter::{EntryFilter, FilterItem, Filterable, matches_pattern};
pub use hash::{HashType, Hashes, PLACEHOLDER_HASH, clean_hash, clean_hash_opt};
pub use logger::{CatalogLogger, LogFacade, LogLevel, LogRecord, MemoryLogger};
pub use natural::{natural_cmp, sort_natural};
pub use stats::{ItemCounts, StatisticsAggregator};
