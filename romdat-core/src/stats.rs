//! Running statistics over a set of catalog entries.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::entry::{CatalogEntry, EntryKind, ItemStatus};
use crate::hash::{HashType, Hashes};

/// Plain counter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemCounts {
    pub count: i64,

    pub archive_count: i64,
    pub bios_set_count: i64,
    pub disk_count: i64,
    pub release_count: i64,
    pub rom_count: i64,
    pub sample_count: i64,

    pub total_size: i64,

    pub crc_count: i64,
    pub md5_count: i64,
    pub sha1_count: i64,
    pub sha256_count: i64,
    pub sha384_count: i64,
    pub sha512_count: i64,

    pub bad_dump_count: i64,
    pub good_count: i64,
    pub nodump_count: i64,
    pub verified_count: i64,
}

impl ItemCounts {
    /// Apply one entry with `sign` = 1 (add) or -1 (remove).
    fn apply(&mut self, entry: &CatalogEntry, sign: i64) {
        self.count += sign;

        match &entry.kind {
            EntryKind::Archive => self.archive_count += sign,
            EntryKind::BiosSet(_) => self.bios_set_count += sign,
            EntryKind::Release(_) => self.release_count += sign,
            EntryKind::Sample => self.sample_count += sign,
            EntryKind::Disk(disk) => {
                self.disk_count += sign;
                if entry.status != ItemStatus::Nodump {
                    self.apply_hashes(&disk.hashes, sign);
                }
            }
            EntryKind::Rom(rom) => {
                self.rom_count += sign;
                if entry.status != ItemStatus::Nodump {
                    self.total_size += sign * rom.size.max(0);
                    self.apply_hashes(&rom.hashes, sign);
                }
            }
        }

        match entry.status {
            ItemStatus::BadDump => self.bad_dump_count += sign,
            ItemStatus::Good => self.good_count += sign,
            ItemStatus::Nodump => self.nodump_count += sign,
            ItemStatus::Verified => self.verified_count += sign,
            ItemStatus::None => {}
        }
    }

    fn apply_hashes(&mut self, hashes: &Hashes, sign: i64) {
        for kind in HashType::ALL {
            if hashes.has(kind) {
                *self.hash_count_mut(kind) += sign;
            }
        }
    }

    fn hash_count_mut(&mut self, kind: HashType) -> &mut i64 {
        match kind {
            HashType::Crc32 => &mut self.crc_count,
            HashType::Md5 => &mut self.md5_count,
            HashType::Sha1 => &mut self.sha1_count,
            HashType::Sha256 => &mut self.sha256_count,
            HashType::Sha384 => &mut self.sha384_count,
            HashType::Sha512 => &mut self.sha512_count,
        }
    }

    /// Number of entries carrying the given hash.
    pub fn hash_count(&self, kind: HashType) -> i64 {
        match kind {
            HashType::Crc32 => self.crc_count,
            HashType::Md5 => self.md5_count,
            HashType::Sha1 => self.sha1_count,
            HashType::Sha256 => self.sha256_count,
            HashType::Sha384 => self.sha384_count,
            HashType::Sha512 => self.sha512_count,
        }
    }

    fn merge(&mut self, other: &ItemCounts) {
        self.count += other.count;
        self.archive_count += other.archive_count;
        self.bios_set_count += other.bios_set_count;
        self.disk_count += other.disk_count;
        self.release_count += other.release_count;
        self.rom_count += other.rom_count;
        self.sample_count += other.sample_count;
        self.total_size += other.total_size;
        self.crc_count += other.crc_count;
        self.md5_count += other.md5_count;
        self.sha1_count += other.sha1_count;
        self.sha256_count += other.sha256_count;
        self.sha384_count += other.sha384_count;
        self.sha512_count += other.sha512_count;
        self.bad_dump_count += other.bad_dump_count;
        self.good_count += other.good_count;
        self.nodump_count += other.nodump_count;
        self.verified_count += other.verified_count;
    }
}

impl fmt::Display for ItemCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items ({} roms, {} disks), {} bytes, {} good, {} bad, {} nodump, {} verified",
            self.count,
            self.rom_count,
            self.disk_count,
            self.total_size,
            self.good_count,
            self.bad_dump_count,
            self.nodump_count,
            self.verified_count,
        )
    }
}

/// Thread-safe running totals.
///
/// `add_item` and `remove_item` may be called from several workers at once.
/// Removing an entry that was never added leaves the counters in an
/// unspecified state.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    counts: Mutex<ItemCounts>,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, entry: &CatalogEntry) {
        self.lock().apply(entry, 1);
    }

    pub fn remove_item(&self, entry: &CatalogEntry) {
        self.lock().apply(entry, -1);
    }

    /// Add another aggregator's totals to this one.
    pub fn add_stats(&mut self, other: &StatisticsAggregator) {
        let theirs = other.snapshot();
        self.counts
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(&theirs);
    }

    pub fn reset(&mut self) {
        *self.counts.get_mut().unwrap_or_else(PoisonError::into_inner) = ItemCounts::default();
    }

    /// Copy of the current totals.
    pub fn snapshot(&self) -> ItemCounts {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ItemCounts> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<'a> Extend<&'a CatalogEntry> for StatisticsAggregator {
    fn extend<I: IntoIterator<Item = &'a CatalogEntry>>(&mut self, iter: I) {
        let counts = self.counts.get_mut().unwrap_or_else(PoisonError::into_inner);
        for entry in iter {
            counts.apply(entry, 1);
        }
    }
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
