//! crates/match/src/index.rs
//!
//! Weak-checksum index over a target's block table.

use logging::debug_log;
use rustc_hash::FxHashMap;
use signature::{BlockChecksumTable, CheckSumEntry};

/// Groups table entries by their 32-bit weak key.
///
/// Distinct blocks that collide on the weak key are all kept, in table order,
/// so the strong comparison can try each of them.
#[derive(Clone, Debug, Default)]
pub struct WeakIndex<'a> {
    buckets: FxHashMap<u32, Vec<&'a CheckSumEntry>>,
    entries: usize,
}

impl<'a> WeakIndex<'a> {
    /// Indexes every entry of `table`.
    #[must_use]
    pub fn build(table: &'a BlockChecksumTable) -> Self {
        let mut buckets: FxHashMap<u32, Vec<&'a CheckSumEntry>> = FxHashMap::default();
        buckets.reserve(table.len());
        for entry in table {
            buckets.entry(entry.key()).or_default().push(entry);
        }
        debug_log!(
            Hash,
            2,
            "indexed {} entries under {} weak keys",
            table.len(),
            buckets.len()
        );
        Self {
            buckets,
            entries: table.len(),
        }
    }

    /// Returns the entries sharing `key`, in table order.
    #[inline]
    #[must_use]
    pub fn candidates(&self, key: u32) -> &[&'a CheckSumEntry] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct weak keys.
    #[must_use]
    pub fn distinct_keys(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed entries, collisions included.
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.entries
    }

    /// Reports whether the index holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries == 0
    }
}
