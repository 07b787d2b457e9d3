//! Snapshot records for incremental fact loads
//!
//! Each successful transform that inserts new fact rows records one
//! snapshot: the fact table it loaded and the highest source row id it
//! incorporated (the watermark). Snapshot ids are a strictly increasing
//! sequence starting at 1; the "no snapshots yet" sentinel is
//! [`NO_SNAPSHOT`], never an error.

/// Sentinel returned when a fact table has no recorded snapshots
pub const NO_SNAPSHOT: i64 = 0;

/// One completed incremental load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Snapshot id, increasing per database
    pub id: i64,
    /// Fact table the load went into
    pub table_name: String,
    /// Highest source row id included in this load
    pub last_loaded_id: i64,
}

impl std::fmt::Display for SnapshotRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "snapshot {}: table={} watermark={}",
            self.id, self.table_name, self.last_loaded_id
        )
    }
}

/// Row-id range covered by one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRange {
    pub id: i64,
    pub first: i64,
    pub last: i64,
}

/// Derive the row-id range each snapshot covers from the append-only
/// watermark list of one fact table. Records must be sorted by ascending
/// snapshot id (the order the bookkeeping table returns them in);
/// snapshot N covers `(watermark(N-1), watermark(N)]`.
pub fn snapshot_ranges(records: &[SnapshotRecord]) -> Vec<SnapshotRange> {
    let mut ranges = Vec::with_capacity(records.len());
    let mut previous = 0;
    for record in records {
        ranges.push(SnapshotRange {
            id: record.id,
            first: previous + 1,
            last: record.last_loaded_id,
        });
        previous = record.last_loaded_id;
    }
    ranges
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
