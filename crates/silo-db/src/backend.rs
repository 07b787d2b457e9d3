//! Connector backend trait definition
//!
//! A connector backend owns one database connection and one validated
//! PDM schema for the lifetime of a run. It moves from uninitialized to
//! initialized via [`ConnectorBackend::initialize`]; every data
//! operation before that fails with `[D004] NotInitialized`.

use crate::error::DbResult;
use async_trait::async_trait;
use silo_core::dli::{Dli, DliPart};
use silo_core::pdm::PdmSchema;
use silo_core::snapshot::SnapshotRecord;
use std::path::{Path, PathBuf};

/// Result of one transform run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Source rows newly inserted into the fact table
    pub rows_loaded: usize,
    /// Snapshot recorded for this load; `None` when no new rows arrived
    pub snapshot_id: Option<i64>,
}

/// Connector backend: orchestrates one database session for one project
#[async_trait]
pub trait ConnectorBackend: Send + Sync {
    /// Project this backend belongs to
    fn project_id(&self) -> &str;

    /// The immutable staging schema
    fn schema(&self) -> &PdmSchema;

    /// Dialect identifier for logging
    fn dialect_name(&self) -> &'static str;

    /// Create the staging schema. Fails with `[D003]` when any schema
    /// table already exists and `overwrite` is false; with `overwrite`
    /// the existing schema is dropped first.
    async fn initialize(&mut self, overwrite: bool) -> DbResult<()>;

    /// Probe the snapshot bookkeeping table's existence
    async fn is_initialized(&self) -> DbResult<bool>;

    /// Bulk-load a delimited file into the source table, returning the
    /// number of rows loaded
    async fn extract(&self, file: &Path) -> DbResult<usize>;

    /// Normalize: populate lookups, insert watermark-gated fact rows,
    /// resolve foreign-key slots, and record a snapshot when new rows
    /// were loaded
    async fn transform(&self) -> DbResult<TransformOutcome>;

    /// Highest snapshot id recorded, or [`silo_core::NO_SNAPSHOT`] when
    /// none exist (including before initialization)
    async fn last_snapshot_id(&self) -> DbResult<i64>;

    /// Recorded snapshots, newest first
    async fn list_snapshots(&self) -> DbResult<Vec<SnapshotRecord>>;

    /// Drop all normalized data and bookkeeping, returning the backend
    /// to the uninitialized state. Irreversible.
    async fn drop_snapshots(&mut self) -> DbResult<()>;

    /// Dialect-specific table existence probe
    async fn table_exists(&self, table: &str) -> DbResult<bool>;

    /// Unload every part into `dir`, all snapshots included
    async fn load(&self, parts: &[DliPart], dir: &Path) -> DbResult<()>;

    /// Unload every part into `dir`; fact rows are filtered to the given
    /// snapshot ids (`None` means all snapshots)
    async fn load_snapshot(
        &self,
        parts: &[DliPart],
        dir: &Path,
        snapshot_ids: Option<&[i64]>,
    ) -> DbResult<()>;

    /// Unload all parts into `dir` and hand the directory to the
    /// packaging collaborator, returning the produced package path
    async fn deploy(
        &self,
        dli: &Dli,
        parts: &[DliPart],
        dir: &Path,
        archive_name: &str,
    ) -> DbResult<PathBuf>;

    /// Same as [`Self::deploy`], restricted to the given snapshot ids
    async fn deploy_snapshot(
        &self,
        dli: &Dli,
        parts: &[DliPart],
        dir: &Path,
        archive_name: &str,
        snapshot_ids: Option<&[i64]>,
    ) -> DbResult<PathBuf>;

    /// Execute query returning row count (for tests)
    async fn query_count(&self, sql: &str) -> DbResult<usize>;
}
