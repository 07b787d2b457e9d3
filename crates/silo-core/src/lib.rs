//! silo-core - Core library for Silo
//!
//! This crate provides the physical data model (PDM) describing a
//! project's staging schema, the source-model configuration it is built
//! from, snapshot records for incremental loads, and the DLI descriptors
//! consumed when packaging data for upload.

pub mod config;
pub mod dli;
pub mod error;
pub mod naming;
pub mod pdm;
pub mod snapshot;

pub use config::{SourceColumnConfig, SourceColumnKind, SourceConfig};
pub use dli::{Dli, DliPart};
pub use error::{CoreError, CoreResult};
pub use pdm::{ColumnKind, PdmColumn, PdmSchema, PdmTable, TableRole};
pub use snapshot::{snapshot_ranges, SnapshotRange, SnapshotRecord, NO_SNAPSHOT};
