//! silo-db - Database layer for Silo
//!
//! This crate provides the `SqlDialect` trait that turns a PDM schema
//! into backend-specific SQL, the `ConnectorBackend` trait that drives a
//! database session through initialize/extract/transform/load, the
//! DuckDB reference implementation of both, and the packaging boundary
//! used by deploys.

pub mod backend;
pub mod dialect;
pub mod duckdb;
pub mod error;
pub mod mysql;
pub mod package;

pub use backend::{ConnectorBackend, TransformOutcome};
pub use dialect::{AutoincrementSyntax, SqlDialect};
pub use duckdb::{DuckDbBackend, DuckDbDialect};
pub use error::{DbError, DbResult};
pub use mysql::MySqlDialect;
pub use package::{DirPackager, Packager};
