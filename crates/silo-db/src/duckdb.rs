//! DuckDB dialect driver and connector backend
//!
//! The reference backend. Autoincrement ids are sequences with a
//! `nextval` default, the tolerant decimal cast is a macro, dates go
//! through `try_strptime` so a bad value resolves to the sentinel offset
//! instead of failing the load, and bulk load/unload use `read_csv` and
//! `COPY .. TO`.

use crate::backend::{ConnectorBackend, TransformOutcome};
use crate::dialect::{quote_literal, AutoincrementSyntax, SqlDialect};
use crate::error::{DbError, DbResult};
use crate::package::{DirPackager, Packager};
use async_trait::async_trait;
use duckdb::Connection;
use silo_core::dli::{Dli, DliPart};
use silo_core::naming;
use silo_core::pdm::PdmSchema;
use silo_core::snapshot::{snapshot_ranges, SnapshotRange, SnapshotRecord, NO_SNAPSHOT};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// DuckDB SQL dialect
pub struct DuckDbDialect;

impl DuckDbDialect {
    fn sequence_name(table: &str, column: &str) -> String {
        format!("{}_{}_seq", table, column)
    }
}

impl SqlDialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn autoincrement_column(&self, table: &str, column: &str) -> AutoincrementSyntax {
        let seq = Self::sequence_name(table, column);
        AutoincrementSyntax {
            setup: vec![format!("CREATE SEQUENCE {} START 1", seq)],
            type_clause: format!("BIGINT DEFAULT nextval('{}')", seq),
            teardown: vec![format!("DROP SEQUENCE IF EXISTS {}", seq)],
        }
    }

    fn concat_prefix(&self) -> &'static str {
        "CONCAT("
    }

    fn concat_operator(&self) -> String {
        format!(", '{}', ", naming::HASH_SEPARATOR)
    }

    fn concat_suffix(&self) -> &'static str {
        ")"
    }

    fn date_to_day_offset(&self, expr: &str, format: &str) -> String {
        format!(
            "COALESCE(DATE_DIFF('day', DATE '1900-01-01', CAST(TRY_STRPTIME({expr}, {fmt}) AS DATE)), {ceiling}) + 1",
            fmt = quote_literal(format),
            ceiling = naming::DATE_OFFSET_CEILING,
        )
    }

    fn decimal_cast(&self, expr: &str) -> String {
        format!("atod({})", expr)
    }

    fn helper_function_ddl(&self) -> Vec<String> {
        let stripped = naming::DISCARD_CHARS
            .iter()
            .fold("s".to_string(), |acc, c| {
                format!("REPLACE({}, '{}', '')", acc, c)
            });
        vec![format!(
            "CREATE OR REPLACE MACRO atod(s) AS CASE WHEN s IS NULL OR s = '' THEN NULL ELSE CAST({} AS {}) END",
            stripped,
            self.decimal_type()
        )]
    }

    fn extract_sql(&self, schema: &PdmSchema, file: &str) -> String {
        let source = schema.source_table();
        let columns: Vec<&str> = source
            .non_autoincrement_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let typed: Vec<String> = columns
            .iter()
            .map(|c| format!("'{}': 'VARCHAR'", c))
            .collect();
        format!(
            "INSERT INTO {table} ({cols}) SELECT {cols} FROM read_csv({file}, header = false, delim = ',', quote = '\"', columns = {{{typed}}})",
            table = source.name,
            cols = columns.join(", "),
            file = quote_literal(file),
            typed = typed.join(", "),
        )
    }

    fn unload_sql(&self, select: &str, file: &str) -> String {
        format!(
            "COPY ({select}) TO {file} (FORMAT CSV, DELIMITER ',', QUOTE '\"', HEADER false)",
            file = quote_literal(file),
        )
    }

    fn update_with_join_sql(
        &self,
        target: &str,
        joined: &[&str],
        set_column: &str,
        set_value: &str,
        where_clause: &str,
    ) -> String {
        format!(
            "UPDATE {target} SET {set_column} = {set_value} FROM {joined} WHERE {where_clause}",
            joined = joined.join(", "),
        )
    }

    fn table_exists_sql(&self, table: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = {}",
            quote_literal(table)
        )
    }
}

/// DuckDB connector backend: one exclusively-owned connection plus the
/// project's staging schema
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    dialect: DuckDbDialect,
    schema: PdmSchema,
    project_id: String,
    packager: Box<dyn Packager>,
    initialized: bool,
}

impl DuckDbBackend {
    /// Open a backend on a database file (`:memory:` for in-memory) and
    /// probe whether the staging schema is already initialized
    pub fn open(db_path: &str, project_id: &str, schema: PdmSchema) -> DbResult<Self> {
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(Path::new(db_path))
        }
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let mut backend = Self {
            conn: Mutex::new(conn),
            dialect: DuckDbDialect,
            schema,
            project_id: project_id.to_string(),
            packager: Box::new(DirPackager),
            initialized: false,
        };
        backend.initialized = backend.probe_initialized()?;
        log::debug!(
            "Opened duckdb backend for project '{}' (initialized: {})",
            backend.project_id,
            backend.initialized
        );
        Ok(backend)
    }

    /// Replace the packaging collaborator
    pub fn with_packager(mut self, packager: Box<dyn Packager>) -> Self {
        self.packager = packager;
        self
    }

    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        log::debug!("executing: {}", sql);
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        conn.execute(sql, []).map_err(|e| DbError::ExecutionError {
            statement: sql.to_string(),
            message: e.to_string(),
        })
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        log::debug!("executing: {}", sql);
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError {
                statement: sql.to_string(),
                message: e.to_string(),
            })
    }

    fn query_i64_sync(&self, sql: &str) -> DbResult<i64> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        conn.query_row(sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError {
                statement: sql.to_string(),
                message: e.to_string(),
            })
    }

    fn query_snapshots_sync(&self, sql: &str) -> DbResult<Vec<SnapshotRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        let map_err = |e: duckdb::Error| DbError::ExecutionError {
            statement: sql.to_string(),
            message: e.to_string(),
        };
        let mut stmt = conn.prepare(sql).map_err(map_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SnapshotRecord {
                    id: row.get(0)?,
                    table_name: row.get(1)?,
                    last_loaded_id: row.get(2)?,
                })
            })
            .map_err(map_err)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(map_err)?);
        }
        Ok(records)
    }

    fn probe_initialized(&self) -> DbResult<bool> {
        let count = self.query_i64_sync(&self.dialect.table_exists_sql(naming::SNAPSHOTS_TABLE))?;
        Ok(count > 0)
    }

    fn table_exists_sync(&self, table: &str) -> DbResult<bool> {
        let count = self.query_i64_sync(&self.dialect.table_exists_sql(table))?;
        Ok(count > 0)
    }

    fn ensure_initialized(&self, operation: &str) -> DbResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(DbError::NotInitialized {
                operation: operation.to_string(),
            })
        }
    }

    /// Row-id ranges of the selected snapshots of the fact table
    fn selected_ranges(&self, snapshot_ids: &[i64]) -> DbResult<Vec<SnapshotRange>> {
        let fact = &self.schema.fact_table().name;
        let records = self.query_snapshots_sync(&self.dialect.snapshots_for_table_sql(fact))?;
        Ok(snapshot_ranges(&records)
            .into_iter()
            .filter(|r| snapshot_ids.contains(&r.id))
            .collect())
    }

    fn load_parts_sync(
        &self,
        parts: &[DliPart],
        dir: &Path,
        snapshot_ids: Option<&[i64]>,
    ) -> DbResult<()> {
        self.ensure_initialized("load")?;
        std::fs::create_dir_all(dir).map_err(|e| DbError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let ranges = match snapshot_ids {
            Some(ids) => Some(self.selected_ranges(ids)?),
            None => None,
        };
        let fact = &self.schema.fact_table().name;

        for part in parts {
            if self.schema.table(&part.table).is_none() {
                return Err(DbError::UnknownTable {
                    table: part.table.clone(),
                });
            }
            // Lookup tables are cumulative; only fact rows are
            // snapshot-filtered.
            let part_ranges = if part.table == *fact {
                ranges.as_deref()
            } else {
                None
            };
            let file = dir.join(&part.file_name);
            let sql = self.dialect.load_part_sql(
                &part.table,
                &part.columns,
                &file.display().to_string(),
                part_ranges,
            );
            self.execute_batch_sync(&sql)?;
            log::debug!("Unloaded part '{}' from {}", part.file_name, part.table);
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectorBackend for DuckDbBackend {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn schema(&self) -> &PdmSchema {
        &self.schema
    }

    fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    async fn initialize(&mut self, overwrite: bool) -> DbResult<()> {
        for table in self.schema.tables() {
            if self.table_exists_sync(&table.name)? && !overwrite {
                return Err(DbError::SchemaExists {
                    table: table.name.clone(),
                });
            }
        }
        if self.probe_initialized()? && !overwrite {
            return Err(DbError::SchemaExists {
                table: naming::SNAPSHOTS_TABLE.to_string(),
            });
        }
        if overwrite {
            for stmt in self.dialect.drop_ddl(&self.schema) {
                self.execute_batch_sync(&stmt)?;
            }
        }
        for stmt in self.dialect.initialize_ddl(&self.schema) {
            self.execute_batch_sync(&stmt)?;
        }
        self.initialized = true;
        log::info!("Initialized staging schema for '{}'", self.schema.name());
        Ok(())
    }

    async fn is_initialized(&self) -> DbResult<bool> {
        self.probe_initialized()
    }

    async fn extract(&self, file: &Path) -> DbResult<usize> {
        self.ensure_initialized("extract")?;
        let sql = self
            .dialect
            .extract_sql(&self.schema, &file.display().to_string());
        let rows = self.execute_sync(&sql)?;
        log::info!("Extracted {} rows from '{}'", rows, file.display());
        Ok(rows)
    }

    async fn transform(&self) -> DbResult<TransformOutcome> {
        self.ensure_initialized("transform")?;

        for lookup in self.schema.lookup_tables() {
            self.execute_sync(&self.dialect.populate_lookup_sql(&self.schema, lookup))?;
        }

        let rows_loaded = self.execute_sync(&self.dialect.insert_facts_sql(&self.schema))?;

        for fk in self.schema.fact_table().foreign_key_columns() {
            let lookup = fk
                .lookup
                .as_deref()
                .and_then(|name| self.schema.table(name))
                .ok_or_else(|| {
                    DbError::Internal(format!("foreign key '{}' has no lookup table", fk.name))
                })?;
            self.execute_sync(&self.dialect.resolve_lookup_fk_sql(&self.schema, fk, lookup))?;
        }

        let snapshot_id = if rows_loaded > 0 {
            self.execute_sync(&self.dialect.record_snapshot_sql(&self.schema))?;
            Some(self.query_i64_sync(&self.dialect.last_snapshot_id_sql())?)
        } else {
            None
        };

        log::info!(
            "Transform loaded {} fact rows (snapshot: {:?})",
            rows_loaded,
            snapshot_id
        );
        Ok(TransformOutcome {
            rows_loaded,
            snapshot_id,
        })
    }

    async fn last_snapshot_id(&self) -> DbResult<i64> {
        if !self.initialized {
            return Ok(NO_SNAPSHOT);
        }
        self.query_i64_sync(&self.dialect.last_snapshot_id_sql())
    }

    async fn list_snapshots(&self) -> DbResult<Vec<SnapshotRecord>> {
        if !self.initialized {
            return Ok(Vec::new());
        }
        self.query_snapshots_sync(&self.dialect.list_snapshots_sql())
    }

    async fn drop_snapshots(&mut self) -> DbResult<()> {
        for stmt in self.dialect.drop_ddl(&self.schema) {
            self.execute_batch_sync(&stmt)?;
        }
        self.initialized = false;
        log::info!("Dropped all snapshots for '{}'", self.schema.name());
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> DbResult<bool> {
        self.table_exists_sync(table)
    }

    async fn load(&self, parts: &[DliPart], dir: &Path) -> DbResult<()> {
        self.load_parts_sync(parts, dir, None)
    }

    async fn load_snapshot(
        &self,
        parts: &[DliPart],
        dir: &Path,
        snapshot_ids: Option<&[i64]>,
    ) -> DbResult<()> {
        self.load_parts_sync(parts, dir, snapshot_ids)
    }

    async fn deploy(
        &self,
        dli: &Dli,
        parts: &[DliPart],
        dir: &Path,
        archive_name: &str,
    ) -> DbResult<PathBuf> {
        self.deploy_snapshot(dli, parts, dir, archive_name, None)
            .await
    }

    async fn deploy_snapshot(
        &self,
        dli: &Dli,
        parts: &[DliPart],
        dir: &Path,
        archive_name: &str,
        snapshot_ids: Option<&[i64]>,
    ) -> DbResult<PathBuf> {
        self.load_parts_sync(parts, dir, snapshot_ids)?;
        let package = self.packager.package(dir, archive_name)?;
        log::info!(
            "Deployed DLI '{}' as '{}' ({} parts)",
            dli.name,
            package.display(),
            parts.len()
        );
        Ok(package)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count = self.query_i64_sync(&format!("SELECT COUNT(*) FROM ({})", sql))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
