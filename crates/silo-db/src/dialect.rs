//! SQL dialect abstraction
//!
//! A dialect driver turns the PDM into backend-specific SQL text. The
//! normalization DML is shared across backends as provided methods;
//! dialects differ only along a few axes expressed as required hooks:
//! autoincrement column syntax, string concatenation, date parsing and
//! casting functions, and the bulk load/unload statements.

use silo_core::naming;
use silo_core::pdm::{ColumnKind, PdmColumn, PdmSchema, PdmTable, TableRole};
use silo_core::snapshot::SnapshotRange;

/// Autoincrement column syntax for one dialect.
///
/// `setup` runs before the owning table's CREATE TABLE (e.g. sequence
/// creation), `teardown` when the schema is dropped.
#[derive(Debug, Clone)]
pub struct AutoincrementSyntax {
    pub setup: Vec<String>,
    pub type_clause: String,
    pub teardown: Vec<String>,
}

/// Quote a string literal for embedding in generated SQL
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// SQL dialect driver: generates DDL/DML text for one backend
pub trait SqlDialect: Send + Sync {
    /// Dialect identifier for logging
    fn name(&self) -> &'static str;

    /// Autoincrement syntax for `column` on `table`
    fn autoincrement_column(&self, table: &str, column: &str) -> AutoincrementSyntax;

    /// Concatenation prefix (e.g. `CONCAT(`)
    fn concat_prefix(&self) -> &'static str;

    /// Concatenation infix, carrying the hash separator
    fn concat_operator(&self) -> String;

    /// Concatenation suffix
    fn concat_suffix(&self) -> &'static str;

    /// Expression converting a textual date in `format` (strptime syntax)
    /// to an integer day offset from 1900-01-01, resolving to the
    /// sentinel offset when the value is empty or fails to parse
    fn date_to_day_offset(&self, expr: &str, format: &str) -> String;

    /// Expression applying the tolerant decimal cast to `expr`
    fn decimal_cast(&self, expr: &str) -> String;

    /// DDL defining the helper function behind [`Self::decimal_cast`]
    fn helper_function_ddl(&self) -> Vec<String>;

    /// Bulk-load statement for the source table from a delimited file
    fn extract_sql(&self, schema: &PdmSchema, file: &str) -> String;

    /// Unload statement writing `select`'s rows to a delimited file
    fn unload_sql(&self, select: &str, file: &str) -> String;

    /// Multi-table update setting `set_column` on `target` from the
    /// joined tables
    fn update_with_join_sql(
        &self,
        target: &str,
        joined: &[&str],
        set_column: &str,
        set_value: &str,
        where_clause: &str,
    ) -> String;

    /// Query returning the number of catalog entries named `table`
    fn table_exists_sql(&self, table: &str) -> String;

    /// Concatenate expressions into one hashed natural-key expression
    fn concat(&self, exprs: &[String]) -> String {
        format!(
            "{}{}{}",
            self.concat_prefix(),
            exprs.join(&self.concat_operator()),
            self.concat_suffix()
        )
    }

    /// Column type for raw and natural-key values
    fn varchar_type(&self) -> &'static str {
        "VARCHAR(255)"
    }

    /// Column type for measures
    fn decimal_type(&self) -> &'static str {
        "DECIMAL(15,4)"
    }

    /// Column type for day offsets and foreign-key slots
    fn int_type(&self) -> &'static str {
        "INT"
    }

    /// Column type for row ids and watermarks
    fn bigint_type(&self) -> &'static str {
        "BIGINT"
    }

    /// DDL initializing the whole staging schema: sequences, source,
    /// fact and lookup tables, the snapshot bookkeeping table, and the
    /// helper functions. Statement order is execution order.
    fn initialize_ddl(&self, schema: &PdmSchema) -> Vec<String> {
        let mut setup = Vec::new();
        let mut tables = Vec::new();

        for table in schema.tables() {
            let mut columns = Vec::new();
            if table.role == TableRole::Fact {
                columns.push(format!("{} {}", naming::FACT_ROW_ID, self.bigint_type()));
            }
            for column in &table.columns {
                columns.push(self.column_ddl(table, column, &mut setup));
            }
            tables.push(format!(
                "CREATE TABLE {} ({})",
                table.name,
                columns.join(", ")
            ));
        }

        let snapshot_id = self.autoincrement_column(naming::SNAPSHOTS_TABLE, "id");
        setup.extend(snapshot_id.setup);
        tables.push(format!(
            "CREATE TABLE {} (id {}, table_name {}, last_loaded_id {}, created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)",
            naming::SNAPSHOTS_TABLE,
            snapshot_id.type_clause,
            self.varchar_type(),
            self.bigint_type()
        ));

        setup.extend(tables);
        setup.extend(self.helper_function_ddl());
        setup
    }

    /// Column definition clause; autoincrement setup statements are
    /// appended to `setup`
    fn column_ddl(&self, table: &PdmTable, column: &PdmColumn, setup: &mut Vec<String>) -> String {
        match column.kind {
            ColumnKind::AutoincrementId => {
                let syntax = self.autoincrement_column(&table.name, &column.name);
                setup.extend(syntax.setup);
                format!("{} {}", column.name, syntax.type_clause)
            }
            ColumnKind::Fact => format!("{} {}", column.name, self.decimal_type()),
            ColumnKind::Date => format!("{} {}", column.name, self.int_type()),
            ColumnKind::Attribute if column.lookup.is_some() => {
                format!("{} {}", column.name, self.int_type())
            }
            ColumnKind::Attribute => format!("{} {}", column.name, self.varchar_type()),
        }
    }

    /// DDL tearing the staging schema down, tolerating missing objects
    fn drop_ddl(&self, schema: &PdmSchema) -> Vec<String> {
        let mut stmts = Vec::new();
        for table in schema.tables() {
            stmts.push(format!("DROP TABLE IF EXISTS {}", table.name));
            for column in &table.columns {
                if column.kind == ColumnKind::AutoincrementId {
                    stmts.extend(self.autoincrement_column(&table.name, &column.name).teardown);
                }
            }
        }
        stmts.push(format!("DROP TABLE IF EXISTS {}", naming::SNAPSHOTS_TABLE));
        stmts.extend(
            self.autoincrement_column(naming::SNAPSHOTS_TABLE, "id")
                .teardown,
        );
        stmts
    }

    /// Insert distinct natural keys not yet present into a lookup table
    fn populate_lookup_sql(&self, schema: &PdmSchema, lookup: &PdmTable) -> String {
        let source = &schema.source_table().name;
        let key = self.concat(&lookup.source_columns);
        format!(
            "INSERT INTO {lk} ({value}) SELECT DISTINCT {key} FROM {source} WHERE {key} NOT IN (SELECT {value} FROM {lk})",
            lk = lookup.name,
            value = naming::LOOKUP_VALUE,
        )
    }

    /// Insert source rows above the fact table's watermark, applying the
    /// decimal cast to measures and the day-offset conversion to dates
    fn insert_facts_sql(&self, schema: &PdmSchema) -> String {
        let fact = schema.fact_table();
        let source = schema.source_table();

        let mut fact_cols = vec![naming::FACT_ROW_ID.to_string()];
        let mut select_exprs = vec![naming::SOURCE_ROW_ID.to_string()];
        for column in fact.fact_columns() {
            let src = column.source_column.as_deref().unwrap_or(&column.name);
            fact_cols.push(column.name.clone());
            select_exprs.push(self.decimal_cast(src));
        }
        for column in fact.date_columns() {
            let src = column.source_column.as_deref().unwrap_or(&column.name);
            let format = column.format.as_deref().unwrap_or("%Y-%m-%d");
            fact_cols.push(column.name.clone());
            select_exprs.push(self.date_to_day_offset(src, format));
        }

        format!(
            "INSERT INTO {fact} ({cols}) SELECT {exprs} FROM {source} \
             WHERE {src_id} > (SELECT COALESCE(MAX(last_loaded_id), 0) FROM {snapshots} WHERE table_name = {fact_lit})",
            fact = fact.name,
            cols = fact_cols.join(", "),
            exprs = select_exprs.join(", "),
            source = source.name,
            src_id = naming::SOURCE_ROW_ID,
            snapshots = naming::SNAPSHOTS_TABLE,
            fact_lit = quote_literal(&fact.name),
        )
    }

    /// Fill one foreign-key slot on the fact table with the resolved
    /// lookup ids
    fn resolve_lookup_fk_sql(&self, schema: &PdmSchema, fk: &PdmColumn, lookup: &PdmTable) -> String {
        let fact = &schema.fact_table().name;
        let source = &schema.source_table().name;
        let qualified: Vec<String> = lookup
            .source_columns
            .iter()
            .map(|c| format!("{}.{}", source, c))
            .collect();
        let where_clause = format!(
            "{fact}.{fid} = {source}.{sid} AND {lk}.{value} = {key}",
            fid = naming::FACT_ROW_ID,
            sid = naming::SOURCE_ROW_ID,
            lk = lookup.name,
            value = naming::LOOKUP_VALUE,
            key = self.concat(&qualified),
        );
        self.update_with_join_sql(
            fact,
            &[source.as_str(), lookup.name.as_str()],
            &fk.name,
            &format!("{}.{}", lookup.name, naming::LOOKUP_ID),
            &where_clause,
        )
    }

    /// Record a snapshot of the fact table at its current watermark
    fn record_snapshot_sql(&self, schema: &PdmSchema) -> String {
        let fact = &schema.fact_table().name;
        format!(
            "INSERT INTO {snapshots} (table_name, last_loaded_id) SELECT {fact_lit}, COALESCE(MAX({fid}), 0) FROM {fact}",
            snapshots = naming::SNAPSHOTS_TABLE,
            fact_lit = quote_literal(fact),
            fid = naming::FACT_ROW_ID,
        )
    }

    /// Highest snapshot id recorded, or the no-snapshot sentinel
    fn last_snapshot_id_sql(&self) -> String {
        format!(
            "SELECT COALESCE(MAX(id), {}) FROM {}",
            silo_core::snapshot::NO_SNAPSHOT,
            naming::SNAPSHOTS_TABLE
        )
    }

    /// Snapshots newest-first, for listing
    fn list_snapshots_sql(&self) -> String {
        format!(
            "SELECT id, table_name, last_loaded_id FROM {} ORDER BY id DESC",
            naming::SNAPSHOTS_TABLE
        )
    }

    /// Snapshots of one table oldest-first, for range derivation
    fn snapshots_for_table_sql(&self, table: &str) -> String {
        format!(
            "SELECT id, table_name, last_loaded_id FROM {} WHERE table_name = {} ORDER BY id ASC",
            naming::SNAPSHOTS_TABLE,
            quote_literal(table)
        )
    }

    /// Unload one DLI part to `file`. `ranges` filters fact rows by the
    /// selected snapshots; `None` unloads everything.
    fn load_part_sql(
        &self,
        table: &str,
        columns: &[String],
        file: &str,
        ranges: Option<&[SnapshotRange]>,
    ) -> String {
        let where_clause = match ranges {
            None => String::new(),
            Some([]) => " WHERE 1 = 0".to_string(),
            Some(ranges) => {
                let predicates: Vec<String> = ranges
                    .iter()
                    .map(|r| format!("{} BETWEEN {} AND {}", naming::FACT_ROW_ID, r.first, r.last))
                    .collect();
                format!(" WHERE {}", predicates.join(" OR "))
            }
        };
        let select = format!(
            "SELECT {} FROM {}{}",
            columns.join(", "),
            table,
            where_clause
        );
        self.unload_sql(&select, file)
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
