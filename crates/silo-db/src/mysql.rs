//! MySQL dialect driver
//!
//! Text generation only; no MySQL connector backend ships yet. Kept
//! alongside the DuckDB reference dialect to exercise the dialect axes:
//! `AUTO_INCREMENT` columns, `CONCAT(..)` hashing, `STR_TO_DATE` /
//! `DATEDIFF` date arithmetic, a stored `ATOD` function, and
//! `LOAD DATA INFILE` / `INTO OUTFILE` bulk transfer.

use crate::dialect::{quote_literal, AutoincrementSyntax, SqlDialect};
use silo_core::naming;
use silo_core::pdm::PdmSchema;

/// MySQL SQL dialect
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn autoincrement_column(&self, _table: &str, _column: &str) -> AutoincrementSyntax {
        AutoincrementSyntax {
            setup: Vec::new(),
            type_clause: "INT AUTO_INCREMENT PRIMARY KEY".to_string(),
            teardown: Vec::new(),
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
            "IFNULL(DATEDIFF(STR_TO_DATE({expr}, {fmt}), '1900-01-01'), {ceiling}) + 1",
            fmt = quote_literal(format),
            ceiling = naming::DATE_OFFSET_CEILING,
        )
    }

    fn decimal_cast(&self, expr: &str) -> String {
        format!("ATOD({})", expr)
    }

    fn helper_function_ddl(&self) -> Vec<String> {
        let stripped = naming::DISCARD_CHARS
            .iter()
            .fold("str".to_string(), |acc, c| {
                format!("REPLACE({}, '{}', '')", acc, c)
            });
        vec![
            "DROP FUNCTION IF EXISTS ATOD".to_string(),
            format!(
                "CREATE FUNCTION ATOD(str VARCHAR(255)) RETURNS {decimal} \
                 RETURN CASE WHEN str = '' THEN NULL ELSE CAST({stripped} AS {decimal}) END",
                decimal = self.decimal_type(),
            ),
        ]
    }

    fn extract_sql(&self, schema: &PdmSchema, file: &str) -> String {
        let source = schema.source_table();
        let columns: Vec<&str> = source
            .non_autoincrement_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        format!(
            "LOAD DATA INFILE {file} INTO TABLE {table} CHARACTER SET UTF8 \
             COLUMNS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' LINES TERMINATED BY '\\n' ({cols})",
            file = quote_literal(file),
            table = source.name,
            cols = columns.join(", "),
        )
    }

    fn unload_sql(&self, select: &str, file: &str) -> String {
        format!(
            "{select} INTO OUTFILE {file} \
             FIELDS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' LINES TERMINATED BY '\\n'",
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
            "UPDATE {target}, {joined} SET {target}.{set_column} = {set_value} WHERE {where_clause}",
            joined = joined.join(", "),
        )
    }

    fn table_exists_sql(&self, table: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name = {}",
            quote_literal(table)
        )
    }
}

#[cfg(test)]
#[path = "mysql_test.rs"]
mod tests;
