//! Physical data model (PDM) for one integration project
//!
//! The PDM describes the staging schema a project normalizes into: one
//! raw source table, one fact table, and a lookup table per
//! distinct-value group. It is validated on construction and read-only
//! afterwards; the connector backend and dialect drivers only ever read
//! it.

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;

/// Role a table plays in the staging schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Raw extract of the flat file, all columns VARCHAR
    Source,
    /// Normalized fact rows, one per source row
    Fact,
    /// Deduplicated distinct values of one source-column group
    Lookup,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRole::Source => write!(f, "source"),
            TableRole::Fact => write!(f, "fact"),
            TableRole::Lookup => write!(f, "lookup"),
        }
    }
}

/// Semantic kind of a PDM column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain value column (raw source field, lookup natural key, FK slot)
    Attribute,
    /// Numeric measure, decimal-cast at transform time
    Fact,
    /// Date converted to an integer day offset at transform time
    Date,
    /// Database-assigned autoincrement id
    AutoincrementId,
}

/// One column of a PDM table
#[derive(Debug, Clone)]
pub struct PdmColumn {
    pub name: String,
    pub kind: ColumnKind,
    /// Source-table column this column is derived from (fact/date columns)
    pub source_column: Option<String>,
    /// strptime format for `Date` columns
    pub format: Option<String>,
    /// Lookup table this column is a foreign-key slot for
    pub lookup: Option<String>,
}

impl PdmColumn {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source_column: None,
            format: None,
            lookup: None,
        }
    }

    pub fn with_source(mut self, source_column: impl Into<String>) -> Self {
        self.source_column = Some(source_column.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_lookup(mut self, lookup: impl Into<String>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }
}

/// One table of the staging schema
#[derive(Debug, Clone)]
pub struct PdmTable {
    pub name: String,
    pub role: TableRole,
    pub columns: Vec<PdmColumn>,
    /// For lookup tables: the source columns whose concatenation forms
    /// the natural key, in declaration order
    pub source_columns: Vec<String>,
}

impl PdmTable {
    pub fn new(name: impl Into<String>, role: TableRole, columns: Vec<PdmColumn>) -> Self {
        Self {
            name: name.into(),
            role,
            columns,
            source_columns: Vec::new(),
        }
    }

    pub fn with_source_columns(mut self, source_columns: Vec<String>) -> Self {
        self.source_columns = source_columns;
        self
    }

    /// Measure columns, in declaration order
    pub fn fact_columns(&self) -> Vec<&PdmColumn> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Fact)
            .collect()
    }

    /// Date columns, in declaration order
    pub fn date_columns(&self) -> Vec<&PdmColumn> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Date)
            .collect()
    }

    /// Attribute columns (excluding foreign-key slots), in declaration order
    pub fn attribute_columns(&self) -> Vec<&PdmColumn> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Attribute && c.lookup.is_none())
            .collect()
    }

    /// Foreign-key slots pointing at lookup tables
    pub fn foreign_key_columns(&self) -> Vec<&PdmColumn> {
        self.columns.iter().filter(|c| c.lookup.is_some()).collect()
    }

    /// The autoincrement id column, if the table has one
    pub fn autoincrement_column(&self) -> Option<&PdmColumn> {
        self.columns
            .iter()
            .find(|c| c.kind == ColumnKind::AutoincrementId)
    }

    /// All columns except the autoincrement id, in declaration order
    pub fn non_autoincrement_columns(&self) -> Vec<&PdmColumn> {
        self.columns
            .iter()
            .filter(|c| c.kind != ColumnKind::AutoincrementId)
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&PdmColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The validated staging schema of one project
#[derive(Debug, Clone)]
pub struct PdmSchema {
    name: String,
    tables: Vec<PdmTable>,
    source_idx: usize,
    fact_idx: usize,
}

impl PdmSchema {
    /// Build a schema and check its invariants: exactly one source table,
    /// exactly one fact table, unique table names, and every column
    /// provenance resolving on the source table.
    pub fn new(name: impl Into<String>, tables: Vec<PdmTable>) -> CoreResult<Self> {
        let name = name.into();

        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.name.as_str()) {
                return Err(CoreError::DuplicateTable {
                    schema: name,
                    name: table.name.clone(),
                });
            }
        }

        let source_idx = Self::index_of_single(&name, &tables, TableRole::Source)?;
        let fact_idx = Self::index_of_single(&name, &tables, TableRole::Fact)?;

        let schema = Self {
            name,
            tables,
            source_idx,
            fact_idx,
        };
        schema.check_references()?;
        Ok(schema)
    }

    fn index_of_single(name: &str, tables: &[PdmTable], role: TableRole) -> CoreResult<usize> {
        let matches: Vec<usize> = tables
            .iter()
            .enumerate()
            .filter(|(_, t)| t.role == role)
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [idx] => Ok(*idx),
            _ => Err(CoreError::TableRoleCardinality {
                schema: name.to_string(),
                role: role.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn check_references(&self) -> CoreResult<()> {
        let source = &self.tables[self.source_idx];
        let lookups: HashSet<&str> = self
            .lookup_tables()
            .iter()
            .map(|t| t.name.as_str())
            .collect();

        for table in self.tables.iter().filter(|t| t.role != TableRole::Source) {
            for column in &table.columns {
                if let Some(src) = &column.source_column {
                    if source.column(src).is_none() {
                        return Err(CoreError::UnresolvedSourceColumn {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            source_column: src.clone(),
                        });
                    }
                }
                if let Some(lookup) = &column.lookup {
                    if !lookups.contains(lookup.as_str()) {
                        return Err(CoreError::UnresolvedLookup {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            lookup: lookup.clone(),
                        });
                    }
                }
            }
            for src in &table.source_columns {
                if source.column(src).is_none() {
                    return Err(CoreError::UnresolvedSourceColumn {
                        table: table.name.clone(),
                        column: table.name.clone(),
                        source_column: src.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tables(&self) -> &[PdmTable] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&PdmTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn source_table(&self) -> &PdmTable {
        &self.tables[self.source_idx]
    }

    pub fn fact_table(&self) -> &PdmTable {
        &self.tables[self.fact_idx]
    }

    /// Lookup tables, in declaration order
    pub fn lookup_tables(&self) -> Vec<&PdmTable> {
        self.tables
            .iter()
            .filter(|t| t.role == TableRole::Lookup)
            .collect()
    }
}

#[cfg(test)]
#[path = "pdm_test.rs"]
mod tests;
