//! Source-model configuration parsing for silo project files
//!
//! A project file describes the columns of the flat file being
//! integrated; the staging schema (PDM) is derived from it. Example:
//!
//! ```yaml
//! name: quotes
//! columns:
//!   - name: company
//!     kind: attribute
//!   - name: price
//!     kind: fact
//!   - name: traded_on
//!     kind: date
//!     format: yyyy-MM-dd
//! ```

use crate::error::{CoreError, CoreResult};
use crate::naming;
use crate::pdm::{ColumnKind, PdmColumn, PdmSchema, PdmTable, TableRole};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Kind of a source column as declared in the project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceColumnKind {
    /// Distinct-value column, backed by a lookup table
    Attribute,
    /// Numeric measure
    Fact,
    /// Date in a configured format
    Date,
}

/// One column of the flat-file source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceColumnConfig {
    pub name: String,

    pub kind: SourceColumnKind,

    /// Java-style date pattern (e.g. `yyyy-MM-dd`), required for `date`
    #[serde(default)]
    pub format: Option<String>,

    /// Distinct-value group this attribute belongs to; attributes sharing
    /// a group share one lookup table. Defaults to the column name.
    #[serde(default)]
    pub lookup: Option<String>,
}

/// Project configuration describing one flat-file source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: String,

    pub columns: Vec<SourceColumnConfig>,
}

impl SourceConfig {
    /// Load and validate a project file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: SourceConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!(
            "Loaded project '{}' with {} source columns",
            config.name,
            config.columns.len()
        );
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if naming::format_identifier(&self.name).is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must contain at least one alphanumeric character"
                    .to_string(),
            });
        }
        if self.columns.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: format!("project '{}' has no columns", self.name),
            });
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            let ident = naming::format_identifier(&column.name);
            if ident.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("column name '{}' is not a usable identifier", column.name),
                });
            }
            if !seen.insert(ident) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("duplicate column '{}'", column.name),
                });
            }
            if column.kind == SourceColumnKind::Date && column.format.is_none() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("date column '{}' requires a 'format'", column.name),
                });
            }
        }
        Ok(())
    }

    /// Derive the staging schema: source table `o_<name>`, fact table
    /// `f_<name>`, and one lookup table per distinct-value group.
    pub fn build_pdm(&self) -> CoreResult<PdmSchema> {
        let project = naming::format_identifier(&self.name);

        let mut source_columns = vec![PdmColumn::new(
            naming::SOURCE_ROW_ID,
            ColumnKind::AutoincrementId,
        )];
        for column in &self.columns {
            source_columns.push(PdmColumn::new(
                naming::format_identifier(&column.name),
                ColumnKind::Attribute,
            ));
        }
        let source = PdmTable::new(
            format!("{}{}", naming::SOURCE_PREFIX, project),
            TableRole::Source,
            source_columns,
        );

        // Distinct-value groups in first-appearance order
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for column in &self.columns {
            if column.kind != SourceColumnKind::Attribute {
                continue;
            }
            let ident = naming::format_identifier(&column.name);
            let group = column
                .lookup
                .as_deref()
                .map(naming::format_identifier)
                .unwrap_or_else(|| ident.clone());
            match groups.iter_mut().find(|(g, _)| *g == group) {
                Some((_, members)) => members.push(ident),
                None => groups.push((group, vec![ident])),
            }
        }

        let mut tables = vec![source];
        let mut fact_columns = Vec::new();

        for column in &self.columns {
            let ident = naming::format_identifier(&column.name);
            match column.kind {
                SourceColumnKind::Fact => {
                    fact_columns.push(
                        PdmColumn::new(format!("{}{}", naming::FACT_PREFIX, ident), ColumnKind::Fact)
                            .with_source(ident),
                    );
                }
                SourceColumnKind::Date => {
                    let format = column.format.as_deref().unwrap_or_default();
                    fact_columns.push(
                        PdmColumn::new(format!("dt_{}", ident), ColumnKind::Date)
                            .with_source(ident)
                            .with_format(naming::convert_date_format(format)),
                    );
                }
                SourceColumnKind::Attribute => {}
            }
        }

        for (group, members) in &groups {
            let lookup_name = format!("{}{}_{}", naming::LOOKUP_PREFIX, project, group);
            tables.push(
                PdmTable::new(
                    lookup_name.clone(),
                    TableRole::Lookup,
                    vec![
                        PdmColumn::new(naming::LOOKUP_ID, ColumnKind::AutoincrementId),
                        PdmColumn::new(naming::LOOKUP_VALUE, ColumnKind::Attribute),
                    ],
                )
                .with_source_columns(members.clone()),
            );
            fact_columns.push(
                PdmColumn::new(format!("{}_id", group), ColumnKind::Attribute)
                    .with_lookup(lookup_name),
            );
        }

        tables.insert(
            1,
            PdmTable::new(
                format!("{}{}", naming::FACT_PREFIX, project),
                TableRole::Fact,
                fact_columns,
            ),
        );

        PdmSchema::new(project, tables)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
