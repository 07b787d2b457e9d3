//! Error types for silo-core

use thiserror::Error;

/// Core error type for Silo
#[derive(Error, Debug)]
pub enum CoreError {
    /// M001: Wrong number of source/fact tables in a PDM schema
    #[error("[M001] Schema '{schema}' must have exactly one {role} table, found {count}")]
    TableRoleCardinality {
        schema: String,
        role: String,
        count: usize,
    },

    /// M002: Column provenance does not resolve on the source table
    #[error("[M002] Column '{column}' on table '{table}' references unknown source column '{source_column}'")]
    UnresolvedSourceColumn {
        table: String,
        column: String,
        source_column: String,
    },

    /// M003: Foreign-key slot references a lookup table that does not exist
    #[error("[M003] Column '{column}' on table '{table}' references unknown lookup table '{lookup}'")]
    UnresolvedLookup {
        table: String,
        column: String,
        lookup: String,
    },

    /// M004: Duplicate table name in a PDM schema
    #[error("[M004] Duplicate table name '{name}' in schema '{schema}'")]
    DuplicateTable { schema: String, name: String },

    /// C001: Invalid source-model configuration
    #[error("[C001] Invalid source config: {message}")]
    ConfigInvalid { message: String },

    /// C002: IO error with file path context
    #[error("[C002] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C003: YAML parse error
    #[error("[C003] YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
