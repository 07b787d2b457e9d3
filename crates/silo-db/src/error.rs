//! Error types for silo-db

use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: Connection error
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// D002: Failing SQL statement, with the statement that caused it
    #[error("[D002] SQL execution failed: {message} (statement: {statement})")]
    ExecutionError { statement: String, message: String },

    /// D003: Schema initialization refused because a table already exists
    #[error("[D003] Table '{table}' already exists; re-run with overwrite to replace the schema")]
    SchemaExists { table: String },

    /// D004: Data operation invoked before the schema was initialized
    #[error("[D004] Cannot run {operation}: project schema is not initialized")]
    NotInitialized { operation: String },

    /// D005: DLI part references a table outside the PDM
    #[error("[D005] Unknown table '{table}' referenced by DLI part")]
    UnknownTable { table: String },

    /// D006: Mutex poisoned
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// D007: Filesystem error while staging package files
    #[error("[D007] Failed to access '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// D008: Packaging collaborator failure
    #[error("[D008] Packaging failed: {0}")]
    Package(String),

    /// D009: Internal contract violation
    #[error("[D009] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
