//! Error types for silo-script

use thiserror::Error;

/// Scripting layer errors
#[derive(Error, Debug)]
pub enum ScriptError {
    /// S001: Malformed script line
    #[error("[S001] Parse error at line {line}: {text}")]
    ParseError { line: usize, text: String },

    /// S002: Operation name outside the closed command set
    #[error("[S002] Unknown command '{name}' at line {line}")]
    UnknownCommand { line: usize, name: String },

    /// S003: Required command argument missing
    #[error("[S003] Command '{command}' is missing required parameter '{parameter}'")]
    MissingParameter { command: String, parameter: String },

    /// S004: Argument present but unusable
    #[error("[S004] Invalid parameter '{parameter}' for command '{command}': {message}")]
    InvalidParameter {
        command: String,
        parameter: String,
        message: String,
    },

    /// S005: Command needs an active project
    #[error("[S005] No project is active; activate one via CreateProject or OpenProject")]
    NoActiveProject,

    /// S006: Command needs an active connector backend
    #[error("[S006] No connector is active; load one via UseCsv")]
    NoActiveBackend,

    /// S007: Remote platform client misconfigured
    #[error("[S007] Remote client error: {0}")]
    Remote(String),

    /// Model/config error from silo-core
    #[error(transparent)]
    Core(#[from] silo_core::CoreError),

    /// Database error from silo-db
    #[error(transparent)]
    Db(#[from] silo_db::DbError),
}

/// Result type alias for ScriptError
pub type ScriptResult<T> = Result<T, ScriptError>;
