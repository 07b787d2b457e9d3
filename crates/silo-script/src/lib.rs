//! Script language and execution engine
//!
//! Parses `Operation(arg=value, ...)` scripts into commands and runs
//! them fail-fast against a processing context holding the active
//! project and connector backend.

pub mod command;
pub mod context;
pub mod error;
pub mod executor;
pub mod ops;
pub mod parser;
pub mod remote;

pub use command::Command;
pub use context::ProcessingContext;
pub use error::{ScriptError, ScriptResult};
pub use executor::{execute_script, CommandFailure, ScriptOutcome};
pub use parser::parse_script;
pub use remote::RemoteConfig;
