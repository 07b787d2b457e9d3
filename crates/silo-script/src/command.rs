//! Parsed script commands

use crate::error::{ScriptError, ScriptResult};

/// One parsed script command: an operation name plus ordered named
/// string arguments. Immutable; consumed exactly once by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<(String, String)>,
    /// Source line the command was parsed from (1-based)
    pub line: usize,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<(String, String)>, line: usize) -> Self {
        Self {
            name: name.into(),
            args,
            line,
        }
    }

    /// Look up an argument by name
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an argument, failing with `[S003]` when absent
    pub fn required_arg(&self, name: &str) -> ScriptResult<&str> {
        self.arg(name).ok_or_else(|| ScriptError::MissingParameter {
            command: self.name.clone(),
            parameter: name.to_string(),
        })
    }

    /// True when the argument is present with the value `true`
    pub fn flag(&self, name: &str) -> bool {
        self.arg(name) == Some("true")
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect();
        write!(f, "{}({})", self.name, args.join(", "))
    }
}
