//! Data Loading Interface (DLI) descriptors
//!
//! A DLI maps staging tables to the file layout the remote platform's
//! upload package expects. Descriptors are produced by the platform and
//! only consumed here; the declared column order is the column order of
//! the unloaded file.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One part of a DLI: a single table unloaded to a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DliPart {
    /// Output file name inside the package directory
    pub file_name: String,

    /// Staging table the part unloads
    pub table: String,

    /// Columns to unload, in output order
    pub columns: Vec<String>,
}

/// A complete Data Loading Interface descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dli {
    pub name: String,

    pub parts: Vec<DliPart>,
}

impl Dli {
    /// Load a DLI descriptor from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let dli: Dli = serde_yaml::from_str(&content)?;
        Ok(dli)
    }
}

#[cfg(test)]
#[path = "dli_test.rs"]
mod tests;
