//! Packaging boundary for deploys
//!
//! The backend unloads part files into a directory and hands the
//! directory plus archive name to a [`Packager`]. The archive container
//! format itself belongs to the platform tooling, not to this crate.

use crate::error::{DbError, DbResult};
use std::path::{Path, PathBuf};

/// External collaborator turning a directory of part files into an
/// upload package
pub trait Packager: Send + Sync {
    /// Package the part files in `dir` under `archive_name`, returning
    /// the path of the produced package
    fn package(&self, dir: &Path, archive_name: &str) -> DbResult<PathBuf>;
}

/// Default packager: stages the part files into a package directory
/// named after the archive, ready for the platform's archiver.
pub struct DirPackager;

impl Packager for DirPackager {
    fn package(&self, dir: &Path, archive_name: &str) -> DbResult<PathBuf> {
        let target = dir.join(archive_name);
        std::fs::create_dir_all(&target).map_err(|e| DbError::Io {
            path: target.display().to_string(),
            source: e,
        })?;

        let entries = std::fs::read_dir(dir).map_err(|e| DbError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let dest = target.join(entry.file_name());
            std::fs::rename(&path, &dest).map_err(|e| DbError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        log::debug!("Staged package '{}'", target.display());
        Ok(target)
    }
}

#[cfg(test)]
#[path = "package_test.rs"]
mod tests;
