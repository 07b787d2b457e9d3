//! Processing context threaded through command execution
//!
//! One context exists per run. It carries the active project id, the
//! active connector backend (replaced when the script switches
//! projects; the previous backend's connection is dropped with it), and
//! the lazily-constructed remote platform clients.

use crate::error::{ScriptError, ScriptResult};
use crate::remote::{FtpApiClient, RemoteConfig, RestApiClient};
use silo_db::ConnectorBackend;

/// Mutable state shared by the commands of one script run
pub struct ProcessingContext {
    project_id: Option<String>,
    backend: Option<Box<dyn ConnectorBackend>>,
    remote: Option<RemoteConfig>,
    rest_api: Option<RestApiClient>,
    ftp_api: Option<FtpApiClient>,
}

impl ProcessingContext {
    pub fn new(remote: Option<RemoteConfig>) -> Self {
        Self {
            project_id: None,
            backend: None,
            remote,
            rest_api: None,
            ftp_api: None,
        }
    }

    /// Active project id, or `[S005]` when no project is active
    pub fn project_id(&self) -> ScriptResult<&str> {
        self.project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ScriptError::NoActiveProject)
    }

    pub fn set_project_id(&mut self, project_id: impl Into<String>) {
        self.project_id = Some(project_id.into());
    }

    /// Active connector backend, or `[S006]` when none is loaded
    pub fn backend(&self) -> ScriptResult<&dyn ConnectorBackend> {
        self.backend
            .as_deref()
            .ok_or(ScriptError::NoActiveBackend)
    }

    pub fn backend_mut(&mut self) -> ScriptResult<&mut Box<dyn ConnectorBackend>> {
        self.backend.as_mut().ok_or(ScriptError::NoActiveBackend)
    }

    /// Install the backend for the active project; any previous backend
    /// is dropped, closing its connection
    pub fn set_backend(&mut self, backend: Box<dyn ConnectorBackend>) {
        if let Some(old) = &self.backend {
            log::debug!(
                "Replacing connector backend for project '{}'",
                old.project_id()
            );
        }
        self.backend = Some(backend);
    }

    /// REST client, constructed on first use from the remote config
    pub fn rest_api(&mut self) -> ScriptResult<&RestApiClient> {
        if self.rest_api.is_none() {
            let config = self.remote_config()?;
            self.rest_api = Some(RestApiClient::connect(config)?);
        }
        Ok(self.rest_api.as_ref().unwrap())
    }

    /// FTP client, constructed on first use from the remote config
    pub fn ftp_api(&mut self) -> ScriptResult<&FtpApiClient> {
        if self.ftp_api.is_none() {
            let config = self.remote_config()?;
            self.ftp_api = Some(FtpApiClient::connect(config)?);
        }
        Ok(self.ftp_api.as_ref().unwrap())
    }

    fn remote_config(&self) -> ScriptResult<&RemoteConfig> {
        self.remote
            .as_ref()
            .ok_or_else(|| ScriptError::Remote("no remote configuration supplied".to_string()))
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
