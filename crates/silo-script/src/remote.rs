//! Remote platform client boundary
//!
//! Thin handles for the platform's REST and file-transfer endpoints.
//! They validate and hold connection settings; the transport and
//! authentication protocols themselves live outside this core, which
//! only ever hands them a finished package.

use crate::error::{ScriptError, ScriptResult};

/// Connection settings for the remote platform
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl RemoteConfig {
    fn validate(&self, client: &str) -> ScriptResult<()> {
        if self.host.trim().is_empty() {
            return Err(ScriptError::Remote(format!(
                "{} client requires a host",
                client
            )));
        }
        if self.username.trim().is_empty() {
            return Err(ScriptError::Remote(format!(
                "{} client requires a username",
                client
            )));
        }
        Ok(())
    }
}

/// Handle on the platform REST endpoint
#[derive(Debug)]
pub struct RestApiClient {
    host: String,
}

impl RestApiClient {
    pub fn connect(config: &RemoteConfig) -> ScriptResult<Self> {
        config.validate("REST")?;
        log::debug!("Using the platform REST host '{}'", config.host);
        Ok(Self {
            host: config.host.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Handle on the platform file-transfer endpoint
#[derive(Debug)]
pub struct FtpApiClient {
    host: String,
}

impl FtpApiClient {
    pub fn connect(config: &RemoteConfig) -> ScriptResult<Self> {
        config.validate("FTP")?;
        log::debug!("Using the platform FTP host '{}'", config.host);
        Ok(Self {
            host: config.host.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
