//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Silo - scripted flat-file integration against an embedded database
#[derive(Parser, Debug)]
#[command(name = "silo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Remote platform host
    #[arg(long, global = true, env = "SILO_HOST")]
    pub host: Option<String>,

    /// Remote platform username
    #[arg(long, global = true, env = "SILO_USERNAME")]
    pub username: Option<String>,

    /// Remote platform password
    #[arg(long, global = true, env = "SILO_PASSWORD")]
    pub password: Option<String>,
}

impl GlobalArgs {
    /// Remote settings, present only when a host was supplied
    pub fn remote_config(&self) -> Option<silo_script::RemoteConfig> {
        self.host.as_ref().map(|host| silo_script::RemoteConfig {
            host: host.clone(),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and execute a script
    Run(RunArgs),

    /// Parse a script and report its commands without executing
    Check(CheckArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file to execute
    pub script: String,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Script file to check
    pub script: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
