//! Run command implementation

use anyhow::{bail, Context, Result};
use silo_script::{execute_script, parse_script, ProcessingContext};
use std::fs;
use std::time::Instant;

use crate::cli::{GlobalArgs, RunArgs};

pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let start = Instant::now();
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script '{}'", args.script))?;
    let commands = parse_script(&text)
        .with_context(|| format!("Failed to parse script '{}'", args.script))?;

    if global.verbose {
        println!("Running {} commands from '{}'", commands.len(), args.script);
    }

    let mut ctx = ProcessingContext::new(global.remote_config());
    let outcome = execute_script(commands, &mut ctx).await;

    match outcome.failure {
        Some(failure) => {
            eprintln!(
                "Command {} (line {}) failed: {}",
                failure.command, failure.command.line, failure.error
            );
            eprintln!(
                "{} commands executed, {} skipped",
                outcome.executed, outcome.remaining
            );
            bail!("script '{}' failed", args.script);
        }
        None => {
            println!(
                "Completed {} commands in {:.2}s",
                outcome.executed,
                start.elapsed().as_secs_f64()
            );
            Ok(())
        }
    }
}
