//! Check command implementation

use anyhow::{Context, Result};
use silo_script::parse_script;
use std::fs;

use crate::cli::{CheckArgs, GlobalArgs};

pub async fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script '{}'", args.script))?;
    let commands = parse_script(&text)
        .with_context(|| format!("Failed to parse script '{}'", args.script))?;

    if global.verbose {
        for command in &commands {
            println!("line {}: {}", command.line, command);
        }
    }
    println!("{}: {} commands", args.script, commands.len());
    Ok(())
}
