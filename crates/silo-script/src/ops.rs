//! The closed set of script operations
//!
//! Every operation name a script may use is resolved here; anything
//! else fails with `[S002] UnknownCommand`. Operations read and mutate
//! the processing context and drive the active connector backend.

use crate::command::Command;
use crate::context::ProcessingContext;
use crate::error::{ScriptError, ScriptResult};
use silo_core::config::SourceConfig;
use silo_core::dli::Dli;
use silo_db::DuckDbBackend;
use std::path::Path;
use uuid::Uuid;

/// Execute one command against the context
pub async fn execute_command(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    match command.name.as_str() {
        "CreateProject" => create_project(command, ctx),
        "OpenProject" => open_project(command, ctx),
        "UseCsv" => use_csv(command, ctx),
        "Initialize" => initialize(command, ctx).await,
        "Extract" => extract(command, ctx).await,
        "Transform" => transform(ctx).await,
        "ListSnapshots" => list_snapshots(ctx).await,
        "DropSnapshots" => drop_snapshots(ctx).await,
        "Deploy" => deploy(command, ctx, None).await,
        "DeploySnapshot" => deploy_snapshot(command, ctx).await,
        _ => Err(ScriptError::UnknownCommand {
            line: command.line,
            name: command.name.clone(),
        }),
    }
}

fn create_project(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let name = command.required_arg("name")?;
    let project_id = Uuid::new_v4().to_string();
    log::info!("Created project '{}' with id {}", name, project_id);
    ctx.set_project_id(project_id);
    Ok(())
}

fn open_project(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let id = command.required_arg("id")?;
    ctx.set_project_id(id);
    log::info!("Opened project {}", id);
    Ok(())
}

/// Load a source-model config and attach a connector backend for it to
/// the active project
fn use_csv(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let config_file = command.required_arg("configFile")?;
    let database = command.arg("database").unwrap_or(":memory:");
    let project_id = ctx.project_id()?.to_string();

    let config = SourceConfig::load(Path::new(config_file))?;
    let schema = config.build_pdm()?;
    let backend = DuckDbBackend::open(database, &project_id, schema)?;
    ctx.set_backend(Box::new(backend));
    Ok(())
}

async fn initialize(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let overwrite = command.flag("overwrite");
    ctx.backend_mut()?.initialize(overwrite).await?;
    Ok(())
}

async fn extract(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let file = command.required_arg("file")?;
    ctx.backend()?.extract(Path::new(file)).await?;
    Ok(())
}

async fn transform(ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let outcome = ctx.backend()?.transform().await?;
    match outcome.snapshot_id {
        Some(id) => log::info!(
            "Loaded {} rows as snapshot {}",
            outcome.rows_loaded,
            id
        ),
        None => log::info!("No new rows to load"),
    }
    Ok(())
}

async fn list_snapshots(ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let snapshots = ctx.backend()?.list_snapshots().await?;
    if snapshots.is_empty() {
        println!("no snapshots recorded");
    }
    for snapshot in snapshots {
        println!("{}", snapshot);
    }
    Ok(())
}

async fn drop_snapshots(ctx: &mut ProcessingContext) -> ScriptResult<()> {
    ctx.backend_mut()?.drop_snapshots().await?;
    Ok(())
}

async fn deploy(
    command: &Command,
    ctx: &mut ProcessingContext,
    snapshot_ids: Option<Vec<i64>>,
) -> ScriptResult<()> {
    let dli_file = command.required_arg("dli")?;
    let dir = command.required_arg("dir")?;
    let archive = command.required_arg("archive")?;

    let dli = Dli::load(Path::new(dli_file))?;
    let backend = ctx.backend()?;
    let package = match snapshot_ids {
        Some(ids) => {
            backend
                .deploy_snapshot(&dli, &dli.parts, Path::new(dir), archive, Some(&ids))
                .await?
        }
        None => {
            backend
                .deploy(&dli, &dli.parts, Path::new(dir), archive)
                .await?
        }
    };
    log::info!("Deployed package '{}'", package.display());
    Ok(())
}

async fn deploy_snapshot(command: &Command, ctx: &mut ProcessingContext) -> ScriptResult<()> {
    let raw = command.required_arg("snapshots")?;
    let ids = parse_snapshot_ids(&command.name, raw)?;
    deploy(command, ctx, Some(ids)).await
}

fn parse_snapshot_ids(command: &str, raw: &str) -> ScriptResult<Vec<i64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| ScriptError::InvalidParameter {
                    command: command.to_string(),
                    parameter: "snapshots".to_string(),
                    message: e.to_string(),
                })
        })
        .collect()
}
