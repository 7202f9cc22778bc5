mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use registry::{RunContext, init_run_logging, start_run, write_artifact, write_artifact_bytes};
use schemashift_assess::{
    AssessError, collect_assessment, render_schema_report, schema_report_file_name,
};
use schemashift_core::{
    Conv, Error as CoreError, SNAPSHOT_VERSION, SchemaIssue, apply_pg_dialect,
    compute_non_key_column_size, init_key_orders, sorted_table_ids_by_target_name, validate_conv,
};
use settings::load_settings;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("assessment error: {0}")]
    Assess(#[from] AssessError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings error: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("row limit exceeded for table(s): {}", .0.join(", "))]
    RowLimitExceeded(Vec<String>),
}

#[derive(Parser, Debug)]
#[command(name = "schemashift", version, about = "Schema conversion and assessment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a snapshot and write run artifacts.
    Convert(ConvertArgs),
    /// Print the JSON Schema of conversion snapshots.
    Schema,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Conversion snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    input: PathBuf,
    /// TOML file overriding the snapshot's engine limits.
    #[arg(long, value_name = "SETTINGS")]
    config: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Database name used for report file names.
    #[arg(long)]
    database: Option<String>,
    /// Restrict target types to the PostgreSQL-compatible dialect.
    #[arg(long, default_value_t = false)]
    pg_dialect: bool,
    /// Fail when any table exceeds the row size limit.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Schema => print_snapshot_schema(),
    }
}

fn run_convert(args: ConvertArgs) -> Result<(), CliError> {
    let ConvertArgs {
        input,
        config,
        run_dir,
        database,
        pg_dialect,
        strict,
    } = args;

    let content = std::fs::read_to_string(&input)?;
    let mut conv: Conv = serde_json::from_str(&content)?;
    if let Some(path) = config.as_deref() {
        conv.settings = load_settings(path)?;
    }
    validate_conv(&conv)?;

    let database = database
        .or_else(|| conv.database.clone())
        .ok_or_else(|| {
            CliError::InvalidConfig(
                "database name is required (--database or snapshot field)".to_string(),
            )
        })?;
    conv.database = Some(database.clone());

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        snapshot_version: SNAPSHOT_VERSION.to_string(),
        input,
        database: database.clone(),
        pg_dialect,
        strict,
        run_dir,
        settings: conv.settings.clone(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, database = %database);
    let timer = Instant::now();

    init_key_orders(&mut conv.src_schema);
    if pg_dialect {
        apply_pg_dialect(&mut conv);
    }

    let mut over_limit = Vec::new();
    for table_id in sorted_table_ids_by_target_name(&conv.target_schema) {
        let size = compute_non_key_column_size(&mut conv, &table_id)?;
        let exceeded = conv
            .schema_issues
            .table_level_issues(&table_id)
            .contains(&SchemaIssue::RowLimitExceeded);
        tracing::info!(
            event = "row_size_computed",
            table_id = %table_id,
            size = size,
            exceeded = exceeded
        );
        if exceeded {
            over_limit.push(conv.target_table_name(&table_id)?.to_string());
        }
    }

    log_schema_issues(&conv);
    let assessment = collect_assessment(&conv);

    write_artifact(&run_paths.conv_path, &conv)?;
    write_artifact(&run_paths.issues_path, &conv.schema_issues)?;
    write_artifact(&run_paths.assessment_path, &assessment)?;
    write_artifact_bytes(
        &run_paths.root.join(schema_report_file_name(&database)),
        &render_schema_report(&assessment)?,
    )?;

    if !conv.unexpecteds.is_empty() {
        tracing::warn!(event = "unexpected_conditions", count = conv.unexpecteds.len());
    }

    if strict && !over_limit.is_empty() {
        tracing::error!(event = "run_finished", status = "row_limit_exceeded");
        return Err(CliError::RowLimitExceeded(over_limit));
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);
    println!("{}", run_paths.root.display());

    Ok(())
}

fn log_schema_issues(conv: &Conv) {
    for (table_id, issues) in conv.schema_issues.iter() {
        for issue in &issues.table_level_issues {
            tracing::info!(
                event = "schema_issue",
                table_id = %table_id,
                issue = %issue,
                granularity = issue.granularity().as_str(),
                description = issue.description()
            );
        }
        for (col_id, col_issues) in &issues.column_level_issues {
            for issue in col_issues {
                tracing::info!(
                    event = "schema_issue",
                    table_id = %table_id,
                    col_id = %col_id,
                    issue = %issue,
                    granularity = issue.granularity().as_str(),
                    description = issue.description()
                );
            }
        }
    }
}

fn print_snapshot_schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(Conv);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
