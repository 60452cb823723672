pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod inspector;
pub mod logging;
pub mod models;
pub mod naming;
pub mod types;

use clap::Parser;
use sqlx::{Connection, PgConnection};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use self::cli::Cli;
use self::config::{AppConfig, TableTarget, load_dotenv, resolve_config, resolve_target};
use self::error::{GenError, Result};
use self::formatter::OutputGenerator;
use self::inspector::Inspector;
use self::logging::init_tracing;
use self::models::TableModel;

/// Reads the table's metadata over a single connection, closed before returning.
pub async fn load_model(db_url: &str, target: &TableTarget) -> Result<TableModel> {
    let mut conn = PgConnection::connect(db_url).await?;
    tracing::info!(schema = %target.schema, table = %target.table, "connected, reading catalog");

    let loaded = Inspector::new(&mut conn)
        .load(&target.schema, &target.table)
        .await;
    // On error paths the connection is dropped, which also closes it.
    let closed = conn.close().await;

    let model = loaded?;
    closed?;
    Ok(model)
}

/// Renders the class and writes it under `output_dir`. Nothing is written for
/// a model without columns.
pub fn write_class(model: &TableModel, output_dir: &Path) -> Result<PathBuf> {
    if model.columns.is_empty() {
        return Err(GenError::SchemaNotFound {
            schema: model.schema.clone(),
            table: model.table.clone(),
        });
    }

    let class_name = OutputGenerator::class_name(&model.table);
    let code = OutputGenerator::generate_class(model, &class_name)?;

    std::fs::create_dir_all(output_dir).map_err(|source| GenError::FileSystem {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let file_path = output_dir.join(OutputGenerator::file_name(&class_name));
    std::fs::write(&file_path, code).map_err(|source| GenError::FileSystem {
        path: file_path.clone(),
        source,
    })?;

    tracing::info!(path = %file_path.display(), columns = model.columns.len(), "class written");
    Ok(file_path)
}

// Connects, Scans, and Writes in one go.
pub async fn generate_class(config: &AppConfig, target: &TableTarget) -> Result<PathBuf> {
    let model = load_model(&config.db_url, target).await?;
    tracing::info!(
        columns = model.columns.len(),
        primary_keys = model.primary_keys.len(),
        identity = model.identity_columns.len(),
        foreign_keys = model.foreign_key_count(),
        "table model assembled"
    );
    write_class(&model, &config.output_dir)
}

async fn execute(args: &Cli) -> Result<PathBuf> {
    let stdin = std::io::stdin();
    let target = resolve_target(
        args.schema.as_deref(),
        args.table.as_deref(),
        &mut stdin.lock(),
        &mut std::io::stdout(),
    )?;
    let config = resolve_config(args)?;
    generate_class(&config, &target).await
}

pub async fn run() -> ExitCode {
    // 1. Parse Args
    let args = Cli::parse();
    load_dotenv();
    init_tracing(&args.log_level);

    // 2. Resolve, Scan, Write
    match execute(&args).await {
        Ok(path) => {
            println!("OK. Generated: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err, &mut std::io::stderr());
            ExitCode::from(&err)
        }
    }
}

/// Prints the single user-facing `ERROR:` line; details go to the debug log.
fn report_error<W: std::io::Write>(err: &GenError, out: &mut W) {
    tracing::debug!(code = err.exit_code(), error = ?err, "generation failed");
    let _ = writeln!(out, "ERROR: {err}");
}
