use crate::app::cli::Cli;
use crate::app::error::GenError;
use anyhow::{Context, Result};
use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub output_dir: PathBuf,
}

/// The table a run generates a class for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTarget {
    pub schema: String,
    pub table: String,
}

/// Loads environment variables from a .env file if present. Runs before
/// logging is set up so a `RUST_LOG` in .env takes effect.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let db_url = cli
        .db_url
        .clone()
        .or_else(|| env::var("DB_URL").ok())
        .context("DB_URL must be set via --db-url or in .env/environment variables")?;

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| env::var("OUTPUT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(AppConfig { db_url, output_dir })
}

/// Resolves schema and table from flags, prompting for the table (and the
/// schema, unless given) when `--table` is absent.
pub fn resolve_target<R, W>(
    schema: Option<&str>,
    table: Option<&str>,
    input: &mut R,
    prompt: &mut W,
) -> std::result::Result<TableTarget, GenError>
where
    R: BufRead,
    W: Write,
{
    let (schema, table) = match table {
        Some(table) => (schema.map(str::to_string).unwrap_or_default(), table.to_string()),
        None => {
            let schema = match schema {
                Some(schema) => schema.to_string(),
                None => ask(
                    &format!("Schema (ENTER for '{DEFAULT_SCHEMA}'): "),
                    input,
                    prompt,
                )?,
            };
            let table = ask("Table name: ", input, prompt)?;
            (schema, table)
        }
    };

    let table = table.trim();
    if table.is_empty() {
        return Err(GenError::UserInput(
            "No table name given. Cancelled.".to_string(),
        ));
    }

    let schema = match schema.trim() {
        "" => DEFAULT_SCHEMA,
        trimmed => trimmed,
    };

    Ok(TableTarget {
        schema: schema.to_string(),
        table: table.to_string(),
    })
}

fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, prompt: &mut W) -> Result<String> {
    write!(prompt, "{question}").context("Failed to write prompt")?;
    prompt.flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read from standard input")?;
    Ok(answer)
}
