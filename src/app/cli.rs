use clap::Parser;
use std::path::PathBuf;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   class generated
  1   table name missing or blank
  2   table not found or has no columns
  99  any other failure (configuration, database, file system)";

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None, after_help = EXIT_CODES_HELP)]
pub struct Cli {
    /// Database connection string. If not provided, looks for DB_URL env var.
    #[arg(short, long)]
    pub db_url: Option<String>,

    /// Directory for generated files. Falls back to OUTPUT_DIR, then `generated`.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Schema of the table. Prompted for when omitted; blank means `public`.
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Table to generate a class for. Prompted for when omitted.
    #[arg(short, long)]
    pub table: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
