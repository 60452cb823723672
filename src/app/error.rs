use std::path::PathBuf;
use std::process::ExitCode;

pub const EXIT_OK: u8 = 0;
pub const EXIT_USER_INPUT: u8 = 1;
pub const EXIT_SCHEMA_NOT_FOUND: u8 = 2;
pub const EXIT_FAILURE: u8 = 99;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("{0}")]
    UserInput(String),

    #[error("no columns found for [{schema}].[{table}]")]
    SchemaNotFound { schema: String, table: String },

    #[error("database error: {0}")]
    DataAccess(#[from] sqlx::Error),

    #[error("failed to write {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render class: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("{0:#}")]
    Config(anyhow::Error),
}

impl From<anyhow::Error> for GenError {
    fn from(err: anyhow::Error) -> Self {
        GenError::Config(err)
    }
}

impl GenError {
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::UserInput(_) => EXIT_USER_INPUT,
            GenError::SchemaNotFound { .. } => EXIT_SCHEMA_NOT_FOUND,
            GenError::DataAccess(_)
            | GenError::FileSystem { .. }
            | GenError::Render(_)
            | GenError::Config(_) => EXIT_FAILURE,
        }
    }
}

impl From<&GenError> for ExitCode {
    fn from(err: &GenError) -> Self {
        ExitCode::from(err.exit_code())
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
