pub mod app;

// Re-export useful types for library users
pub use app::config::{AppConfig, TableTarget};
pub use app::error::GenError;
pub use app::formatter::OutputGenerator;
pub use app::inspector::Inspector;
pub use app::models::{Column, ForeignKeyInfo, ForeignKeyRef, NameSet, TableModel};
pub use app::{generate_class, load_model, write_class};
