use thiserror::Error;

/// The statement header is unusable; nothing from the file is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Invalid CSV format: missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>)
}
