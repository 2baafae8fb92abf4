use std::path::PathBuf;

use thiserror::Error;

use crate::parser::SchemaError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Error reading statement at path: {} | {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error(transparent)]
    Schema(#[from] SchemaError)
}
