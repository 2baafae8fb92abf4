mod encoding;
mod errors;
mod header;
mod normalizer;
mod tokenizer;

pub use encoding::decode_windows_1252;
pub use errors::SchemaError;
pub use header::{missing_columns, validate_header, REQUIRED_COLUMNS};
pub use normalizer::{normalize, Ingestion, NormalizeOptions, SkippedRow};
pub use tokenizer::tokenize_row;
