mod cache;
mod errors;
mod statement_engine;
#[cfg(test)]
mod tests;

pub use errors::EngineError;
pub use statement_engine::{EngineConfig, IngestReport, StatementEngine};
