//! Bank statement ingestion and aggregation.
//!
//! Raw statement text flows one way: [`parser::normalize`] turns it into
//! [`models::Transaction`]s, [`analytics`] folds those into summaries, and
//! [`budget`] maps them onto user budget categories. [`engine::StatementEngine`]
//! ties the pieces into a session that loads files and memoizes results.

pub mod analytics;
pub mod budget;
pub mod engine;
pub mod models;
pub mod parser;
pub mod types;
