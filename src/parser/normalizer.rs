use tracing::{debug, info, warn};

use crate::models::Transaction;
use crate::parser::errors::SchemaError;
use crate::parser::header::missing_columns;
use crate::parser::tokenizer::tokenize_row;
use crate::types::{parse_currency, parse_statement_date, FormatError, TransactionId, DEFAULT_REFERENCE_YEAR};

const DATE: usize = 0;
const DESCRIPTION: usize = 1;
const CHARGES: usize = 2;
const CREDITS: usize = 3;
const RFC: usize = 4;
const REFERENCE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Statement dates carry no year; every row is placed in this one.
    pub reference_year: i32
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR
        }
    }
}

/// A data row that was dropped because one of its fields did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub content: String,
    pub error: FormatError
}

/// Outcome of normalizing one statement: the rows that parsed, in file order,
/// and a report of the ones that did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingestion {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>
}

/// Turns raw statement text into transactions.
///
/// The first line must be a header carrying every required column. Data rows
/// are read by position (`date, description, charges, credits, rfc,
/// reference`), blank lines are ignored, and a row with a bad date or amount
/// is dropped into `Ingestion::skipped` instead of failing the file.
///
/// # Errors
/// Returns `SchemaError` if the header is missing a required column. An empty
/// input counts as a header missing every column.
pub fn normalize(text: &str, options: &NormalizeOptions) -> Result<Ingestion, SchemaError> {
    let mut lines = text.lines().enumerate();

    let header = lines.next()
        .map(|(_, line)| tokenize_row(line))
        .unwrap_or_default();

    let missing = missing_columns(&header);

    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing.into_iter().map(String::from).collect()));
    }

    let mut ingestion = Ingestion::default();

    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;

        match parse_row(line_number, line, options) {
            Ok(transaction) => {
                debug!("Line [{line_number}] normalized: {} on {}", transaction.description, transaction.date);
                ingestion.transactions.push(transaction);
            }
            Err(error) => {
                warn!("Line [{line_number}] skipped: {error}");
                ingestion.skipped.push(SkippedRow {
                    line: line_number,
                    content: line.to_string(),
                    error
                });
            }
        }
    }

    info!("Normalized [{}] transactions, skipped [{}] rows", ingestion.transactions.len(), ingestion.skipped.len());

    Ok(ingestion)
}

fn parse_row(id: TransactionId, line: &str, options: &NormalizeOptions) -> Result<Transaction, FormatError> {
    let fields = tokenize_row(line);
    let field = |position: usize| fields.get(position).map(String::as_str).unwrap_or("");

    Ok(Transaction {
        id,
        date: parse_statement_date(field(DATE), options.reference_year)?,
        description: field(DESCRIPTION).to_string(),
        charges: parse_currency(field(CHARGES))?,
        credits: parse_currency(field(CREDITS))?,
        rfc: field(RFC).to_string(),
        reference: field(REFERENCE).to_string()
    })
}
