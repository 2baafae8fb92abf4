use std::fs::File;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use statement_insights::analytics::{DateRange, KeywordRules, RiskPolicy, DEFAULT_HIGH_RISK_THRESHOLD};
use statement_insights::budget::BudgetLedger;
use statement_insights::engine::{EngineConfig, IngestReport, StatementEngine};
use statement_insights::models::Assignment;
use statement_insights::parser::NormalizeOptions;
use statement_insights::types::DEFAULT_REFERENCE_YEAR;

/// Summarize a bank statement CSV export. Writes CSV sections to stdout.
#[derive(Debug, Parser)]
#[command(name = "statement-insights", version)]
struct Cli {
    /// Statement CSV (ISO-8859-1 label, decoded as windows-1252)
    statement: PathBuf,

    /// Year assigned to the statement's DD/MON dates
    #[arg(long, default_value_t = DEFAULT_REFERENCE_YEAR)]
    year: i32,

    /// Budget categories CSV with id,name,budget[,spent] columns
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Keyword rules CSV with keyword,label columns for the category breakdown
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Monthly income the categories are allocated from
    #[arg(long, default_value_t = Decimal::ZERO)]
    income: Decimal,

    /// First day of the reporting range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of the reporting range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Day the week-over-week comparison ends on (defaults to today)
    #[arg(long)]
    now: Option<NaiveDate>,

    /// Charges at or above this amount are reported as high-risk
    #[arg(long, default_value_t = DEFAULT_HIGH_RISK_THRESHOLD)]
    risk_threshold: Decimal,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

const SUMMARY_COLUMNS: &[&str] = &["total_income", "total_expenses", "net_balance", "average_daily_spending"];
const DAILY_CASH_FLOW_COLUMNS: &[&str] = &["date", "income", "expenses", "balance"];
const MONTHLY_TREND_COLUMNS: &[&str] = &["month", "label", "expenses"];
const CATEGORY_BREAKDOWN_COLUMNS: &[&str] = &["name", "value"];
const WEEK_OVER_WEEK_COLUMNS: &[&str] = &["current_week", "previous_week", "change_percent", "trend"];
const TRANSACTION_COLUMNS: &[&str] = &["id", "date", "description", "charges", "credits", "rfc", "reference"];
const SKIPPED_ROW_COLUMNS: &[&str] = &["line", "error", "content"];
const ASSIGNMENT_COLUMNS: &[&str] = &["transaction_id", "category_id", "category_name", "amount"];
const BUDGET_COLUMNS: &[&str] = &["income", "allocated", "remaining", "spent", "utilization", "over_allocated"];
const BUDGET_CATEGORY_COLUMNS: &[&str] = &["id", "name", "budget", "spent", "remaining", "utilization", "over_budget"];

#[derive(Serialize)]
struct SkippedRecord<'a> {
    line: usize,
    error: String,
    content: &'a str
}

#[derive(Serialize)]
struct WeeklyRecord {
    current_week: Decimal,
    previous_week: Decimal,
    change_percent: Option<Decimal>,
    trend: String
}

#[derive(Serialize)]
struct BudgetRecord {
    income: Decimal,
    allocated: Decimal,
    remaining: Decimal,
    spent: Decimal,
    utilization: Option<Decimal>,
    over_allocated: bool
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let rules = match &cli.rules {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening rules {}", path.display()))?;
            KeywordRules::from_reader(file).with_context(|| format!("reading rules {}", path.display()))?
        }
        None => KeywordRules::default()
    };

    let config = EngineConfig {
        normalize: NormalizeOptions { reference_year: cli.year },
        rules,
        risk: RiskPolicy { charge_threshold: cli.risk_threshold },
        ..EngineConfig::default()
    };

    let mut engine = StatementEngine::new(config);

    let timer = Instant::now();
    let report = engine.load(&cli.statement).await?;
    let duration = timer.elapsed();

    info!("Loaded statement in: {duration:?}");

    let ledger = match &cli.categories {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening categories {}", path.display()))?;
            let mut ledger = BudgetLedger::load_categories(cli.income, file)?;
            let assignments = engine.auto_assign(ledger.categories());
            ledger.apply_assignments(&assignments);
            Some((ledger, assignments))
        }
        None => None
    };

    let range = cli.from.zip(cli.to).map(|(start, end)| DateRange::new(start, end));
    let now = cli.now.unwrap_or_else(|| Local::now().date_naive());

    write_report_to_stdout(&engine, &report, range, now, ledger.as_ref().map(|(ledger, assignments)| (ledger, assignments.as_slice())))?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout, so logging has to use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(
    engine: &StatementEngine,
    report: &IngestReport,
    range: Option<DateRange>,
    now: NaiveDate,
    budget: Option<(&BudgetLedger, &[Assignment])>
) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    write_section(&mut output, "summary", SUMMARY_COLUMNS, [engine.financial_summary(range)])?;
    write_section(&mut output, "daily_cash_flow", DAILY_CASH_FLOW_COLUMNS, engine.daily_cash_flow(range).iter())?;
    write_section(&mut output, "monthly_trend", MONTHLY_TREND_COLUMNS, engine.monthly_trend(range).iter())?;
    write_section(&mut output, "category_breakdown", CATEGORY_BREAKDOWN_COLUMNS, engine.category_breakdown(range).iter())?;

    let weekly = engine.week_over_week(now);
    let trend = weekly.trend();

    write_section(&mut output, "week_over_week", WEEK_OVER_WEEK_COLUMNS, [WeeklyRecord {
        current_week: weekly.current_week,
        previous_week: weekly.previous_week,
        change_percent: trend.percent(),
        trend: trend.to_string()
    }])?;

    write_section(&mut output, "high_risk", TRANSACTION_COLUMNS, engine.high_risk_transactions(range))?;

    write_section(&mut output, "skipped_rows", SKIPPED_ROW_COLUMNS, report.skipped.iter().map(|row| SkippedRecord {
        line: row.line,
        error: row.error.to_string(),
        content: &row.content
    }))?;

    if let Some((ledger, assignments)) = budget {
        write_section(&mut output, "assignments", ASSIGNMENT_COLUMNS, assignments.iter())?;
        write_section(&mut output, "budget", BUDGET_COLUMNS, [BudgetRecord {
            income: ledger.income(),
            allocated: ledger.total_allocated(),
            remaining: ledger.remaining_income(),
            spent: ledger.total_spent(),
            utilization: ledger.utilization(),
            over_allocated: ledger.is_over_allocated()
        }])?;
        write_section(&mut output, "budget_categories", BUDGET_CATEGORY_COLUMNS, ledger.statuses())?;
    }

    output.flush()?;

    Ok(())
}

fn write_section<W, I>(output: &mut W, title: &str, columns: &[&str], rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Serialize
{
    writeln!(output, "# {title}")?;

    {
        //NOTE: Serde headers only appear with the first row, so empty sections would lose them
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut *output);

        writer.write_record(columns)?;

        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
    }

    writeln!(output)?;

    Ok(())
}
