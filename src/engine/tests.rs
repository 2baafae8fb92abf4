use super::{EngineConfig, EngineError, StatementEngine};

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::analytics::{DateRange, KeywordRule, KeywordRules, RiskPolicy, SpendingTrend};
use crate::models::BudgetCategory;
use crate::parser::{NormalizeOptions, SchemaError};

const HEADER: &str = "OPERACION,LIQUIDACION,DESCRIPCION,CARGOS,ABONOS,RFC,REFERENCIA";

fn create_temporary_statement(rows: &[&[u8]]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;

    for row in rows {
        file.write_all(row)?;
        file.write_all(b"\n")?;
    }

    Ok(file)
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

#[tokio::test]
async fn test_engine_loads_latin1_statement_from_disk() -> Result<()> {
    let file = create_temporary_statement(&[
        b"02/ENE,DEP\xd3SITO N\xd3MINA,,\"15,000.00\",RFC1,001",
        b"03/ENE,\"UBER, VIAJE\",$120.50,,RFC2,002",
        b"03/XYZ,FECHA MALA,10.00,,RFC3,003",
    ])?;

    let mut engine = StatementEngine::new(EngineConfig::default());
    let report = engine.load(file.path()).await?;

    assert_eq!(report.version, 1);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 4);

    let transactions = engine.transactions();
    assert_eq!(transactions[0].description, "DEPÓSITO NÓMINA");
    assert_eq!(transactions[0].credits, Decimal::from_str("15000.00")?);
    assert_eq!(transactions[1].description, "UBER, VIAJE");

    Ok(())
}

#[tokio::test]
async fn test_engine_reports_missing_file() -> Result<()> {
    let mut engine = StatementEngine::new(EngineConfig::default());

    let result = engine.load("missing_statement.csv").await;

    assert!(matches!(result, Err(EngineError::Io { .. })));
    assert!(engine.transactions().is_empty());
    assert_eq!(engine.version(), 0);

    Ok(())
}

#[test]
fn test_engine_keeps_previous_working_set_on_schema_error() -> Result<()> {
    let mut engine = StatementEngine::new(EngineConfig::default());
    engine.load_text(&format!("{HEADER}\n05/MAR,CLIP,10.00,,R,1"))?;

    let result = engine.load_text("OPERACION,CARGOS\n05/MAR,CLIP,10.00,,R,1");

    assert!(matches!(result, Err(EngineError::Schema(SchemaError::MissingColumns(_)))));
    assert_eq!(engine.transactions().len(), 1);
    assert_eq!(engine.version(), 1);

    Ok(())
}

#[test]
fn test_engine_aggregates_survive_statement_with_oversized_amounts() -> Result<()> {
    let mut engine = StatementEngine::new(EngineConfig::default());
    let report = engine.load_text(&format!(
        "{HEADER}\n05/MAR,UBER,79228162514264337593543950335,,R,1\n06/MAR,UBER,79228162514264337593543950335,,R,2\n\
         07/MAR,UBER,999999999999.99,,R,3\n08/MAR,UBER,999999999999.99,,R,4"
    ))?;

    assert_eq!(report.accepted, 2);
    assert_eq!(report.skipped.len(), 2);

    let points = engine.daily_cash_flow(None);
    assert_eq!(points[1].balance, Decimal::from_str("-1999999999999.98")?);

    let monthly = engine.monthly_trend(None);
    assert_eq!(monthly[2].expenses, Decimal::from_str("1999999999999.98")?);

    let breakdown = engine.category_breakdown(None);
    assert_eq!(breakdown[0].value, Decimal::from_str("1999999999999.98")?);

    let summary = engine.financial_summary(None);
    assert_eq!(summary.net_balance, Decimal::from_str("-1999999999999.98")?);

    Ok(())
}

#[test]
fn test_engine_memoizes_aggregates_per_version_and_range() -> Result<()> {
    let mut engine = StatementEngine::new(EngineConfig::default());
    engine.load_text(&format!("{HEADER}\n05/MAR,UBER,10.00,,R,1\n06/MAR,NOMINA,,100.00,R,2"))?;

    let first = engine.daily_cash_flow(None);
    let second = engine.daily_cash_flow(None);
    assert!(Arc::ptr_eq(&first, &second));

    let ranged = engine.daily_cash_flow(Some(DateRange::new(date(3, 6), date(3, 6))));
    assert!(!Arc::ptr_eq(&first, &ranged));
    assert_eq!(ranged.len(), 1);

    let breakdown = engine.category_breakdown(None);
    assert!(Arc::ptr_eq(&breakdown, &engine.category_breakdown(None)));

    let monthly = engine.monthly_trend(None);
    assert!(Arc::ptr_eq(&monthly, &engine.monthly_trend(None)));

    engine.load_text(&format!("{HEADER}\n07/MAR,UBER,99.00,,R,1"))?;

    let reloaded = engine.daily_cash_flow(None);
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].balance, Decimal::from_str("-99.00")?);

    Ok(())
}

#[test]
fn test_engine_applies_configured_rules_year_and_risk_policy() -> Result<()> {
    let config = EngineConfig {
        normalize: NormalizeOptions { reference_year: 2024 },
        rules: KeywordRules::new(vec![KeywordRule::new("OXXO", "Convenience")]),
        risk: RiskPolicy { charge_threshold: Decimal::from_str("50")? },
        ..EngineConfig::default()
    };

    let mut engine = StatementEngine::new(config);
    engine.load_text(&format!("{HEADER}\n29/FEB,OXXO CENTRO,75.00,,R,1\n01/MAR,UBER,5.00,,R,2"))?;

    assert_eq!(engine.transactions()[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let breakdown = engine.category_breakdown(None);
    assert_eq!(breakdown[0].name, "Convenience");
    assert_eq!(breakdown[1].name, "Other");

    let risky = engine.high_risk_transactions(None);
    assert_eq!(risky.len(), 1);
    assert_eq!(risky[0].description, "OXXO CENTRO");

    Ok(())
}

#[test]
fn test_engine_exposes_summary_and_assignment_helpers() -> Result<()> {
    let mut engine = StatementEngine::new(EngineConfig::default());
    engine.load_text(&format!(
        "{HEADER}\n01/JUN,NOMINA,,1000.00,R,1\n10/JUN,UBER,40.00,,R,2\n12/JUN,UBER,60.00,,R,3\n14/JUN,CLIP,50.00,,R,4"
    ))?;

    assert_eq!(engine.current_balance(), Decimal::from_str("850.00")?);

    let summary = engine.financial_summary(None);
    assert_eq!(summary.total_expenses, Decimal::from_str("150.00")?);

    let weekly = engine.week_over_week(date(6, 14));
    assert_eq!(weekly.current_week, Decimal::from_str("150.00")?);
    assert!(weekly.previous_week.is_zero());
    assert_eq!(
        engine.week_over_week_trend(date(6, 14)),
        SpendingTrend::NoPriorSpending { current: Decimal::from_str("150.00")? }
    );

    let recent = engine.recent_transactions(2);
    assert_eq!(recent.iter().map(|transaction| transaction.id).collect::<Vec<_>>(), vec![5, 4]);

    let categories = vec![BudgetCategory::new("t", "uber", Decimal::from_str("500")?)];
    let assignments = engine.auto_assign(&categories);
    let assigned = assignments.iter().filter(|assignment| assignment.is_categorized()).count();

    assert_eq!(assigned, 2);
    assert_eq!(
        assignments.last().ok_or_else(|| anyhow!("no assignments"))?.category_name,
        "Uncategorized"
    );

    Ok(())
}
