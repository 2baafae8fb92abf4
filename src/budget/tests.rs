use super::*;

use std::io::Cursor;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Assignment, BudgetCategory, Transaction, UNCATEGORIZED};

fn create_transaction(id: usize, description: &str, charges: &str) -> Result<Transaction> {
    Ok(Transaction {
        id,
        date: NaiveDate::from_ymd_opt(2023, 2, 14).unwrap(),
        description: description.to_string(),
        charges: Decimal::from_str(charges)?,
        credits: Decimal::ZERO,
        rfc: String::new(),
        reference: String::new()
    })
}

fn create_category(id: &str, name: &str, budget: &str) -> Result<BudgetCategory> {
    Ok(BudgetCategory::new(id, name, Decimal::from_str(budget)?))
}

fn decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

fn sample() -> Result<(Vec<Transaction>, Vec<BudgetCategory>)> {
    let transactions = vec![
        create_transaction(2, "UBER *TRIP", "120.50")?,
        create_transaction(3, "Pago Restaurante Uber Eats", "80")?,
        create_transaction(4, "OXXO SUCURSAL", "15")?,
        create_transaction(5, "NETFLIX VIA PAYPAL", "199")?,
    ];

    let categories = vec![
        create_category("transport", "Uber", "500")?,
        create_category("food", "Restaurante", "1000")?,
        create_category("subs", "paypal", "300")?,
    ];

    Ok((transactions, categories))
}

#[test]
fn test_auto_assign_uses_first_case_insensitive_match() -> Result<()> {
    let (transactions, categories) = sample()?;

    let assignments = auto_assign(&transactions, &categories);

    assert_eq!(assignments.len(), 4);
    assert_eq!(assignments[0].category_id.as_deref(), Some("transport"));
    // matches both "Uber" and "Restaurante"; category order decides
    assert_eq!(assignments[1].category_id.as_deref(), Some("transport"));
    assert_eq!(assignments[2].category_id, None);
    assert_eq!(assignments[2].category_name, UNCATEGORIZED);
    assert_eq!(assignments[3].category_name, "paypal");
    assert_eq!(assignments[3].amount, decimal("199")?);

    Ok(())
}

#[test]
fn test_auto_assign_without_categories_leaves_everything_uncategorized() -> Result<()> {
    let (transactions, _) = sample()?;

    let assignments = auto_assign(&transactions, &[]);

    assert!(assignments.iter().all(|assignment| !assignment.is_categorized()));

    Ok(())
}

#[test]
fn test_manual_assign_overrides_exactly_one_assignment() -> Result<()> {
    let (transactions, categories) = sample()?;
    let assignments = auto_assign(&transactions, &categories);

    let updated = manual_assign(&assignments, 3, Some("food"), &categories)?;

    assert_eq!(updated.len(), assignments.len());
    assert_eq!(updated[1].category_id.as_deref(), Some("food"));
    assert_eq!(updated[1].category_name, "Restaurante");
    assert_eq!(updated[1].amount, assignments[1].amount);

    for (before, after) in assignments.iter().zip(&updated).filter(|(before, _)| before.transaction_id != 3) {
        assert_eq!(before, after);
    }

    Ok(())
}

#[test]
fn test_manual_assign_can_reset_to_uncategorized() -> Result<()> {
    let (transactions, categories) = sample()?;
    let assignments = auto_assign(&transactions, &categories);

    let updated = manual_assign(&assignments, 2, None, &categories)?;

    assert_eq!(updated[0], Assignment::uncategorized(&transactions[0]));

    Ok(())
}

#[test]
fn test_manual_assign_rejects_unknown_ids() -> Result<()> {
    let (transactions, categories) = sample()?;
    let assignments = auto_assign(&transactions, &categories);

    assert_eq!(
        manual_assign(&assignments, 99, Some("food"), &categories),
        Err(AssignmentError::TransactionNotFound { transaction_id: 99 })
    );
    assert_eq!(
        manual_assign(&assignments, 2, Some("rent"), &categories),
        Err(AssignmentError::CategoryNotFound { category_id: "rent".to_string() })
    );

    Ok(())
}

#[test]
fn test_apply_assignments_is_additive() -> Result<()> {
    let (transactions, mut categories) = sample()?;
    categories[0].spent = decimal("10")?;

    let assignments = auto_assign(&transactions, &categories);
    let applied = apply_assignments(&categories, &assignments);

    assert_eq!(applied[0].spent, decimal("210.50")?);
    assert_eq!(applied[1].spent, Decimal::ZERO);
    assert_eq!(applied[2].spent, decimal("199")?);

    let twice = apply_assignments(&applied, &assignments);
    assert_eq!(twice[0].spent, decimal("411.00")?);

    // input categories are untouched
    assert_eq!(categories[0].spent, decimal("10")?);

    Ok(())
}

#[test]
fn test_ledger_add_category_enforces_allocation_rules() -> Result<()> {
    let mut ledger = BudgetLedger::new(decimal("1000")?);

    let id = ledger.add_category("Uber", decimal("400")?)?.id.clone();
    assert_eq!(ledger.category(&id).map(|category| category.spent), Some(Decimal::ZERO));

    assert!(matches!(ledger.add_category("  ", decimal("10")?), Err(BudgetError::EmptyName)));
    assert!(matches!(ledger.add_category("Food", Decimal::ZERO), Err(BudgetError::NonPositiveBudget { .. })));
    assert!(matches!(ledger.add_category("Food", decimal("600.01")?), Err(BudgetError::ExceedsRemainingIncome { .. })));

    let second = ledger.add_category("Food", decimal("600")?)?.id.clone();
    assert_ne!(id, second);
    assert_eq!(ledger.remaining_income(), Decimal::ZERO);
    assert!(!ledger.is_over_allocated());

    ledger.set_income(decimal("900")?);
    assert!(ledger.is_over_allocated());

    Ok(())
}

#[test]
fn test_ledger_generated_ids_skip_loaded_ones() -> Result<()> {
    let mut ledger = BudgetLedger::with_categories(decimal("100")?, vec![create_category("1", "Rent", "10")?])?;

    let id = ledger.add_category("Food", decimal("10")?)?.id.clone();

    assert_eq!(id, "2");

    Ok(())
}

#[test]
fn test_ledger_update_spent_clamps_negative_values() -> Result<()> {
    let mut ledger = BudgetLedger::with_categories(decimal("100")?, vec![create_category("rent", "Rent", "50")?])?;

    ledger.update_spent("rent", decimal("-5")?)?;
    assert_eq!(ledger.category("rent").map(|category| category.spent), Some(Decimal::ZERO));

    ledger.update_spent("rent", decimal("75")?)?;
    assert_eq!(ledger.total_spent(), decimal("75")?);

    assert!(matches!(ledger.update_spent("food", Decimal::ONE), Err(BudgetError::CategoryNotFound { .. })));

    Ok(())
}

#[test]
fn test_ledger_statuses_flag_over_budget_and_cap_utilization() -> Result<()> {
    let mut ledger = BudgetLedger::with_categories(decimal("2000")?, vec![
        create_category("transport", "Uber", "100")?,
        create_category("food", "Restaurante", "400")?,
        create_category("misc", "Misc", "0")?,
    ])?;

    ledger.update_spent("transport", decimal("150")?)?;
    ledger.update_spent("food", decimal("100")?)?;

    let statuses = ledger.statuses();

    assert!(statuses[0].over_budget);
    assert_eq!(statuses[0].remaining, decimal("-50")?);
    assert_eq!(statuses[0].utilization, Some(decimal("100")?));
    assert!(!statuses[1].over_budget);
    assert_eq!(statuses[1].utilization, Some(decimal("25")?));
    assert_eq!(statuses[2].utilization, None);

    assert_eq!(ledger.utilization(), Some(decimal("50")?));

    Ok(())
}

#[test]
fn test_ledger_utilization_without_budget_is_absent() -> Result<()> {
    let ledger = BudgetLedger::new(decimal("100")?);

    assert_eq!(ledger.utilization(), None);

    Ok(())
}

#[test]
fn test_ledger_applies_assignments_from_auto_assign() -> Result<()> {
    let (transactions, categories) = sample()?;
    let mut ledger = BudgetLedger::with_categories(decimal("5000")?, categories)?;

    let assignments = auto_assign(&transactions, ledger.categories());
    ledger.apply_assignments(&assignments);

    assert_eq!(ledger.category("transport").map(|category| category.spent), Some(decimal("200.50")?));
    assert_eq!(ledger.total_spent(), decimal("399.50")?);

    Ok(())
}

#[test]
fn test_ledger_loads_categories_from_csv() -> Result<()> {
    let table = "id,name,budget,spent\nt, Uber ,500,20.5\nf,Restaurante,1000,0\n";

    let ledger = BudgetLedger::load_categories(decimal("3000")?, Cursor::new(table))?;
    let transport = ledger.category("t").ok_or_else(|| anyhow!("category t missing"))?;

    assert_eq!(ledger.categories().len(), 2);
    assert_eq!(transport.name, "Uber");
    assert_eq!(transport.spent, decimal("20.5")?);
    assert_eq!(ledger.total_allocated(), decimal("1500")?);

    Ok(())
}

#[test]
fn test_ledger_rejects_invalid_category_sets() -> Result<()> {
    let duplicate = BudgetLedger::with_categories(Decimal::ZERO, vec![
        create_category("a", "Uber", "1")?,
        create_category("a", "Rent", "1")?,
    ]);
    assert!(matches!(duplicate, Err(BudgetError::DuplicateCategory { .. })));

    let negative = BudgetLedger::with_categories(Decimal::ZERO, vec![create_category("a", "Uber", "-1")?]);
    assert!(matches!(negative, Err(BudgetError::NegativeBudget { .. })));

    let malformed = BudgetLedger::load_categories(Decimal::ZERO, Cursor::new("id,name,budget\na,Uber,lots\n"));
    assert!(matches!(malformed, Err(BudgetError::Csv(_))));

    Ok(())
}

#[test]
fn test_ledger_rejects_blank_category_names() -> Result<()> {
    let blank = BudgetLedger::with_categories(decimal("100")?, vec![
        create_category("transport", "Uber", "50")?,
        create_category("all", "   ", "10")?,
    ]);
    assert!(matches!(blank, Err(BudgetError::EmptyName)));

    let loaded = BudgetLedger::load_categories(decimal("100")?, Cursor::new("id,name,budget\nt,Uber,50\nx,,10\n"));
    assert!(matches!(loaded, Err(BudgetError::EmptyName)));

    Ok(())
}

#[test]
fn test_ledger_rejects_amounts_outside_the_supported_range() -> Result<()> {
    let huge_budget = BudgetLedger::with_categories(Decimal::MAX, vec![
        BudgetCategory::new("a", "Uber", Decimal::MAX),
        BudgetCategory::new("b", "Rent", Decimal::MAX),
    ]);
    assert!(matches!(huge_budget, Err(BudgetError::AmountOutOfRange { .. })));

    let mut ledger = BudgetLedger::with_categories(decimal("100")?, vec![create_category("rent", "Rent", "50")?])?;

    assert!(matches!(ledger.update_spent("rent", Decimal::MAX), Err(BudgetError::AmountOutOfRange { .. })));
    assert_eq!(ledger.total_spent(), Decimal::ZERO);

    let mut rich = BudgetLedger::new(Decimal::MAX);
    assert!(matches!(rich.add_category("Yacht", Decimal::MAX), Err(BudgetError::AmountOutOfRange { .. })));
    assert!(rich.categories().is_empty());

    Ok(())
}
