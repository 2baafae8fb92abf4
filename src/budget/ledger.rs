use std::io::Read;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::budget::assigner;
use crate::budget::errors::BudgetError;
use crate::models::{Assignment, BudgetCategory};
use crate::types::{is_supported_amount, round_cents, CategoryId};

/// Per-category view of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStatus {
    pub id: CategoryId,
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Percent of the budget spent, capped at 100. Absent for a zero budget.
    pub utilization: Option<Decimal>,
    pub over_budget: bool
}

/// Income and the categories it is allocated across.
///
/// Mutations are not synchronized; callers apply them one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLedger {
    income: Decimal,
    categories: Vec<BudgetCategory>,
    next_id: u64
}

impl BudgetLedger {
    pub fn new(income: Decimal) -> Self {
        Self {
            income,
            categories: Vec::new(),
            next_id: 1
        }
    }

    /// Builds a ledger from existing categories, kept in the given order.
    ///
    /// # Errors
    /// Returns `BudgetError` if a name is blank, a budget is negative, an
    /// amount is out of range or an id repeats.
    pub fn with_categories(income: Decimal, categories: Vec<BudgetCategory>) -> Result<Self, BudgetError> {
        for (index, category) in categories.iter().enumerate() {
            //NOTE: A blank name is a substring of every description and would swallow auto-assignment
            if category.name.trim().is_empty() {
                return Err(BudgetError::EmptyName)
            }

            if category.budget < Decimal::ZERO {
                return Err(BudgetError::NegativeBudget { name: category.name.clone(), budget: category.budget })
            }

            for amount in [category.budget, category.spent] {
                if !is_supported_amount(amount) {
                    return Err(BudgetError::AmountOutOfRange { name: category.name.clone(), amount })
                }
            }

            if categories[..index].iter().any(|earlier| earlier.id == category.id) {
                return Err(BudgetError::DuplicateCategory { category_id: category.id.clone() })
            }
        }

        Ok(Self {
            categories,
            ..Self::new(income)
        })
    }

    /// Reads categories from an `id,name,budget,spent` CSV (`spent` may be
    /// left out).
    pub fn load_categories<R: Read>(income: Decimal, reader: R) -> Result<Self, BudgetError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let categories = reader.deserialize::<BudgetCategory>()
            .collect::<Result<Vec<_>, _>>()?;

        info!("Loaded [{}] budget categories", categories.len());

        Self::with_categories(income, categories)
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn set_income(&mut self, income: Decimal) {
        self.income = income;
    }

    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|category| category.id == category_id)
    }

    /// Allocates part of the remaining income to a new category.
    ///
    /// # Errors
    /// Returns `BudgetError` if the name is blank, the budget is not positive,
    /// or the budget is larger than the income still unallocated.
    pub fn add_category(&mut self, name: &str, budget: Decimal) -> Result<&BudgetCategory, BudgetError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(BudgetError::EmptyName)
        }

        if budget <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveBudget { name: name.to_string(), budget })
        }

        if !is_supported_amount(budget) {
            return Err(BudgetError::AmountOutOfRange { name: name.to_string(), amount: budget })
        }

        let remaining = self.remaining_income();

        if budget > remaining {
            return Err(BudgetError::ExceedsRemainingIncome { name: name.to_string(), budget, remaining })
        }

        let id = self.generate_id();
        info!("Adding category [{id}] {name} with budget {budget}");

        self.categories.push(BudgetCategory::new(id, name, budget));

        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Overwrites a category's spent total. Negative amounts clamp to zero.
    pub fn update_spent(&mut self, category_id: &str, amount: Decimal) -> Result<(), BudgetError> {
        let category = self.categories.iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| BudgetError::category_not_found(category_id))?;

        if !is_supported_amount(amount) {
            return Err(BudgetError::AmountOutOfRange { name: category.name.clone(), amount })
        }

        category.spent = amount.max(Decimal::ZERO);

        Ok(())
    }

    /// Adds assigned amounts onto the categories' spent totals. Applying the
    /// same assignments twice counts them twice.
    pub fn apply_assignments(&mut self, assignments: &[Assignment]) {
        self.categories = assigner::apply_assignments(&self.categories, assignments);
        debug!("Applied [{}] assignments to [{}] categories", assignments.len(), self.categories.len());
    }

    pub fn total_allocated(&self) -> Decimal {
        self.categories.iter().map(|category| category.budget).sum()
    }

    pub fn total_spent(&self) -> Decimal {
        self.categories.iter().map(|category| category.spent).sum()
    }

    pub fn remaining_income(&self) -> Decimal {
        self.income - self.total_allocated()
    }

    /// True when more has been allocated than there is income.
    pub fn is_over_allocated(&self) -> bool {
        self.remaining_income() < Decimal::ZERO
    }

    /// Percent of the total budget spent across all categories. Not capped;
    /// absent when nothing is budgeted.
    pub fn utilization(&self) -> Option<Decimal> {
        percent_of(self.total_spent(), self.total_allocated())
    }

    pub fn statuses(&self) -> Vec<CategoryStatus> {
        self.categories.iter()
            .map(|category| CategoryStatus {
                id: category.id.clone(),
                name: category.name.clone(),
                budget: category.budget,
                spent: category.spent,
                remaining: category.remaining(),
                utilization: percent_of(category.spent, category.budget)
                    .map(|percent| percent.min(Decimal::ONE_HUNDRED)),
                over_budget: category.is_over_budget()
            })
            .collect()
    }

    fn generate_id(&mut self) -> CategoryId {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id += 1;

            if self.category(&candidate).is_none() {
                return candidate
            }
        }
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_cents)
}
