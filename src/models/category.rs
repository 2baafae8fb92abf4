use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A user-defined spending bucket.
///
/// The name doubles as the auto-assignment keyword. `spent` may exceed
/// `budget`; that is reported as over budget rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,
    pub name: String,
    pub budget: Decimal,
    #[serde(default)]
    pub spent: Decimal
}

impl BudgetCategory {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, budget: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budget,
            spent: Decimal::ZERO
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.budget - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}
