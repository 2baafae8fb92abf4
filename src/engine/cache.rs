use std::sync::Arc;

use moka::sync::Cache;

use crate::analytics::{CategoryBreakdownEntry, DailyCashFlowPoint, DateRange, MonthlyTrend};

/// Working-set version plus the optional date filter an aggregate was built for.
pub type CacheKey = (u64, Option<DateRange>);

/// Memoized aggregates for the engine's current working set.
pub struct AnalyticsCache {
    pub cash_flow: Cache<CacheKey, Arc<Vec<DailyCashFlowPoint>>>,
    pub breakdown: Cache<CacheKey, Arc<Vec<CategoryBreakdownEntry>>>,
    pub monthly: Cache<CacheKey, Arc<MonthlyTrend>>
}

impl AnalyticsCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cash_flow: Cache::new(capacity),
            breakdown: Cache::new(capacity),
            monthly: Cache::new(capacity)
        }
    }

    pub fn clear(&self) {
        self.cash_flow.invalidate_all();
        self.breakdown.invalidate_all();
        self.monthly.invalidate_all();
    }
}
