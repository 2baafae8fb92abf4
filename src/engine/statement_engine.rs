use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::analytics::{
    self, in_range, CategoryBreakdownEntry, DailyCashFlowPoint, DateRange, FinancialSummary, KeywordRules,
    MonthlyTrend, RiskPolicy, SpendingTrend, WeekOverWeek
};
use crate::budget;
use crate::engine::cache::AnalyticsCache;
use crate::engine::errors::EngineError;
use crate::models::{Assignment, BudgetCategory, Transaction};
use crate::parser::{decode_windows_1252, normalize, NormalizeOptions, SkippedRow};

const DEFAULT_CACHE_CAPACITY: u64 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub normalize: NormalizeOptions,
    pub rules: KeywordRules,
    pub risk: RiskPolicy,
    /// Upper bound on memoized results kept per aggregate.
    pub cache_capacity: u64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            rules: KeywordRules::default(),
            risk: RiskPolicy::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY
        }
    }
}

/// What a successful load kept and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub version: u64,
    pub accepted: usize,
    pub skipped: Vec<SkippedRow>
}

/// Owns the session's working set of transactions.
///
/// Each load replaces the whole set and bumps its version; aggregates are
/// memoized per (version, date range), so repeated queries between loads are
/// served from the cache.
pub struct StatementEngine {
    config: EngineConfig,
    transactions: Arc<[Transaction]>,
    version: u64,
    cache: AnalyticsCache
}

impl StatementEngine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = AnalyticsCache::new(config.cache_capacity);

        Self {
            config,
            transactions: Arc::from(Vec::new()),
            version: 0,
            cache
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reads a statement file, decodes it as windows-1252 (what the
    /// ISO-8859-1 label means to a browser) and makes it the working set.
    ///
    /// The read is the only await point; decoding and parsing run to
    /// completion afterwards. On error the previous working set is kept.
    pub async fn load(&mut self, path: impl AsRef<Path>) -> Result<IngestReport, EngineError> {
        let path = path.as_ref();

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            error!("Error opening statement at path: {} | {source}", path.display());
            EngineError::Io { path: path.to_path_buf(), source }
        })?;

        debug!("Read [{}] bytes from {}", bytes.len(), path.display());

        self.load_text(&decode_windows_1252(&bytes))
    }

    /// Normalizes already decoded statement text and makes it the working set.
    pub fn load_text(&mut self, text: &str) -> Result<IngestReport, EngineError> {
        let ingestion = normalize(text, &self.config.normalize).inspect_err(|error| {
            error!("Statement rejected: {error}");
        })?;

        let accepted = ingestion.transactions.len();
        self.replace(ingestion.transactions);

        info!("Working set replaced with [{accepted}] transactions (version {})", self.version);

        Ok(IngestReport {
            version: self.version,
            accepted,
            skipped: ingestion.skipped
        })
    }

    pub fn daily_cash_flow(&self, range: Option<DateRange>) -> Arc<Vec<DailyCashFlowPoint>> {
        self.cache.cash_flow.get_with((self.version, range), || {
            debug!("Computing daily cash flow for version {} and range {range:?}", self.version);
            Arc::new(analytics::daily_cash_flow(&self.transactions, range))
        })
    }

    pub fn category_breakdown(&self, range: Option<DateRange>) -> Arc<Vec<CategoryBreakdownEntry>> {
        self.cache.breakdown.get_with((self.version, range), || {
            debug!("Computing category breakdown for version {} and range {range:?}", self.version);
            Arc::new(analytics::category_breakdown(in_range(&self.transactions, range), &self.config.rules))
        })
    }

    pub fn monthly_trend(&self, range: Option<DateRange>) -> Arc<MonthlyTrend> {
        self.cache.monthly.get_with((self.version, range), || {
            debug!("Computing monthly trend for version {} and range {range:?}", self.version);
            Arc::new(analytics::monthly_trend(in_range(&self.transactions, range)))
        })
    }

    pub fn week_over_week(&self, now: NaiveDate) -> WeekOverWeek {
        analytics::week_over_week(self.transactions.iter(), now)
    }

    pub fn week_over_week_trend(&self, now: NaiveDate) -> SpendingTrend {
        self.week_over_week(now).trend()
    }

    pub fn high_risk_transactions(&self, range: Option<DateRange>) -> Vec<&Transaction> {
        analytics::high_risk_transactions(in_range(&self.transactions, range), &self.config.risk)
    }

    pub fn financial_summary(&self, range: Option<DateRange>) -> FinancialSummary {
        analytics::financial_summary(&self.transactions, range)
    }

    pub fn current_balance(&self) -> Decimal {
        analytics::current_balance(self.transactions.iter())
    }

    pub fn recent_transactions(&self, count: usize) -> Vec<&Transaction> {
        analytics::recent_transactions(&self.transactions, count)
    }

    pub fn auto_assign(&self, categories: &[BudgetCategory]) -> Vec<Assignment> {
        budget::auto_assign(&self.transactions, categories)
    }

    fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = Arc::from(transactions);
        self.version += 1;
        self.cache.clear();
    }
}
