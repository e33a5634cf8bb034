use crate::error::AnalyticsError;
use crate::report::{RatioResult, RatioValue, Unavailable};
use core_types::{BankRecord, Field, FinancialTable, KeyMetric, Metric, StressMetric};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for deriving bank ratios from balance-sheet line items.
#[derive(Debug, Default, Clone, Copy)]
pub struct RatioEngine {}

impl RatioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a bank by exact name. With duplicate names the first row wins.
    pub fn get_record<'a>(
        &self,
        table: &'a FinancialTable,
        company: &str,
    ) -> Result<&'a BankRecord, AnalyticsError> {
        table
            .find(company)
            .ok_or_else(|| AnalyticsError::NotFound(company.to_string()))
    }

    /// Computes the six headline ratios for a bank.
    ///
    /// Each entry is independent: a missing input or zero denominator only affects
    /// the entry that needs it.
    pub fn compute_key_metrics(&self, record: &BankRecord) -> RatioResult<KeyMetric> {
        let result = RatioResult::from_entries(
            KeyMetric::ALL
                .into_iter()
                .map(|metric| (metric, self.key_metric(record, metric))),
        );
        log_unavailable(&record.company, result.iter().map(|(m, v)| (m.key(), v)));
        result
    }

    /// Computes the CCAR stress ratios for a bank. These are read straight from the
    /// input and are not scaled.
    pub fn compute_stress_metrics(&self, record: &BankRecord) -> RatioResult<StressMetric> {
        let result = RatioResult::from_entries(
            StressMetric::ALL
                .into_iter()
                .map(|metric| (metric, self.stress_metric(record, metric))),
        );
        log_unavailable(&record.company, result.iter().map(|(m, v)| (m.key(), v)));
        result
    }

    /// Shorthand for `get_record` followed by `compute_key_metrics`.
    pub fn key_metrics_for(
        &self,
        table: &FinancialTable,
        company: &str,
    ) -> Result<RatioResult<KeyMetric>, AnalyticsError> {
        Ok(self.compute_key_metrics(self.get_record(table, company)?))
    }

    /// Shorthand for `get_record` followed by `compute_stress_metrics`.
    pub fn stress_metrics_for(
        &self,
        table: &FinancialTable,
        company: &str,
    ) -> Result<RatioResult<StressMetric>, AnalyticsError> {
        Ok(self.compute_stress_metrics(self.get_record(table, company)?))
    }

    /// A single key ratio, in percent.
    pub fn key_metric(&self, record: &BankRecord, metric: KeyMetric) -> RatioValue {
        match metric {
            KeyMetric::CoreDepositsRatio => {
                let core = field(record, Field::CoreDeposits)?;
                let total = field(record, Field::TotalDeposits)?;
                percent(core, total, Field::TotalDeposits)
            }
            KeyMetric::NpaRatio => {
                let npa = field(record, Field::NonPerformingAssets)?;
                let loans = field(record, Field::Loans)?;
                percent(npa, loans, Field::Loans)
            }
            KeyMetric::LiquidityRatio => {
                let assets = field(record, Field::CurrentAssets)?;
                let liabilities = field(record, Field::CurrentLiabilities)?;
                percent(assets, liabilities, Field::CurrentLiabilities)
            }
            KeyMetric::CapitalAdequacyRatio => {
                let tier1 = field(record, Field::Tier1Capital)?;
                let tier2 = field(record, Field::Tier2Capital)?;
                let total_capital = tier1.checked_add(tier2).ok_or(Unavailable::Overflow)?;
                let rwa = field(record, Field::RiskWeightedAssets)?;
                percent(total_capital, rwa, Field::RiskWeightedAssets)
            }
            KeyMetric::SolvencyRatio => {
                let pat = field(record, Field::Pat)?;
                let depreciation = field(record, Field::Depreciation)?;
                let cash_profit = pat.checked_add(depreciation).ok_or(Unavailable::Overflow)?;
                let liabilities = field(record, Field::TotalLiabilities)?;
                percent(cash_profit, liabilities, Field::TotalLiabilities)
            }
            KeyMetric::LoanDepositRatio => {
                let loans = field(record, Field::Loans)?;
                let deposits = field(record, Field::TotalDeposits)?;
                percent(loans, deposits, Field::TotalDeposits)
            }
        }
    }

    /// A single stress ratio, as stored in its source column.
    pub fn stress_metric(&self, record: &BankRecord, metric: StressMetric) -> RatioValue {
        field(record, metric.source_field())
    }

    /// The value of any comparable metric: a raw line item or a derived ratio.
    pub fn metric_value(&self, record: &BankRecord, metric: Metric) -> RatioValue {
        match metric {
            Metric::LineItem(f) => field(record, f),
            Metric::Key(m) => self.key_metric(record, m),
            Metric::Stress(m) => self.stress_metric(record, m),
        }
    }
}

fn field(record: &BankRecord, field: Field) -> RatioValue {
    record.get(field).ok_or(Unavailable::MissingField { field })
}

/// `numerator / denominator * 100`, refusing a zero denominator.
fn percent(numerator: Decimal, denominator: Decimal, denominator_field: Field) -> RatioValue {
    if denominator.is_zero() {
        return Err(Unavailable::DivisionByZero {
            denominator: denominator_field,
        });
    }
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or(Unavailable::Overflow)
}

fn log_unavailable<'a>(
    company: &str,
    entries: impl Iterator<Item = (&'static str, &'a RatioValue)>,
) {
    for (metric, value) in entries {
        if let Err(reason) = value {
            tracing::debug!(company, metric, %reason, "Ratio unavailable.");
        }
    }
}
