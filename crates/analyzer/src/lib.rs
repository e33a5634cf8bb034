//! # BankStax Aggregator
//!
//! Cross-bank views of a single metric: one bank against its peers, or every bank in
//! table order. These are the shapes the presenter turns into bar charts.

use crate::error::AnalyzerError;
use analytics::{RatioEngine, RatioValue};
use core_types::{FinancialTable, Metric};
use rust_decimal::Decimal;
use serde::Serialize;

pub mod error;

/// A selected bank's value next to statistics over every other bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerComparison {
    pub company: String,
    pub metric: Metric,
    pub selected: Option<Decimal>,
    pub peer_mean: Option<Decimal>,
    pub peer_max: Option<Decimal>,
    pub peer_min: Option<Decimal>,
    /// How many peers had a value for the metric.
    pub peer_count: usize,
}

/// One bank's value in a full peer series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankValue {
    pub company: String,
    pub result: RatioValue,
}

impl BankValue {
    pub fn value(&self) -> Option<Decimal> {
        self.result.ok()
    }
}

/// The aggregation engine. Holds no table state; every call recomputes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer {
    engine: RatioEngine,
}

impl Analyzer {
    pub fn new(engine: RatioEngine) -> Self {
        Self { engine }
    }

    /// The ratio engine every comparison is computed with.
    pub fn engine(&self) -> &RatioEngine {
        &self.engine
    }

    /// Compares `company` with all other rows for `metric`.
    ///
    /// Every row named `company` is left out of the peer set, duplicates included; the
    /// selected value comes from the first such row. Peers without a value are skipped.
    pub fn peer_comparison(
        &self,
        table: &FinancialTable,
        company: &str,
        metric: Metric,
    ) -> Result<PeerComparison, AnalyzerError> {
        let record = self.engine.get_record(table, company)?;
        let selected = self.engine.metric_value(record, metric).ok();

        let peer_values: Vec<Decimal> = table
            .iter()
            .filter(|r| r.company != company)
            .filter_map(|r| self.engine.metric_value(r, metric).ok())
            .collect();

        let (peer_min, peer_max) = find_min_max(&peer_values).unzip();
        let peer_mean = mean(&peer_values);
        if peer_values.is_empty() {
            tracing::debug!(company, %metric, "No peer values available for comparison.");
        }

        Ok(PeerComparison {
            company: company.to_string(),
            metric,
            selected,
            peer_mean,
            peer_max,
            peer_min,
            peer_count: peer_values.len(),
        })
    }

    /// The metric for every row, in table order.
    pub fn all_bank_series(&self, table: &FinancialTable, metric: Metric) -> Vec<BankValue> {
        table
            .iter()
            .map(|r| BankValue {
                company: r.company.clone(),
                result: self.engine.metric_value(r, metric),
            })
            .collect()
    }
}

/// The smallest and largest value, or `None` for an empty slice.
fn find_min_max(values: &[Decimal]) -> Option<(Decimal, Decimal)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), val| (min.min(*val), max.max(*val))),
    )
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v));
    match sum {
        Some(sum) => sum.checked_div(Decimal::from(values.len())),
        None => {
            tracing::warn!(count = values.len(), "Peer mean overflowed; reporting no mean.");
            None
        }
    }
}
