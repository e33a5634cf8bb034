//! Terminal rendering for the dashboard views.

use analytics::{RatioResult, RatioValue};
use analyzer::{BankValue, PeerComparison};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::Benchmarks;
use core_types::Metric;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

const GAUGE_WIDTH: usize = 24;
const BAR_WIDTH: usize = 30;

/// A horizontal gauge with a benchmark marker.
///
/// A missing value is drawn at zero. The axis runs from zero to 1.2x the larger of the
/// value and the benchmark, saturating at `Decimal::MAX`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub value: Decimal,
    pub benchmark: Decimal,
    pub axis_max: Decimal,
}

impl Gauge {
    pub fn new(value: Option<Decimal>, benchmark: Decimal) -> Self {
        let value = value.unwrap_or(Decimal::ZERO);
        Self {
            value,
            benchmark,
            axis_max: value
                .max(benchmark)
                .checked_mul(dec!(1.2))
                .unwrap_or(Decimal::MAX),
        }
    }

    /// Renders e.g. `[########    |       ]`, where `|` marks the benchmark.
    pub fn render(&self) -> String {
        let filled = scale(self.value, self.axis_max, GAUGE_WIDTH);
        let marker = scale(self.benchmark, self.axis_max, GAUGE_WIDTH).min(GAUGE_WIDTH - 1);
        let body: String = (0..GAUGE_WIDTH)
            .map(|i| match (i == marker, i < filled) {
                (true, _) => '|',
                (false, true) => '#',
                (false, false) => ' ',
            })
            .collect();
        format!("[{body}]")
    }
}

/// Number of cells out of `width` that `value` covers on a `0..=max` axis.
fn scale(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    value
        .checked_div(max)
        .and_then(|share| share.checked_mul(Decimal::from(width)))
        .and_then(|cells| cells.round().to_usize())
        .unwrap_or(width)
        .min(width)
}

fn fmt_value(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(2).normalize().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_ratio(value: &RatioValue) -> String {
    match value {
        Ok(v) => fmt_value(Some(*v)),
        Err(reason) => format!("n/a ({reason})"),
    }
}

fn comparison(value: Option<Decimal>, benchmark: Option<Decimal>) -> &'static str {
    match (value, benchmark) {
        (Some(v), Some(b)) if v > b => "above",
        (Some(v), Some(b)) if v < b => "below",
        (Some(_), Some(_)) => "at",
        _ => "",
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn banks_table(banks: &[String]) -> Table {
    let mut table = new_table(vec!["#", "Bank"]);
    for (i, bank) in banks.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(bank)]);
    }
    table
}

/// One row per ratio with its benchmark, gauge and explanation.
pub fn ratio_table<M>(result: &RatioResult<M>, benchmarks: &Benchmarks) -> Table
where
    M: Ord + Copy + Into<Metric>,
{
    let mut table = new_table(vec!["Metric", "Value", "Benchmark", "vs Benchmark", "Gauge", "Description"]);
    for (metric, value) in result.iter() {
        let metric: Metric = metric.into();
        let benchmark = benchmarks.for_metric(metric);
        let gauge = benchmark
            .map(|b| Gauge::new(value.ok(), b).render())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(metric.title()),
            Cell::new(fmt_ratio(value)).set_alignment(CellAlignment::Right),
            Cell::new(fmt_value(benchmark)).set_alignment(CellAlignment::Right),
            Cell::new(comparison(value.ok(), benchmark)),
            Cell::new(gauge),
            Cell::new(metric.description().unwrap_or_default()),
        ]);
    }
    table
}

pub fn peer_table(cmp: &PeerComparison, benchmark: Option<Decimal>) -> Table {
    let mut table = new_table(vec!["", cmp.metric.title()]);
    let rows = [
        (cmp.company.as_str(), cmp.selected),
        ("Peer Average", cmp.peer_mean),
        ("Peer Max", cmp.peer_max),
        ("Peer Min", cmp.peer_min),
        ("Benchmark", benchmark),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(fmt_value(value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![Cell::new("Peers counted"), Cell::new(cmp.peer_count)]);
    table
}

/// Every bank's value with a bar scaled to the largest magnitude in the series.
pub fn series_table(metric: Metric, series: &[BankValue]) -> Table {
    let mut table = new_table(vec!["Bank", metric.title(), ""]);
    let max = series
        .iter()
        .filter_map(BankValue::value)
        .map(|v| v.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    for entry in series {
        let bar = entry
            .value()
            .map(|v| "█".repeat(scale(v.abs(), max, BAR_WIDTH)))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&entry.company),
            Cell::new(fmt_ratio(&entry.result)).set_alignment(CellAlignment::Right),
            Cell::new(bar),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::RatioEngine;
    use core_types::{BankRecord, Field};

    #[test]
    fn gauge_axis_is_larger_side_plus_twenty_percent() {
        let gauge = Gauge::new(Some(dec!(50)), dec!(80));
        assert_eq!(gauge.axis_max, dec!(96));
        let gauge = Gauge::new(Some(dec!(100)), dec!(80));
        assert_eq!(gauge.axis_max, dec!(120));
    }

    #[test]
    fn missing_value_is_drawn_at_zero() {
        let gauge = Gauge::new(None, dec!(4.5));
        assert_eq!(gauge.value, Decimal::ZERO);
        assert_eq!(gauge.axis_max, dec!(5.4));
        assert!(!gauge.render().contains('#'));
    }

    #[test]
    fn gauge_marks_benchmark() {
        let rendered = Gauge::new(Some(dec!(12)), dec!(12)).render();
        assert_eq!(rendered.chars().count(), GAUGE_WIDTH + 2);
        assert_eq!(rendered.matches('|').count(), 1);
    }

    #[test]
    fn scale_is_clamped() {
        assert_eq!(scale(dec!(5), dec!(10), 10), 5);
        assert_eq!(scale(dec!(20), dec!(10), 10), 10);
        assert_eq!(scale(dec!(-1), dec!(10), 10), 0);
        assert_eq!(scale(dec!(1), Decimal::ZERO, 10), 0);
    }

    #[test]
    fn huge_value_saturates_axis_instead_of_overflowing() {
        let huge = Decimal::from_scientific("7e28").unwrap();
        let gauge = Gauge::new(Some(huge), dec!(6));
        assert_eq!(gauge.axis_max, Decimal::MAX);
        let rendered = gauge.render();
        assert_eq!(rendered.chars().count(), GAUGE_WIDTH + 2);
        assert!(rendered.contains('#'));
    }

    #[test]
    fn scale_survives_tiny_axis() {
        assert_eq!(scale(Decimal::MAX, dec!(0.0000001), 10), 10);
    }

    #[test]
    fn stress_table_with_huge_tier1_amount_renders() {
        let huge = Decimal::from_scientific("7e28").unwrap();
        let record = BankRecord::new("Big Bank").with(Field::Tier1Capital, huge);
        let result = RatioEngine::new().compute_stress_metrics(&record);

        let mut table = ratio_table(&result, &Benchmarks::default());
        table.set_content_arrangement(ContentArrangement::Disabled);
        let rendered = table.to_string();
        assert!(rendered.contains("Tier 1 Capital Ratio"));
        assert!(rendered.contains("Measures bank's core equity capital"));
        assert!(rendered.contains("Core measure of bank's financial strength"));
    }

    #[test]
    fn comparison_labels() {
        assert_eq!(comparison(Some(dec!(3)), Some(dec!(2))), "above");
        assert_eq!(comparison(Some(dec!(1)), Some(dec!(2))), "below");
        assert_eq!(comparison(Some(dec!(2)), Some(dec!(2))), "at");
        assert_eq!(comparison(None, Some(dec!(2))), "");
    }
}
