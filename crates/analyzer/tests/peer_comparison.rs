use analytics::{RatioEngine, Unavailable};
use analyzer::Analyzer;
use analyzer::error::AnalyzerError;
use core_types::{BankRecord, Field, FinancialTable, KeyMetric, Metric, StressMetric};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bank(name: &str, core: Decimal, total: Decimal) -> BankRecord {
    BankRecord::new(name)
        .with(Field::CoreDeposits, core)
        .with(Field::TotalDeposits, total)
}

fn table() -> FinancialTable {
    FinancialTable::new(vec![
        bank("A", dec!(80), dec!(100)),
        bank("B", dec!(60), dec!(100)),
        bank("C", dec!(90), dec!(100)),
        bank("D", dec!(10), dec!(0)),
    ])
}

#[test]
fn two_bank_peer_mean_equals_the_other_bank() {
    let a = BankRecord::new("A")
        .with(Field::CoreDeposits, dec!(80))
        .with(Field::TotalDeposits, dec!(100));
    let mut b = BankRecord::new("B");
    for field in Field::ALL {
        b.set(field, Some(Decimal::ZERO));
    }
    b.set(Field::TotalDeposits, Some(dec!(100)));
    let table = FinancialTable::new(vec![a, b.clone()]);

    let metric = Metric::Key(KeyMetric::CoreDepositsRatio);
    let cmp = Analyzer::default().peer_comparison(&table, "A", metric).unwrap();
    let b_value = RatioEngine::new()
        .compute_key_metrics(&b)
        .get(KeyMetric::CoreDepositsRatio);

    assert_eq!(cmp.selected, Some(dec!(80)));
    assert_eq!(cmp.peer_mean, b_value);
    assert_eq!(cmp.peer_count, 1);
}

#[test]
fn selected_bank_is_excluded_for_every_choice() {
    let table = table();
    let analyzer = Analyzer::new(RatioEngine::new());
    let metric = KeyMetric::CoreDepositsRatio.into();

    let expected = [
        ("A", dec!(75), dec!(90), dec!(60)),
        ("B", dec!(85), dec!(90), dec!(80)),
        ("C", dec!(70), dec!(80), dec!(60)),
    ];
    for (name, mean, max, min) in expected {
        let cmp = analyzer.peer_comparison(&table, name, metric).unwrap();
        assert_eq!(cmp.peer_mean, Some(mean), "mean for {name}");
        assert_eq!(cmp.peer_max, Some(max), "max for {name}");
        assert_eq!(cmp.peer_min, Some(min), "min for {name}");
        // D has a zero denominator and never contributes.
        assert_eq!(cmp.peer_count, 2);
    }
}

#[test]
fn selected_value_may_be_absent() {
    let cmp = Analyzer::default()
        .peer_comparison(&table(), "D", KeyMetric::CoreDepositsRatio.into())
        .unwrap();
    assert_eq!(cmp.selected, None);
    assert_eq!(cmp.peer_count, 3);
    assert_eq!(cmp.peer_max, Some(dec!(90)));
}

#[test]
fn duplicates_of_the_selected_name_are_not_peers() {
    let table = FinancialTable::new(vec![
        bank("A", dec!(80), dec!(100)),
        bank("A", dec!(20), dec!(100)),
        bank("B", dec!(50), dec!(100)),
    ]);
    let cmp = Analyzer::default()
        .peer_comparison(&table, "A", KeyMetric::CoreDepositsRatio.into())
        .unwrap();
    assert_eq!(cmp.selected, Some(dec!(80)));
    assert_eq!(cmp.peer_mean, Some(dec!(50)));
    assert_eq!(cmp.peer_count, 1);
}

#[test]
fn line_items_can_be_compared_directly() {
    let cmp = Analyzer::default()
        .peer_comparison(&table(), "A", Field::TotalDeposits.into())
        .unwrap();
    assert_eq!(cmp.selected, Some(dec!(100)));
    assert_eq!(cmp.peer_mean, Some(dec!(200) / dec!(3)));
    assert_eq!(cmp.peer_min, Some(dec!(0)));
}

#[test]
fn no_peer_values_gives_empty_statistics() {
    let table = FinancialTable::new(vec![bank("A", dec!(1), dec!(2)), bank("B", dec!(1), dec!(2))]);
    let cmp = Analyzer::default()
        .peer_comparison(&table, "A", StressMetric::Cet1Ratio.into())
        .unwrap();
    assert_eq!(cmp.peer_count, 0);
    assert_eq!(cmp.peer_mean, None);
    assert_eq!(cmp.peer_max, None);
    assert_eq!(cmp.peer_min, None);
}

#[test]
fn unknown_bank_is_not_found() {
    let err = Analyzer::default()
        .peer_comparison(&table(), "Z", KeyMetric::NpaRatio.into())
        .unwrap_err();
    assert_eq!(err, AnalyzerError::NotFound("Z".to_string()));
}

#[test]
fn series_covers_every_row_in_order() {
    let series = Analyzer::default().all_bank_series(&table(), KeyMetric::CoreDepositsRatio.into());
    let names: Vec<_> = series.iter().map(|v| v.company.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    assert_eq!(series[0].value(), Some(dec!(80)));
    assert_eq!(series[2].value(), Some(dec!(90)));
    assert_eq!(
        series[3].result,
        Err(Unavailable::DivisionByZero { denominator: Field::TotalDeposits })
    );
}

#[test]
fn engine_key_metrics_agree_with_peer_comparison() {
    let table = table();
    let analyzer = Analyzer::new(RatioEngine::new());
    let metrics = analyzer.engine().key_metrics_for(&table, "B").unwrap();
    let cmp = analyzer
        .peer_comparison(&table, "B", Metric::Key(KeyMetric::CoreDepositsRatio))
        .unwrap();

    assert_eq!(metrics.get(KeyMetric::CoreDepositsRatio), cmp.selected);
    assert_eq!(cmp.selected, Some(dec!(60)));
}
