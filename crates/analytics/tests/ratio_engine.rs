use analytics::{AnalyticsError, RatioEngine, Unavailable};
use core_types::{BankRecord, Field, FinancialTable, KeyMetric, StressMetric};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn two_bank_table() -> FinancialTable {
    let a = BankRecord::new("A")
        .with(Field::CoreDeposits, dec!(80))
        .with(Field::TotalDeposits, dec!(100))
        .with(Field::Loans, dec!(50))
        .with(Field::NonPerformingAssets, dec!(5))
        .with(Field::CurrentAssets, dec!(200))
        .with(Field::CurrentLiabilities, dec!(100))
        .with(Field::Tier1Capital, dec!(10))
        .with(Field::Tier2Capital, dec!(5))
        .with(Field::RiskWeightedAssets, dec!(100))
        .with(Field::Pat, dec!(20))
        .with(Field::Depreciation, dec!(5))
        .with(Field::TotalLiabilities, dec!(50));

    let mut b = BankRecord::new("B");
    for field in Field::ALL {
        b.set(field, Some(Decimal::ZERO));
    }
    b.set(Field::TotalDeposits, Some(dec!(100)));

    FinancialTable::new(vec![a, b])
}

#[test]
fn worked_example_from_two_banks() {
    let table = two_bank_table();
    let engine = RatioEngine::new();

    let a = engine.key_metrics_for(&table, "A").unwrap();
    assert_eq!(a.get(KeyMetric::CoreDepositsRatio), Some(dec!(80.0)));
    assert_eq!(a.get(KeyMetric::NpaRatio), Some(dec!(10.0)));

    let b = engine.key_metrics_for(&table, "B").unwrap();
    assert_eq!(b.get(KeyMetric::CoreDepositsRatio), Some(dec!(0.0)));
    assert_eq!(b.get(KeyMetric::LoanDepositRatio), Some(dec!(0.0)));
    assert_eq!(
        b.reason(KeyMetric::NpaRatio),
        Some(Unavailable::DivisionByZero { denominator: Field::Loans })
    );
    assert_eq!(
        b.reason(KeyMetric::LiquidityRatio),
        Some(Unavailable::DivisionByZero { denominator: Field::CurrentLiabilities })
    );
}

#[test]
fn key_ratios_match_arithmetic_for_positive_denominators() {
    let engine = RatioEngine::new();
    let cases = [
        (dec!(1), dec!(3)),
        (dec!(123.45), dec!(678.9)),
        (dec!(-40), dec!(8)),
        (dec!(1000000), dec!(0.25)),
    ];

    for (num, den) in cases {
        let record = BankRecord::new("X")
            .with(Field::NonPerformingAssets, num)
            .with(Field::Loans, den)
            .with(Field::Tier1Capital, num)
            .with(Field::Tier2Capital, num)
            .with(Field::RiskWeightedAssets, den);
        let m = engine.compute_key_metrics(&record);

        let npa = m.get(KeyMetric::NpaRatio).unwrap();
        assert!((npa - num / den * dec!(100)).abs() < dec!(0.000001));

        let car = m.get(KeyMetric::CapitalAdequacyRatio).unwrap();
        assert!((car - (num + num) / den * dec!(100)).abs() < dec!(0.000001));
    }
}

#[test]
fn unknown_bank_is_not_found() {
    let table = two_bank_table();
    let engine = RatioEngine::new();
    assert_eq!(
        engine.get_record(&table, "C").unwrap_err(),
        AnalyticsError::NotFound("C".to_string())
    );
    assert!(matches!(
        engine.stress_metrics_for(&table, "a"),
        Err(AnalyticsError::NotFound(_))
    ));
}

#[test]
fn duplicate_names_resolve_to_first_row() {
    let table = FinancialTable::new(vec![
        BankRecord::new("Dup").with(Field::Cet1Ratio, dec!(9)),
        BankRecord::new("Dup").with(Field::Cet1Ratio, dec!(12)),
    ]);
    let m = RatioEngine::new().stress_metrics_for(&table, "Dup").unwrap();
    assert_eq!(m.get(StressMetric::Cet1Ratio), Some(dec!(9)));
}

#[test]
fn stress_metrics_never_fail_on_empty_record() {
    let m = RatioEngine::new().compute_stress_metrics(&BankRecord::new("Empty"));
    assert_eq!(m.len(), StressMetric::ALL.len());
    assert_eq!(m.available(), 0);
}
