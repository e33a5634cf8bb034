use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric balance-sheet line item, in the positional order the input file uses
/// after the leading `Company` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Pat,
    Depreciation,
    TotalLiabilities,
    Cash,
    TotalAssets,
    CurrentAssets,
    CurrentLiabilities,
    AccountsReceivables,
    MarketableSecurities,
    CoreDeposits,
    TotalDeposits,
    Loans,
    NonPerformingAssets,
    Tier1Capital,
    Tier2Capital,
    RiskWeightedAssets,
    Cet1Ratio,
    Tier1CapitalRatio,
    TotalCapitalRatio,
    LeverageRatio,
    SupplementaryTier1,
    CapitalConservation,
}

impl Field {
    pub const COUNT: usize = 22;

    /// Every field, in file column order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Pat,
        Field::Depreciation,
        Field::TotalLiabilities,
        Field::Cash,
        Field::TotalAssets,
        Field::CurrentAssets,
        Field::CurrentLiabilities,
        Field::AccountsReceivables,
        Field::MarketableSecurities,
        Field::CoreDeposits,
        Field::TotalDeposits,
        Field::Loans,
        Field::NonPerformingAssets,
        Field::Tier1Capital,
        Field::Tier2Capital,
        Field::RiskWeightedAssets,
        Field::Cet1Ratio,
        Field::Tier1CapitalRatio,
        Field::TotalCapitalRatio,
        Field::LeverageRatio,
        Field::SupplementaryTier1,
        Field::CapitalConservation,
    ];

    /// Zero-based position among the numeric fields. The file column is `index() + 1`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The canonical column name assigned to this field on load.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Pat => "PAT",
            Field::Depreciation => "Depreciation",
            Field::TotalLiabilities => "Total Liabilities",
            Field::Cash => "Cash",
            Field::TotalAssets => "Total Assets",
            Field::CurrentAssets => "Current Assets",
            Field::CurrentLiabilities => "Current Liabilities",
            Field::AccountsReceivables => "Accounts Receivables",
            Field::MarketableSecurities => "Marketable Securities",
            Field::CoreDeposits => "Core Deposits",
            Field::TotalDeposits => "Total Deposits",
            Field::Loans => "Loans",
            Field::NonPerformingAssets => "Non Performing Assets",
            Field::Tier1Capital => "Tier 1 Capital",
            Field::Tier2Capital => "Tier 2 Capital",
            Field::RiskWeightedAssets => "Risk Weighted Assets",
            Field::Cet1Ratio => "CET1 Ratio",
            Field::Tier1CapitalRatio => "Tier 1 Capital Ratio",
            Field::TotalCapitalRatio => "Total Capital Ratio",
            Field::LeverageRatio => "Leverage Ratio",
            Field::SupplementaryTier1 => "Supplementary Tier 1",
            Field::CapitalConservation => "Capital Conservation",
        }
    }

    /// The snake_case key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Field::Pat => "pat",
            Field::Depreciation => "depreciation",
            Field::TotalLiabilities => "total_liabilities",
            Field::Cash => "cash",
            Field::TotalAssets => "total_assets",
            Field::CurrentAssets => "current_assets",
            Field::CurrentLiabilities => "current_liabilities",
            Field::AccountsReceivables => "accounts_receivables",
            Field::MarketableSecurities => "marketable_securities",
            Field::CoreDeposits => "core_deposits",
            Field::TotalDeposits => "total_deposits",
            Field::Loans => "loans",
            Field::NonPerformingAssets => "non_performing_assets",
            Field::Tier1Capital => "tier1_capital",
            Field::Tier2Capital => "tier2_capital",
            Field::RiskWeightedAssets => "risk_weighted_assets",
            Field::Cet1Ratio => "cet1_ratio",
            Field::Tier1CapitalRatio => "tier1_capital_ratio",
            Field::TotalCapitalRatio => "total_capital_ratio",
            Field::LeverageRatio => "leverage_ratio",
            Field::SupplementaryTier1 => "supplementary_tier1",
            Field::CapitalConservation => "capital_conservation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    /// Accepts either the canonical column name (`"Total Deposits"`) or the key (`"total_deposits"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.column_name() == s || field.key() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// The six headline ratios, all expressed in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMetric {
    CoreDepositsRatio,
    NpaRatio,
    LiquidityRatio,
    CapitalAdequacyRatio,
    SolvencyRatio,
    LoanDepositRatio,
}

impl KeyMetric {
    pub const ALL: [KeyMetric; 6] = [
        KeyMetric::CoreDepositsRatio,
        KeyMetric::NpaRatio,
        KeyMetric::LiquidityRatio,
        KeyMetric::CapitalAdequacyRatio,
        KeyMetric::SolvencyRatio,
        KeyMetric::LoanDepositRatio,
    ];

    pub fn key(self) -> &'static str {
        match self {
            KeyMetric::CoreDepositsRatio => "core_deposits_ratio",
            KeyMetric::NpaRatio => "npa_ratio",
            KeyMetric::LiquidityRatio => "liquidity_ratio",
            KeyMetric::CapitalAdequacyRatio => "capital_adequacy_ratio",
            KeyMetric::SolvencyRatio => "solvency_ratio",
            KeyMetric::LoanDepositRatio => "loan_deposit_ratio",
        }
    }

    /// Human-readable title used by the presenter.
    pub fn title(self) -> &'static str {
        match self {
            KeyMetric::CoreDepositsRatio => "Core Deposits/Total Deposits",
            KeyMetric::NpaRatio => "NPAs/Total Loans",
            KeyMetric::LiquidityRatio => "Liquidity Ratio",
            KeyMetric::CapitalAdequacyRatio => "Capital Adequacy Ratio",
            KeyMetric::SolvencyRatio => "Solvency Ratio",
            KeyMetric::LoanDepositRatio => "Loan-Deposit Ratio",
        }
    }

    /// One-line explanation of what the ratio indicates.
    pub fn description(self) -> &'static str {
        match self {
            KeyMetric::CoreDepositsRatio => "Measures the stability of funding sources",
            KeyMetric::NpaRatio => "Indicates asset quality and credit risk",
            KeyMetric::LiquidityRatio => "Measures ability to meet short-term obligations",
            KeyMetric::CapitalAdequacyRatio => "Shows bank's capital strength",
            KeyMetric::SolvencyRatio => "Indicates long-term financial stability",
            KeyMetric::LoanDepositRatio => "Shows efficiency in converting deposits to loans",
        }
    }
}

/// The CCAR-style capital ratios. These are read as-is from the input, not scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressMetric {
    Cet1Ratio,
    Tier1CapitalRatio,
    TotalCapitalRatio,
    LeverageRatio,
    SupplementaryTier1Ratio,
}

impl StressMetric {
    pub const ALL: [StressMetric; 5] = [
        StressMetric::Cet1Ratio,
        StressMetric::Tier1CapitalRatio,
        StressMetric::TotalCapitalRatio,
        StressMetric::LeverageRatio,
        StressMetric::SupplementaryTier1Ratio,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StressMetric::Cet1Ratio => "cet1_ratio",
            StressMetric::Tier1CapitalRatio => "tier1_capital_ratio",
            StressMetric::TotalCapitalRatio => "total_capital_ratio",
            StressMetric::LeverageRatio => "leverage_ratio",
            StressMetric::SupplementaryTier1Ratio => "supplementary_tier1_ratio",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StressMetric::Cet1Ratio => "CET1 Ratio",
            StressMetric::Tier1CapitalRatio => "Tier 1 Capital Ratio",
            StressMetric::TotalCapitalRatio => "Total Capital Ratio",
            StressMetric::LeverageRatio => "Leverage Ratio",
            StressMetric::SupplementaryTier1Ratio => "Supplementary Tier 1 Ratio",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StressMetric::Cet1Ratio => "Core measure of bank's financial strength",
            StressMetric::Tier1CapitalRatio => "Measures bank's core equity capital",
            StressMetric::TotalCapitalRatio => "Overall capital adequacy measure",
            StressMetric::LeverageRatio => "Indicates bank's ability to meet financial obligations",
            StressMetric::SupplementaryTier1Ratio => {
                "Additional Tier 1 capital strength beyond core CET1"
            }
        }
    }

    /// The line item each stress ratio is read from.
    ///
    /// `Tier1CapitalRatio` maps to the raw `Tier 1 Capital` amount rather than the
    /// `Tier 1 Capital Ratio` column. Known discrepancy.
    pub fn source_field(self) -> Field {
        match self {
            StressMetric::Cet1Ratio => Field::Cet1Ratio,
            StressMetric::Tier1CapitalRatio => Field::Tier1Capital,
            StressMetric::TotalCapitalRatio => Field::TotalCapitalRatio,
            StressMetric::LeverageRatio => Field::LeverageRatio,
            StressMetric::SupplementaryTier1Ratio => Field::SupplementaryTier1,
        }
    }
}

/// Anything that can be compared across banks: a raw line item or a derived ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    LineItem(Field),
    Key(KeyMetric),
    Stress(StressMetric),
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::LineItem(field) => field.column_name(),
            Metric::Key(metric) => metric.title(),
            Metric::Stress(metric) => metric.title(),
        }
    }

    /// Explanation shown next to a ratio. Raw line items have none.
    pub fn description(self) -> Option<&'static str> {
        match self {
            Metric::LineItem(_) => None,
            Metric::Key(metric) => Some(metric.description()),
            Metric::Stress(metric) => Some(metric.description()),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Metric::LineItem(field) => field.key(),
            Metric::Key(metric) => metric.key(),
            Metric::Stress(metric) => metric.key(),
        }
    }
}

impl From<Field> for Metric {
    fn from(field: Field) -> Self {
        Metric::LineItem(field)
    }
}

impl From<KeyMetric> for Metric {
    fn from(metric: KeyMetric) -> Self {
        Metric::Key(metric)
    }
}

impl From<StressMetric> for Metric {
    fn from(metric: StressMetric) -> Self {
        Metric::Stress(metric)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    /// Ratio keys take precedence over field keys, so `"leverage_ratio"` resolves to the
    /// stress metric. The raw column stays reachable through its column name (`"Leverage Ratio"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(metric) = KeyMetric::ALL.iter().find(|m| m.key() == s) {
            return Ok(Metric::Key(*metric));
        }
        if let Some(metric) = StressMetric::ALL.iter().find(|m| m.key() == s) {
            return Ok(Metric::Stress(*metric));
        }
        s.parse::<Field>()
            .map(Metric::LineItem)
            .map_err(|_| CoreError::UnknownMetric(s.to_string()))
    }
}
