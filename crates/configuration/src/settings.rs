use crate::error::ConfigError;
use core_types::{KeyMetric, Metric, StressMetric};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; an absent section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub benchmarks: Benchmarks,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the values that deserialization alone cannot reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data.delimiter.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "data.delimiter must be a single ASCII character, got '{}'",
                self.data.delimiter
            )));
        }
        let negative = self
            .benchmarks
            .key
            .iter()
            .map(|(m, v)| (m.key(), v))
            .chain(self.benchmarks.stress.iter().map(|(m, v)| (m.key(), v)))
            .find(|(_, v)| **v < Decimal::ZERO);
        if let Some((metric, value)) = negative {
            return Err(ConfigError::ValidationError(format!(
                "benchmark for '{metric}' must not be negative, got {value}"
            )));
        }
        Ok(())
    }
}

/// Where the line-items file lives and how it is delimited.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the delimited export of the line-items spreadsheet.
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
    /// Column separator. `','` for CSV, `'\t'` for TSV.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl DataSettings {
    /// The delimiter as the byte the CSV reader expects. Only valid after `Config::validate`.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from("data/line_items.csv")
}

fn default_delimiter() -> char {
    ','
}

/// Static regulatory and market thresholds drawn on the gauges.
///
/// A metric left out of a configured table simply has no benchmark.
#[derive(Debug, Clone, Deserialize)]
pub struct Benchmarks {
    #[serde(default = "default_key_benchmarks")]
    pub key: BTreeMap<KeyMetric, Decimal>,
    #[serde(default = "default_stress_benchmarks")]
    pub stress: BTreeMap<StressMetric, Decimal>,
}

impl Benchmarks {
    /// The threshold for `metric`. Raw line items never have one.
    pub fn for_metric(&self, metric: Metric) -> Option<Decimal> {
        match metric {
            Metric::LineItem(_) => None,
            Metric::Key(m) => self.key.get(&m).copied(),
            Metric::Stress(m) => self.stress.get(&m).copied(),
        }
    }
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            key: default_key_benchmarks(),
            stress: default_stress_benchmarks(),
        }
    }
}

fn default_key_benchmarks() -> BTreeMap<KeyMetric, Decimal> {
    BTreeMap::from([
        (KeyMetric::CoreDepositsRatio, Decimal::new(850, 1)),
        (KeyMetric::NpaRatio, Decimal::new(20, 1)),
        (KeyMetric::LiquidityRatio, Decimal::new(250, 1)),
        (KeyMetric::CapitalAdequacyRatio, Decimal::new(120, 1)),
        (KeyMetric::SolvencyRatio, Decimal::new(200, 1)),
        (KeyMetric::LoanDepositRatio, Decimal::new(800, 1)),
    ])
}

fn default_stress_benchmarks() -> BTreeMap<StressMetric, Decimal> {
    BTreeMap::from([
        (StressMetric::Cet1Ratio, Decimal::new(45, 1)),
        (StressMetric::Tier1CapitalRatio, Decimal::from(6)),
        (StressMetric::TotalCapitalRatio, Decimal::from(8)),
        (StressMetric::LeverageRatio, Decimal::new(40, 1)),
        (StressMetric::SupplementaryTier1Ratio, Decimal::from(3)),
    ])
}

/// Output format of the stderr log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "bankstax.log".to_string()
}
