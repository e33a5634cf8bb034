use core_types::Field;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a single ratio could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    /// A required input cell was empty or not numeric.
    MissingField { field: Field },
    /// The denominator was present but zero.
    DivisionByZero { denominator: Field },
    /// The intermediate result does not fit in a `Decimal`.
    Overflow,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::MissingField { field } => write!(f, "missing '{field}'"),
            Unavailable::DivisionByZero { denominator } => write!(f, "'{denominator}' is zero"),
            Unavailable::Overflow => f.write_str("arithmetic overflow"),
        }
    }
}

/// A single computed ratio, or the reason it is absent.
pub type RatioValue = Result<Decimal, Unavailable>;

/// The full set of ratios for one bank, keyed by metric.
///
/// Every variant of `M` is present; unavailable entries carry their reason instead of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult<M: Ord> {
    values: BTreeMap<M, RatioValue>,
}

impl<M: Ord + Copy> RatioResult<M> {
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (M, RatioValue)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// The value for `metric`, or `None` if it could not be computed.
    pub fn get(&self, metric: M) -> Option<Decimal> {
        self.values.get(&metric).and_then(|v| v.ok())
    }

    /// The raw entry for `metric`, including the reason when it is unavailable.
    pub fn value(&self, metric: M) -> Option<&RatioValue> {
        self.values.get(&metric)
    }

    pub fn reason(&self, metric: M) -> Option<Unavailable> {
        self.values.get(&metric).and_then(|v| v.err())
    }

    pub fn iter(&self) -> impl Iterator<Item = (M, &RatioValue)> + '_ {
        self.values.iter().map(|(m, v)| (*m, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries that produced a value.
    pub fn available(&self) -> usize {
        self.values.values().filter(|v| v.is_ok()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unavailable_serializes_with_reason_tag() {
        let missing = serde_json::to_value(Unavailable::MissingField { field: Field::Loans }).unwrap();
        assert_eq!(missing, json!({ "reason": "missing_field", "field": "loans" }));

        let zero = serde_json::to_value(Unavailable::DivisionByZero {
            denominator: Field::TotalDeposits,
        })
        .unwrap();
        assert_eq!(zero, json!({ "reason": "division_by_zero", "denominator": "total_deposits" }));

        let overflow = serde_json::to_value(Unavailable::Overflow).unwrap();
        assert_eq!(overflow, json!({ "reason": "overflow" }));
    }

    #[test]
    fn ratio_value_serializes_as_ok_or_err() {
        let ok: RatioValue = Ok(Decimal::new(125, 1));
        assert_eq!(serde_json::to_value(ok).unwrap(), json!({ "Ok": "12.5" }));
        let err: RatioValue = Err(Unavailable::Overflow);
        assert_eq!(serde_json::to_value(err).unwrap(), json!({ "Err": { "reason": "overflow" } }));
    }
}
