use crate::enums::Field;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bank's row of balance-sheet line items.
///
/// Every numeric field is optional: `None` means the cell was absent or not numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    pub company: String,
    values: [Option<Decimal>; Field::COUNT],
}

impl BankRecord {
    /// Creates a record with every field missing.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            values: [None; Field::COUNT],
        }
    }

    pub fn get(&self, field: Field) -> Option<Decimal> {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: Option<Decimal>) {
        self.values[field.index()] = value;
    }

    /// Builder-style setter, mostly handy for assembling fixtures.
    pub fn with(mut self, field: Field, value: Decimal) -> Self {
        self.set(field, Some(value));
        self
    }
}

/// The loaded spreadsheet: bank rows in file order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTable {
    records: Vec<BankRecord>,
}

impl FinancialTable {
    pub fn new(records: Vec<BankRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BankRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BankRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row whose `company` equals `name` exactly. Duplicate names are not
    /// deduplicated; later rows with the same name are shadowed.
    pub fn find(&self, name: &str) -> Option<&BankRecord> {
        self.records.iter().find(|r| r.company == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl<'a> IntoIterator for &'a FinancialTable {
    type Item = &'a BankRecord;
    type IntoIter = std::slice::Iter<'a, BankRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_record_has_every_field_missing() {
        let record = BankRecord::new("Acme");
        assert!(Field::ALL.iter().all(|f| record.get(*f).is_none()));
    }

    #[test]
    fn find_returns_first_duplicate() {
        let table = FinancialTable::new(vec![
            BankRecord::new("A").with(Field::Loans, dec!(1)),
            BankRecord::new("A").with(Field::Loans, dec!(2)),
        ]);
        assert_eq!(table.find("A").unwrap().get(Field::Loans), Some(dec!(1)));
        assert!(table.find("a").is_none());
    }
}
