use crate::error::LoadError;
use core_types::{BankRecord, Field, FinancialTable};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// The literal value that marks a duplicated header row in the body of the file.
pub const COMPANY_COLUMN: &str = "Company";

/// `Company` followed by every numeric line item.
pub const COLUMN_COUNT: usize = Field::COUNT + 1;

/// Knobs for reading the delimited export of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field separator, `b','` for CSV or `b'\t'` for TSV.
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Loads the financial table from `path` using default options.
pub fn load(path: impl AsRef<Path>) -> Result<FinancialTable, LoadError> {
    load_with(path, &LoaderOptions::default())
}

/// Loads the financial table from `path`.
///
/// Column names are assigned positionally; the file's own header row is discarded.
pub fn load_with(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<FinancialTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = from_reader(file, options)?;
    tracing::info!(path = %path.display(), banks = table.len(), "Loaded financial data.");
    Ok(table)
}

/// Parses a financial table from any reader.
///
/// The first row is always treated as the header and skipped. Any later row whose
/// `Company` cell is exactly `"Company"` is a repeated header and is dropped too.
/// Nothing else is cleaned: names are not trimmed and duplicate banks are kept.
pub fn from_reader<R: Read>(reader: R, options: &LoaderOptions) -> Result<FinancialTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut rows = rdr.records();
    let header = rows.next().ok_or(LoadError::Empty)??;
    if header.len() < COLUMN_COUNT {
        return Err(LoadError::ColumnCount {
            expected: COLUMN_COUNT,
            found: header.len(),
        });
    }

    let mut records = Vec::new();
    let mut header_duplicates = 0usize;

    for (i, result) in rows.enumerate() {
        let row = result?;
        let company = row.get(0).unwrap_or_default();
        if company == COMPANY_COLUMN {
            header_duplicates += 1;
            continue;
        }
        // +2: one for the header row, one for 1-based line numbers.
        records.push(parse_row(company, &row, i + 2));
    }

    if header_duplicates > 0 {
        tracing::info!(rows = header_duplicates, "Dropped repeated header rows.");
    }

    Ok(FinancialTable::new(records))
}

fn parse_row(company: &str, row: &StringRecord, line: usize) -> BankRecord {
    let mut record = BankRecord::new(company);
    for field in Field::ALL {
        let Some(cell) = row.get(field.index() + 1) else {
            continue;
        };
        let value = parse_number(cell);
        if value.is_none() && !cell.trim().is_empty() {
            tracing::debug!(
                line,
                company,
                column = field.column_name(),
                cell,
                "Non-numeric cell treated as missing."
            );
        }
        record.set(field, value);
    }
    record
}

/// Locale-free numeric parsing. Accepts plain decimals and scientific notation.
fn parse_number(cell: &str) -> Option<Decimal> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
}

/// Returns the distinct bank names in ascending, case-sensitive order.
pub fn list_banks(table: &FinancialTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.company.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
