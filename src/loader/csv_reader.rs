use crate::core::store::RecordStore;
use crate::domain::model::Record;
use crate::utils::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Minimum number of fields an accepted row must carry.
pub const FIELD_COUNT: usize = 10;

/// 單列解析失敗的原因，只用於記錄後略過
#[derive(Error, Debug, PartialEq)]
pub enum RowError {
    #[error("expected at least 10 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("invalid number '{value}' in column '{column}'")]
    InvalidNumber { column: &'static str, value: String },
}

/// Outcome of reading one data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub short_rows: usize,
    pub invalid_rows: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.short_rows + self.invalid_rows
    }
}

/// Reads every data row from `reader` into `store`.
///
/// The first line is a header and is discarded. Each line is split on its own
/// by [`split_line`], so a stray quote never reaches into the following rows.
/// Rows with fewer than [`FIELD_COUNT`] fields are skipped silently, rows with
/// unparseable numbers or bytes that are not UTF-8 are skipped with a warning.
/// Only I/O failures abort the read.
pub fn read_records<R: Read>(reader: R, store: &mut RecordStore) -> Result<LoadReport> {
    let mut lines = BufReader::new(reader).split(b'\n');
    let mut report = LoadReport::default();

    // 標頭
    if let Some(header) = lines.next() {
        header?;
    }

    for (index, bytes) in lines.enumerate() {
        let line_number = index + 2;
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Skipping undecodable line {}: {}", line_number, e);
                report.invalid_rows += 1;
                continue;
            }
        };
        let line = line.strip_suffix('\r').unwrap_or(&line);

        match parse_row(&split_line(line)) {
            Ok(record) => {
                store.insert(record);
                report.accepted += 1;
            }
            Err(RowError::TooFewFields { found }) => {
                tracing::debug!("Skipping line {} with {} fields", line_number, found);
                report.short_rows += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "Error parsing numeric values on line {}: {} ({})",
                    line_number,
                    e,
                    line
                );
                report.invalid_rows += 1;
            }
        }
    }

    tracing::debug!(
        "Read {} records, skipped {} short and {} invalid rows",
        report.accepted,
        report.short_rows,
        report.invalid_rows
    );

    Ok(report)
}

/// Splits one line on commas outside quotes.
///
/// Every `"` flips the quoted state and is dropped, wherever it sits in the
/// field; a doubled quote is not an escape.
pub fn split_line(line: &str) -> csv::StringRecord {
    let mut fields = csv::StringRecord::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push_field(&field);
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push_field(&field);

    fields
}

pub fn read_records_from_path<P: AsRef<Path>>(path: P, store: &mut RecordStore) -> Result<LoadReport> {
    let file = File::open(path.as_ref())?;
    read_records(BufReader::new(file), store)
}

/// Builds a record from the first ten fields of a row; extra fields are ignored.
pub fn parse_row(row: &csv::StringRecord) -> std::result::Result<Record, RowError> {
    if row.len() < FIELD_COUNT {
        return Err(RowError::TooFewFields { found: row.len() });
    }

    let field = |i: usize| row.get(i).unwrap_or_default();

    Ok(Record {
        name: field(0).to_string(),
        pokedex_number: parse_integer(field(1), "pokedex_number")?,
        type1: field(2).to_string(),
        type2: field(3).to_string(),
        classification: field(4).to_string(),
        height: parse_decimal(field(5), "height")?,
        weight: parse_decimal(field(6), "weight")?,
        abilities: field(7).to_string(),
        generation: parse_integer(field(8), "generation")?,
        legendary_status: field(9).to_string(),
    })
}

// 整數欄位不去除空白，小數欄位允許前後空白
fn parse_integer(value: &str, column: &'static str) -> std::result::Result<i32, RowError> {
    value.parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: value.to_string(),
    })
}

fn parse_decimal(value: &str, column: &'static str) -> std::result::Result<f64, RowError> {
    value.trim().parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: value.to_string(),
    })
}
