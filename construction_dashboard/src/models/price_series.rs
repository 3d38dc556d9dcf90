//! Canonical in-memory representation of a daily price history (OHLCV).
//!
//! A [`PriceSeries`] is only produced by the [normalizer](crate::normalizer) and is
//! read-only afterwards: it lives for one render cycle and is replaced wholesale
//! when the selection changes.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A named price/volume field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
}

/// The canonical column order. Normalized columns are always a prefix of this
/// list under positional mapping.
pub const CANONICAL_FIELDS: [Field; 6] = [
    Field::Open,
    Field::High,
    Field::Low,
    Field::Close,
    Field::AdjClose,
    Field::Volume,
];

/// Label of the materialized index column.
pub const DATE_COLUMN: &str = "Date";

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::AdjClose => "Adj Close",
            Field::Volume => "Volume",
        }
    }

    /// Resolves a provider column name to a field.
    ///
    /// Matching ignores case, spaces and underscores, so `"Adj Close"`,
    /// `"adjclose"` and `"adj_close"` are the same field.
    pub fn from_label(label: &str) -> Option<Field> {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "open" => Some(Field::Open),
            "high" => Some(Field::High),
            "low" => Some(Field::Low),
            "close" => Some(Field::Close),
            "adjclose" => Some(Field::AdjClose),
            "volume" => Some(Field::Volume),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One trading day.
///
/// Values for fields absent from the owning series are always `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    /// Trading date in the exchange's timezone.
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<f64>,
}

impl PriceRow {
    pub(crate) fn new(date: NaiveDate, values: [Option<f64>; 6]) -> Self {
        let [open, high, low, close, adj_close, volume] = values;
        Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::AdjClose => self.adj_close,
            Field::Volume => self.volume,
        }
    }
}

/// A normalized, date-ordered price history for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    columns: Vec<Field>,
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    /// Caller guarantees `rows` are strictly increasing by date and that fields
    /// outside `columns` are `None`.
    pub(crate) fn from_parts(columns: Vec<Field>, rows: Vec<PriceRow>) -> Self {
        Self { columns, rows }
    }

    /// Present value columns, without the leading date column.
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    /// Full header as rendered: `"Date"` followed by the value column labels.
    pub fn column_labels(&self) -> Vec<&'static str> {
        std::iter::once(DATE_COLUMN)
            .chain(self.columns.iter().map(|f| f.label()))
            .collect()
    }

    pub fn has_column(&self, field: Field) -> bool {
        self.columns.contains(&field)
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last `n` rows (all rows when the series is shorter).
    pub fn tail(&self, n: usize) -> &[PriceRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Dated non-missing values of one column; empty when the column is absent.
    pub fn points(&self, field: Field) -> Vec<(NaiveDate, f64)> {
        if !self.has_column(field) {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter_map(|r| r.get(field).map(|v| (r.date, v)))
            .collect()
    }
}

pub(crate) fn empty_values() -> [Option<f64>; 6] {
    [None; 6]
}

pub(crate) fn set_value(values: &mut [Option<f64>; 6], field: Field, value: Option<f64>) {
    values[field.slot()] = value;
}
