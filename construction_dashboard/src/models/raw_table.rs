//! Provider-shaped tabular result, before normalization.
//!
//! A [`RawTable`] mirrors what a quote provider hands back: a date index, a set of
//! column headers that may be single-level (`"Close"`) or two-level
//! (`("Close", "CYRE3.SA")`), and a row-major grid of optional values. Shape is
//! validated on construction; column *names* are not, that is the
//! [normalizer](crate::normalizer)'s job.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when a raw table's shape is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RawTableError {
    #[error("Index has {index} entries but {rows} rows were supplied")]
    IndexLength { index: usize, rows: usize },

    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Column headers of a raw table.
#[derive(Debug, Clone, PartialEq)]
pub enum Columns {
    /// One name per column, e.g. `["Open", "High", ...]`.
    Flat(Vec<String>),
    /// `(field, ticker)` pairs, the layout multi-symbol downloads use even for a
    /// single symbol.
    TwoLevel(Vec<(String, String)>),
}

impl Columns {
    pub fn len(&self) -> usize {
        match self {
            Columns::Flat(names) => names.len(),
            Columns::TwoLevel(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_two_level(&self) -> bool {
        matches!(self, Columns::TwoLevel(_))
    }

    /// Drops the ticker level of a two-level header, keeping field names in order.
    pub fn collapse(&self) -> Vec<String> {
        match self {
            Columns::Flat(names) => names.clone(),
            Columns::TwoLevel(pairs) => pairs.iter().map(|(field, _)| field.clone()).collect(),
        }
    }
}

/// A date-indexed grid of optional values as returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    index: Vec<NaiveDate>,
    columns: Columns,
    rows: Vec<Vec<Option<f64>>>,
}

impl RawTable {
    /// Builds a table, checking that there is one row per index entry and one value
    /// per column in every row.
    pub fn new(
        index: Vec<NaiveDate>,
        columns: Columns,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, RawTableError> {
        if index.len() != rows.len() {
            return Err(RawTableError::IndexLength {
                index: index.len(),
                rows: rows.len(),
            });
        }
        let width = columns.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RawTableError::RowWidth {
                row,
                expected: width,
                found: values.len(),
            });
        }
        Ok(Self {
            index,
            columns,
            rows,
        })
    }

    /// A table with headers but no rows, i.e. the provider had nothing for the request.
    pub fn empty(columns: Columns) -> Self {
        Self {
            index: Vec::new(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub(crate) fn into_parts(self) -> (Vec<NaiveDate>, Columns, Vec<Vec<Option<f64>>>) {
        (self.index, self.columns, self.rows)
    }
}
