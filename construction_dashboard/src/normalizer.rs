//! Table normalization: provider-shaped [`RawTable`] to canonical [`PriceSeries`].
//!
//! What normalization does:
//! - Collapses a two-level `(field, ticker)` header to its field level, order preserved
//! - Names columns from the canonical list `Open, High, Low, Close, Adj Close, Volume`
//!   ([`ColumnMapping::Positional`], the default) or by matching field names
//!   ([`ColumnMapping::ByName`])
//! - Materializes the date index as the leading `Date` column
//! - Turns non-finite values into missing values
//! - Sorts rows by date; when a date repeats, the last row for it wins
//!
//! Missing optional columns are never an error. Consumers check
//! [`PriceSeries::has_column`] before deriving anything from a field.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    price_series::{CANONICAL_FIELDS, Field, PriceRow, PriceSeries, empty_values, set_value},
    raw_table::RawTable,
};

/// Errors that stop normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The provider returned no rows. This is the "no data" state, not a fault.
    #[error("No rows to normalize")]
    EmptyTable,

    /// Positional naming needs at most one canonical name per column.
    #[error("Table has {found} columns but only {max} canonical names exist")]
    TooManyColumns { found: usize, max: usize },
}

/// How raw column names are turned into [`Field`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// The i-th column becomes the i-th canonical field, whatever it was called.
    #[default]
    Positional,
    /// Columns are matched by name and emitted in canonical order. Falls back to
    /// positional naming when any name is unrecognised or repeated.
    ByName,
}

/// Normalizes with [`ColumnMapping::Positional`].
pub fn normalize(raw: RawTable) -> Result<PriceSeries, NormalizeError> {
    normalize_with(raw, ColumnMapping::Positional)
}

/// Normalizes a raw table using the given column mapping.
///
/// Errors:
/// - [`NormalizeError::EmptyTable`] when the table has no rows; nothing else is checked
/// - [`NormalizeError::TooManyColumns`] when positional naming has run out of names
pub fn normalize_with(raw: RawTable, mapping: ColumnMapping) -> Result<PriceSeries, NormalizeError> {
    if raw.is_empty() {
        return Err(NormalizeError::EmptyTable);
    }

    let names = raw.columns().collapse();
    let fields = match mapping {
        ColumnMapping::Positional => positional_fields(names.len())?,
        ColumnMapping::ByName => match fields_by_name(&names) {
            Some(fields) => fields,
            None => {
                warn!(columns = ?names, "column names not recognised, falling back to positional mapping");
                positional_fields(names.len())?
            }
        },
    };
    debug!(
        two_level = raw.columns().is_two_level(),
        columns = ?fields,
        rows = raw.len(),
        "normalizing table"
    );

    let (index, _, grid) = raw.into_parts();
    let mut rows: Vec<PriceRow> = index
        .into_iter()
        .zip(grid)
        .map(|(date, values)| {
            let mut slots = empty_values();
            for (field, value) in fields.iter().zip(values) {
                if let Some(field) = field {
                    set_value(&mut slots, *field, value.filter(|v| v.is_finite()));
                }
            }
            PriceRow::new(date, slots)
        })
        .collect();

    order_by_date(&mut rows);

    let columns = canonical_columns(&fields);
    Ok(PriceSeries::from_parts(columns, rows))
}

/// One slot per raw column: `Some(field)` to keep it, `None` to drop it.
type ColumnPlan = Vec<Option<Field>>;

fn positional_fields(count: usize) -> Result<ColumnPlan, NormalizeError> {
    if count > CANONICAL_FIELDS.len() {
        return Err(NormalizeError::TooManyColumns {
            found: count,
            max: CANONICAL_FIELDS.len(),
        });
    }
    Ok(CANONICAL_FIELDS[..count].iter().copied().map(Some).collect())
}

/// Resolves every name once; the set keeps column order, so it is the plan
/// itself. `None` when a name is unknown or a field repeats.
fn fields_by_name(names: &[String]) -> Option<ColumnPlan> {
    let fields: IndexSet<Field> = names
        .iter()
        .map(|n| Field::from_label(n))
        .collect::<Option<_>>()?;
    if fields.len() != names.len() {
        return None;
    }
    Some(fields.into_iter().map(Some).collect())
}

/// Present fields in canonical order.
fn canonical_columns(plan: &ColumnPlan) -> Vec<Field> {
    CANONICAL_FIELDS
        .iter()
        .copied()
        .filter(|f| plan.contains(&Some(*f)))
        .collect()
}

fn order_by_date(rows: &mut Vec<PriceRow>) {
    if rows.windows(2).all(|w| w[0].date < w[1].date) {
        return;
    }
    let before = rows.len();
    // Stable sort keeps provider order among equal dates, so the last one is the latest.
    rows.sort_by_key(|r| r.date);
    let mut deduped: Vec<PriceRow> = Vec::with_capacity(before);
    for row in rows.drain(..) {
        match deduped.last_mut() {
            Some(prev) if prev.date == row.date => *prev = row,
            _ => deduped.push(row),
        }
    }
    debug!(
        dropped = before - deduped.len(),
        "reordered rows by date"
    );
    *rows = deduped;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::raw_table::Columns;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn flat(names: &[&str]) -> Columns {
        Columns::Flat(names.iter().map(|s| s.to_string()).collect())
    }

    fn two_level(names: &[&str], ticker: &str) -> Columns {
        Columns::TwoLevel(
            names
                .iter()
                .map(|s| (s.to_string(), ticker.to_string()))
                .collect(),
        )
    }

    #[test]
    fn empty_table_is_signalled_not_normalized() {
        let raw = RawTable::empty(flat(&["Open", "High", "Low", "Close"]));
        assert_eq!(normalize(raw), Err(NormalizeError::EmptyTable));
    }

    #[test]
    fn positional_rename_ignores_source_names() {
        let raw = RawTable::new(
            vec![day(2)],
            flat(&["a", "b", "c", "d"]),
            vec![vec![Some(1.0), Some(2.0), Some(0.5), Some(1.5)]],
        )
        .unwrap();
        let series = normalize(raw).unwrap();
        assert_eq!(series.column_labels(), vec!["Date", "Open", "High", "Low", "Close"]);
        assert_eq!(series.rows()[0].close, Some(1.5));
        assert!(!series.has_column(Field::Volume));
    }

    #[test]
    fn two_level_header_collapses_to_field_level() {
        let raw = RawTable::new(
            vec![day(2), day(3)],
            two_level(&["Open", "High", "Low", "Close", "Adj Close", "Volume"], "EZTC3.SA"),
            vec![
                vec![Some(10.0), Some(11.0), Some(9.0), Some(10.5), Some(10.4), Some(1000.0)],
                vec![Some(10.5), Some(12.0), Some(10.0), Some(11.5), Some(11.4), Some(2000.0)],
            ],
        )
        .unwrap();
        let series = normalize(raw).unwrap();
        assert_eq!(series.columns(), &CANONICAL_FIELDS);
        assert_eq!(series.rows()[1].volume, Some(2000.0));
    }

    #[test]
    fn too_many_columns_cannot_be_named() {
        let raw = RawTable::new(
            vec![day(2)],
            flat(&["1", "2", "3", "4", "5", "6", "7"]),
            vec![vec![Some(0.0); 7]],
        )
        .unwrap();
        assert_eq!(
            normalize(raw),
            Err(NormalizeError::TooManyColumns { found: 7, max: 6 })
        );
    }

    #[test]
    fn non_finite_values_become_missing() {
        let raw = RawTable::new(
            vec![day(2)],
            flat(&["Open", "High", "Low", "Close"]),
            vec![vec![Some(f64::NAN), Some(f64::INFINITY), None, Some(3.0)]],
        )
        .unwrap();
        let binding = normalize(raw).unwrap();
        let row = &binding.rows()[0];
        assert_eq!((row.open, row.high, row.low, row.close), (None, None, None, Some(3.0)));
    }

    #[test]
    fn rows_are_sorted_and_duplicate_dates_keep_the_last() {
        let raw = RawTable::new(
            vec![day(5), day(3), day(5)],
            flat(&["Open", "High", "Low", "Close"]),
            vec![
                vec![None, None, None, Some(50.0)],
                vec![None, None, None, Some(30.0)],
                vec![None, None, None, Some(51.0)],
            ],
        )
        .unwrap();
        let series = normalize(raw).unwrap();
        let closes: Vec<_> = series.rows().iter().map(|r| (r.date, r.close)).collect();
        assert_eq!(closes, vec![(day(3), Some(30.0)), (day(5), Some(51.0))]);
    }

    #[test]
    fn by_name_reorders_known_fields() {
        // Alphabetical order, as some providers return it, and no Adj Close.
        let raw = RawTable::new(
            vec![day(2)],
            two_level(&["Close", "High", "Low", "Open", "Volume"], "CYRE3.SA"),
            vec![vec![Some(4.0), Some(5.0), Some(3.0), Some(3.5), Some(900.0)]],
        )
        .unwrap();
        let series = normalize_with(raw, ColumnMapping::ByName).unwrap();
        assert_eq!(
            series.columns(),
            &[Field::Open, Field::High, Field::Low, Field::Close, Field::Volume]
        );
        let row = &series.rows()[0];
        assert_eq!(row.open, Some(3.5));
        assert_eq!(row.close, Some(4.0));
        assert_eq!(row.volume, Some(900.0));
        assert_eq!(row.adj_close, None);
    }

    #[test]
    fn by_name_falls_back_to_positional_on_unknown_names() {
        let raw = RawTable::new(
            vec![day(2)],
            flat(&["Open", "High", "Mystery"]),
            vec![vec![Some(1.0), Some(2.0), Some(3.0)]],
        )
        .unwrap();
        let series = normalize_with(raw, ColumnMapping::ByName).unwrap();
        assert_eq!(series.columns(), &[Field::Open, Field::High, Field::Low]);
        assert_eq!(series.rows()[0].low, Some(3.0));
    }

    #[test]
    fn by_name_falls_back_on_repeated_fields() {
        let raw = RawTable::new(
            vec![day(2)],
            Columns::TwoLevel(vec![
                ("Close".into(), "CYRE3.SA".into()),
                ("Close".into(), "MRVE3.SA".into()),
            ]),
            vec![vec![Some(1.0), Some(2.0)]],
        )
        .unwrap();
        let series = normalize_with(raw, ColumnMapping::ByName).unwrap();
        assert_eq!(series.columns(), &[Field::Open, Field::High]);
    }

    #[test]
    fn name_plan_follows_column_order() {
        let names: Vec<String> = ["volume", "Adj_Close", "close"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            fields_by_name(&names),
            Some(vec![Some(Field::Volume), Some(Field::AdjClose), Some(Field::Close)])
        );
        let repeated: Vec<String> = vec!["Low".into(), "low".into()];
        assert_eq!(fields_by_name(&repeated), None);
        let unknown: Vec<String> = vec!["Low".into(), "Vwap".into()];
        assert_eq!(fields_by_name(&unknown), None);
    }
}
