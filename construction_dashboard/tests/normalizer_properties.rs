use chrono::{Duration, NaiveDate};
use construction_dashboard::{
    models::{
        price_series::{CANONICAL_FIELDS, DATE_COLUMN},
        raw_table::{Columns, RawTable},
    },
    normalizer::{NormalizeError, normalize},
};
use proptest::prelude::*;

fn dates(n: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n).map(|i| start + Duration::days(i as i64)).collect()
}

/// Tables of 1..=6 arbitrarily named columns and 1..20 rows.
fn flat_table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<Option<f64>>>)> {
    (1usize..=6, 1usize..20).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec("[a-z]{1,8}", width),
            prop::collection::vec(
                prop::collection::vec(prop::option::of(-1e6f64..1e6), width),
                height,
            ),
        )
    })
}

proptest! {
    #[test]
    fn columns_are_a_canonical_prefix((names, rows) in flat_table()) {
        let width = names.len();
        let height = rows.len();
        let raw = RawTable::new(dates(height), Columns::Flat(names), rows).unwrap();
        let series = normalize(raw).unwrap();

        prop_assert_eq!(series.columns(), &CANONICAL_FIELDS[..width]);
        let labels = series.column_labels();
        prop_assert_eq!(labels[0], DATE_COLUMN);
        prop_assert_eq!(labels.len(), width + 1);
        prop_assert_eq!(series.len(), height);
    }

    #[test]
    fn two_level_header_matches_its_first_level((names, rows) in flat_table()) {
        let height = rows.len();
        let two_level = Columns::TwoLevel(
            names.iter().map(|n| (n.clone(), "TEND3.SA".to_string())).collect(),
        );
        let flat = RawTable::new(dates(height), Columns::Flat(names), rows.clone()).unwrap();
        let nested = RawTable::new(dates(height), two_level, rows).unwrap();

        prop_assert_eq!(normalize(flat).unwrap(), normalize(nested).unwrap());
    }

    #[test]
    fn rows_come_out_sorted_by_date(mut offsets in prop::collection::vec(0i64..400, 1..30)) {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let index: Vec<NaiveDate> = offsets.iter().map(|d| start + Duration::days(*d)).collect();
        let rows = offsets.iter().map(|d| vec![Some(*d as f64)]).collect();
        let raw = RawTable::new(index, Columns::Flat(vec!["x".into()]), rows).unwrap();
        let series = normalize(raw).unwrap();

        offsets.sort_unstable();
        offsets.dedup();
        let got: Vec<NaiveDate> = series.rows().iter().map(|r| r.date).collect();
        let want: Vec<NaiveDate> = offsets.iter().map(|d| start + Duration::days(*d)).collect();
        prop_assert_eq!(got, want);
    }
}

#[test]
fn seven_columns_cannot_be_named() {
    let names = (0..7).map(|i| format!("c{i}")).collect();
    let raw = RawTable::new(dates(1), Columns::Flat(names), vec![vec![None; 7]]).unwrap();
    assert_eq!(
        normalize(raw),
        Err(NormalizeError::TooManyColumns { found: 7, max: 6 })
    );
}

#[test]
fn empty_table_is_reported_as_such() {
    let raw = RawTable::empty(Columns::Flat(vec!["Open".into()]));
    assert_eq!(normalize(raw), Err(NormalizeError::EmptyTable));
}
