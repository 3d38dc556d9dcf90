//! Summary figures derived from a [`PriceSeries`].
//!
//! Every function returns `None` when its input column is absent or has no
//! usable values, so callers can decide per metric what to show.

use crate::models::price_series::{Field, PriceSeries};

/// Percentage change from the first to the last closing price.
///
/// `(last / first - 1) * 100`, using the first and last non-missing closes.
/// `None` without a Close column, without any close, or when the first close is zero.
pub fn period_return(series: &PriceSeries) -> Option<f64> {
    let closes = series.points(Field::Close);
    let (_, first) = *closes.first()?;
    let (_, last) = *closes.last()?;
    if first == 0.0 {
        return None;
    }
    Some((last / first - 1.0) * 100.0)
}

/// Arithmetic mean of the non-missing volume values.
pub fn average_volume(series: &PriceSeries) -> Option<f64> {
    let volumes = series.points(Field::Volume);
    if volumes.is_empty() {
        return None;
    }
    let total: f64 = volumes.iter().map(|(_, v)| v).sum();
    Some(total / volumes.len() as f64)
}

/// The most recent non-missing closing price.
pub fn last_close(series: &PriceSeries) -> Option<f64> {
    series.points(Field::Close).last().map(|(_, v)| *v)
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
