//! Selection → fetch → normalize → view.
//!
//! [`load_view`] runs one render cycle for a [`Selection`]; [`build_view`] is its
//! pure half, turning whatever the provider returned into a [`DashboardView`]
//! that the terminal UI and the text report both draw from.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::DisplayConfig,
    metrics::{average_volume, last_close, period_return, round_to},
    models::{
        price_series::{Field, PriceRow},
        raw_table::RawTable,
        selection::Selection,
    },
    normalizer::{NormalizeError, normalize_with},
    providers::{DataProvider, ProviderError},
};

pub const NO_DATA_MESSAGE: &str = "No data found for this period. Try choosing another one.";
pub const CLOSE_UNAVAILABLE_MESSAGE: &str =
    "Closing price data unavailable for this asset or period.";
pub const VOLUME_UNAVAILABLE_MESSAGE: &str =
    "Trading volume data unavailable for this asset or period.";
pub const ZERO_BASE_MESSAGE: &str =
    "Period return unavailable: the first closing price in the period is zero.";

/// Everything one render cycle shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub heading: String,
    pub outcome: Outcome,
}

/// Result of a render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    /// The provider had nothing for the selection.
    NoData { message: String },
    /// The request or the table it produced could not be used.
    Failed { message: String },
    Loaded(Report),
}

/// Figures derived from a non-empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Header of the tail table, `Date` first.
    pub columns: Vec<&'static str>,
    pub tail: Vec<PriceRow>,
    /// Close vs date; `None` without a Close column.
    pub close_chart: Option<Vec<(NaiveDate, f64)>>,
    /// Percent, unrounded.
    pub period_return: Option<f64>,
    pub indicators: Option<Indicators>,
    pub warnings: Vec<String>,
}

/// Volume-gated indicator block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    /// Rounded to 2 decimals.
    pub average_volume: f64,
    /// Rounded to 2 decimals; `None` without any close.
    pub last_close: Option<f64>,
}

impl Report {
    /// `"10.00%"`.
    pub fn formatted_return(&self) -> Option<String> {
        self.period_return.map(|r| format!("{r:.2}%"))
    }
}

impl DashboardView {
    pub fn loaded(&self) -> Option<&Report> {
        match &self.outcome {
            Outcome::Loaded(report) => Some(report),
            _ => None,
        }
    }
}

/// Fetches and shapes one view. Never fails: every problem becomes an [`Outcome`].
pub async fn load_view(
    provider: &dyn DataProvider,
    selection: Selection,
    display: &DisplayConfig,
) -> DashboardView {
    let fetched = provider.fetch_history(selection).await;
    build_view(selection, fetched, display)
}

/// Builds the view for a provider response.
pub fn build_view(
    selection: Selection,
    fetched: Result<RawTable, ProviderError>,
    display: &DisplayConfig,
) -> DashboardView {
    let outcome = match fetched {
        Err(e) => {
            warn!(error = %e, symbol = selection.symbol(), "fetch failed");
            Outcome::Failed {
                message: e.to_string(),
            }
        }
        Ok(raw) => outcome_for(raw, display),
    };
    DashboardView {
        selection,
        heading: selection.heading(),
        outcome,
    }
}

fn outcome_for(raw: RawTable, display: &DisplayConfig) -> Outcome {
    let series = match normalize_with(raw, display.column_mapping) {
        Ok(series) => series,
        Err(NormalizeError::EmptyTable) => {
            info!("empty result, nothing to render");
            return Outcome::NoData {
                message: NO_DATA_MESSAGE.to_string(),
            };
        }
        Err(e) => {
            warn!(error = %e, "could not normalize table");
            return Outcome::Failed {
                message: e.to_string(),
            };
        }
    };

    // An absent column and one with only missing values read the same here.
    let mut warnings = Vec::new();
    let closes = series.points(Field::Close);
    let period_return = period_return(&series);
    let close_chart = if closes.is_empty() {
        warnings.push(CLOSE_UNAVAILABLE_MESSAGE.to_string());
        None
    } else {
        if period_return.is_none() {
            warnings.push(ZERO_BASE_MESSAGE.to_string());
        }
        Some(closes)
    };

    let indicators = match average_volume(&series) {
        Some(avg) => Some(Indicators {
            average_volume: round_to(avg, 2),
            last_close: last_close(&series).map(|c| round_to(c, 2)),
        }),
        None => {
            warnings.push(VOLUME_UNAVAILABLE_MESSAGE.to_string());
            None
        }
    };
    if !warnings.is_empty() {
        debug!(?warnings, "partial data");
    }

    Outcome::Loaded(Report {
        columns: series.column_labels(),
        tail: series.tail(display.tail_rows).to_vec(),
        close_chart,
        period_return,
        indicators,
        warnings,
    })
}
