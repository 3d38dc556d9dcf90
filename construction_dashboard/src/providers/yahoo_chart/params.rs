use serde::Serialize;

use crate::models::selection::Selection;

/// Bar interval. The dashboard only ever asks for daily bars.
#[derive(Clone, Copy, Debug, Serialize, Default, PartialEq, Eq)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
}

/// Query string of a chart request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartParams {
    /// Lookback window, passed through verbatim from the selected period.
    pub range: &'static str,
    pub interval: Interval,
    pub include_adjusted_close: bool,
}

pub fn construct_params(selection: &Selection) -> ChartParams {
    ChartParams {
        range: selection.period.as_str(),
        interval: Interval::OneDay,
        include_adjusted_close: true,
    }
}

/// `{base_url}/{symbol}`, tolerating a trailing slash on the base.
pub fn chart_url(base_url: &str, symbol: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), symbol)
}
