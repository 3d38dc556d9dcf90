use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use snafu::OptionExt;
use tracing::debug;

use crate::{
    models::{
        price_series::CANONICAL_FIELDS,
        raw_table::{Columns, RawTable},
    },
    providers::{InternalSnafu, ProviderError},
};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

impl ChartError {
    /// Yahoo reports unknown or delisted symbols and empty ranges this way.
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }

    pub fn message(&self) -> String {
        match &self.description {
            Some(d) => format!("{}: {}", self.code, d),
            None => self.code.clone(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub exchange_timezone_name: Option<String>,
    #[serde(default)]
    pub gmtoffset: i32,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartMeta {
    /// Calendar date of a bar timestamp on the exchange's wall clock.
    fn trading_date(&self, ts: i64) -> Result<NaiveDate, ProviderError> {
        let instant: DateTime<Utc> =
            DateTime::from_timestamp(ts, 0).context(InternalSnafu {
                message: format!("timestamp out of range: {ts}"),
            })?;
        if let Some(tz) = self
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
        {
            return Ok(instant.with_timezone(&tz).date_naive());
        }
        let offset = FixedOffset::east_opt(self.gmtoffset).context(InternalSnafu {
            message: format!("invalid gmtoffset: {}", self.gmtoffset),
        })?;
        Ok(instant.with_timezone(&offset).date_naive())
    }
}

impl ChartResult {
    /// Converts the response into a two-level `(field, symbol)` table.
    ///
    /// All six canonical fields are emitted in canonical order; an indicator the
    /// response lacks becomes an all-missing column so positions never shift.
    /// Arrays shorter than the timestamp list are padded with missing values.
    pub fn into_raw_table(self) -> Result<RawTable, ProviderError> {
        let symbol = self.meta.symbol.clone();
        let columns = Columns::TwoLevel(
            CANONICAL_FIELDS
                .iter()
                .map(|f| (f.label().to_string(), symbol.clone()))
                .collect(),
        );

        if self.timestamp.is_empty() {
            debug!(%symbol, "chart result has no timestamps");
            return Ok(RawTable::empty(columns));
        }

        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = self
            .indicators
            .adjclose
            .into_iter()
            .next()
            .unwrap_or_default()
            .adjclose;
        let series = [
            &quote.open,
            &quote.high,
            &quote.low,
            &quote.close,
            &adjclose,
            &quote.volume,
        ];

        let mut index = Vec::with_capacity(self.timestamp.len());
        let mut rows = Vec::with_capacity(self.timestamp.len());
        for (i, ts) in self.timestamp.iter().enumerate() {
            index.push(self.meta.trading_date(*ts)?);
            rows.push(series.iter().map(|s| s.get(i).copied().flatten()).collect());
        }

        RawTable::new(index, columns, rows).map_err(|e| {
            InternalSnafu {
                message: e.to_string(),
            }
            .build()
        })
    }
}
