use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, StatusCode, header};
use snafu::ResultExt;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ProviderConfig,
    models::{
        raw_table::{Columns, RawTable},
        selection::Selection,
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidUserAgentSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo_chart::{
            params::{chart_url, construct_params},
            response::ChartEnvelope,
        },
    },
};

/// Daily history from the Yahoo Finance chart API.
///
/// Requests pass through a client-side throttle so that flicking through the
/// pickers cannot trip the service's rate limit. The throttle only delays; a
/// failed request is reported, never retried.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a new provider from the `[provider]` config section.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).context(InvalidUserAgentSnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context(ClientBuildSnafu)?;

        let per_minute =
            NonZeroU32::new(config.requests_per_minute).unwrap_or(nonzero!(30u32));

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    #[instrument(skip(self), fields(symbol = selection.symbol(), period = %selection.period))]
    async fn fetch_history(&self, selection: Selection) -> Result<RawTable, ProviderError> {
        self.limiter.until_ready().await;

        let url = chart_url(&self.base_url, selection.symbol());
        let params = construct_params(&selection);
        debug!(%url, "requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context(ReqwestSnafu)?;
        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        let table = interpret(status, &body)?;
        info!(rows = table.len(), "fetched history");
        Ok(table)
    }
}

/// Turns a chart response into a table.
///
/// A "Not Found" chart error and a result-less success are empty tables; any
/// other error payload or failing status is an [`ProviderError::Api`].
fn interpret(status: StatusCode, body: &str) -> Result<RawTable, ProviderError> {
    // Error statuses usually still carry a chart envelope explaining themselves.
    let envelope = match serde_json::from_str::<ChartEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return ApiSnafu {
                message: format!("HTTP {status}"),
            }
            .fail();
        }
        Err(source) => return Err(source).context(DecodeSnafu),
    };

    if let Some(error) = envelope.chart.error {
        if error.is_not_found() {
            info!(message = %error.message(), "provider has no data for request");
            return Ok(RawTable::empty(Columns::Flat(Vec::new())));
        }
        warn!(message = %error.message(), "provider returned an error");
        return ApiSnafu {
            message: error.message(),
        }
        .fail();
    }
    if !status.is_success() {
        return ApiSnafu {
            message: format!("HTTP {status}"),
        }
        .fail();
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        info!("provider returned no chart result");
        return Ok(RawTable::empty(Columns::Flat(Vec::new())));
    };
    result.into_raw_table()
}
