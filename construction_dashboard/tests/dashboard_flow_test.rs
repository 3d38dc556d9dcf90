use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use construction_dashboard::{
    config::DisplayConfig,
    dashboard::{NO_DATA_MESSAGE, Outcome, load_view},
    models::{
        company::Company,
        period::Period,
        raw_table::{Columns, RawTable},
        selection::Selection,
    },
    providers::{DataProvider, ProviderError},
    report::render_text,
};

/// Serves canned tables per symbol and records what was asked for.
#[derive(Default)]
struct FixtureProvider {
    tables: HashMap<&'static str, RawTable>,
    requests: Mutex<Vec<Selection>>,
}

impl FixtureProvider {
    fn with(mut self, symbol: &'static str, table: RawTable) -> Self {
        self.tables.insert(symbol, table);
        self
    }
}

#[async_trait]
impl DataProvider for FixtureProvider {
    async fn fetch_history(&self, selection: Selection) -> Result<RawTable, ProviderError> {
        self.requests.lock().unwrap().push(selection);
        Ok(self
            .tables
            .get(selection.symbol())
            .cloned()
            .unwrap_or_else(|| RawTable::empty(Columns::Flat(Vec::new()))))
    }
}

fn two_level(symbol: &str, fields: &[&str], rows: Vec<Vec<Option<f64>>>) -> RawTable {
    let index = (0..rows.len() as u32)
        .map(|i| NaiveDate::from_ymd_opt(2025, 7, 1 + i).unwrap())
        .collect();
    let columns = Columns::TwoLevel(
        fields
            .iter()
            .map(|f| (f.to_string(), symbol.to_string()))
            .collect(),
    );
    RawTable::new(index, columns, rows).unwrap()
}

#[tokio::test]
async fn unknown_symbol_renders_no_data() {
    let provider = FixtureProvider::default();
    let selection = Selection::new(Company::Even, Period::FiveYears);

    let view = load_view(&provider, selection, &DisplayConfig::default()).await;

    assert_eq!(
        view.outcome,
        Outcome::NoData {
            message: NO_DATA_MESSAGE.into()
        }
    );
    assert_eq!(provider.requests.lock().unwrap().as_slice(), &[selection]);
}

#[tokio::test]
async fn close_only_table_shows_return_without_indicators() {
    let provider = FixtureProvider::default().with(
        "TEND3.SA",
        two_level(
            "TEND3.SA",
            &["Open", "High", "Low", "Close"],
            vec![
                vec![Some(11.0), Some(12.0), Some(10.5), Some(12.0)],
                vec![Some(12.0), Some(13.0), Some(11.5), Some(13.2)],
            ],
        ),
    );
    let selection = Selection::new(Company::Tenda, Period::ThreeMonths);

    let view = load_view(&provider, selection, &DisplayConfig::default()).await;
    let text = render_text(&view, &DisplayConfig::default());

    assert!(text.starts_with("Historical data for Tenda (TEND3.SA) over 3mo\n"));
    assert!(text.contains("Period return (3mo): 10.00%"));
    assert!(!text.contains("Indicators:"));
    assert!(text.contains("warning: Trading volume data unavailable for this asset or period."));
    assert!(!text.contains("Closing price data unavailable"));
}

#[tokio::test]
async fn switching_selection_refetches_for_the_new_symbol() {
    let rows = vec![vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(10.0)]];
    let fields = ["Open", "High", "Low", "Close", "Adj Close", "Volume"];
    let provider = FixtureProvider::default()
        .with("CYRE3.SA", two_level("CYRE3.SA", &fields, rows.clone()))
        .with("EZTC3.SA", two_level("EZTC3.SA", &fields, rows));
    let display = DisplayConfig {
        currency_symbol: "BRL".into(),
        ..DisplayConfig::default()
    };

    let first = Selection::default();
    let second = first.with_company(Company::Eztec).with_period(Period::SixMonths);
    let a = load_view(&provider, first, &display).await;
    let b = load_view(&provider, second, &display).await;

    assert!(a.loaded().is_some() && b.loaded().is_some());
    assert_eq!(b.heading, "Historical data for Eztec (EZTC3.SA) over 6mo");
    assert!(render_text(&b, &display).contains("- Last closing price: BRL 1.00"));
    assert_eq!(
        provider.requests.lock().unwrap().as_slice(),
        &[first, second]
    );
}

#[tokio::test]
async fn view_serializes_with_state_tag() {
    let provider = FixtureProvider::default();
    let view = load_view(&provider, Selection::default(), &DisplayConfig::default()).await;
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["outcome"]["state"], "no_data");
    assert_eq!(json["selection"]["period"], "7d");
}

#[test]
fn null_closes_from_the_chart_api_raise_the_close_warning() {
    use construction_dashboard::{
        dashboard::{CLOSE_UNAVAILABLE_MESSAGE, build_view},
        providers::yahoo_chart::response::ChartResult,
    };

    let json = r#"{
        "meta": { "symbol": "CYRE3.SA", "exchangeTimezoneName": "America/Sao_Paulo" },
        "timestamp": [1738584000, 1738670400],
        "indicators": {
            "quote": [{
                "open": [20.1, 20.5],
                "close": [null, null],
                "volume": [10, 20]
            }]
        }
    }"#;
    let result: ChartResult = serde_json::from_str(json).unwrap();
    let raw = result.into_raw_table().unwrap();

    let view = build_view(Selection::default(), Ok(raw), &DisplayConfig::default());
    let report = view.loaded().unwrap();
    assert_eq!(report.warnings, vec![CLOSE_UNAVAILABLE_MESSAGE.to_string()]);
    assert_eq!(report.close_chart, None);
    assert_eq!(report.period_return, None);
    assert_eq!(report.indicators.as_ref().map(|i| i.average_volume), Some(15.0));
}
