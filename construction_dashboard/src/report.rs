//! Plain-text formatting shared by the `show` command and the terminal UI.

use crate::{
    config::DisplayConfig,
    dashboard::{DashboardView, Indicators, Outcome, Report},
    models::{
        period::Period,
        price_series::{DATE_COLUMN, Field, PriceRow},
    },
};

/// Formats one table cell. Prices get 2 decimals, volume none, missing is `-`.
pub fn format_cell(field: Field, value: Option<f64>) -> String {
    match (field, value) {
        (_, None) => "-".to_string(),
        (Field::Volume, Some(v)) => format!("{v:.0}"),
        (_, Some(v)) => format!("{v:.2}"),
    }
}

/// Cells of one row in `columns` order; `columns` includes the leading date label.
pub fn row_cells(row: &PriceRow, columns: &[&str]) -> Vec<String> {
    columns
        .iter()
        .map(|label| {
            if *label == DATE_COLUMN {
                row.date.to_string()
            } else {
                Field::from_label(label)
                    .map(|f| format_cell(f, row.get(f)))
                    .unwrap_or_default()
            }
        })
        .collect()
}

pub fn return_line(period: Period, report: &Report) -> Option<String> {
    report
        .formatted_return()
        .map(|r| format!("Period return ({period}): {r}"))
}

pub fn indicator_lines(indicators: &Indicators, currency_symbol: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "- Average trading volume: {:.2}",
        indicators.average_volume
    )];
    if let Some(close) = indicators.last_close {
        lines.push(format!("- Last closing price: {currency_symbol} {close:.2}"));
    }
    lines
}

fn table_lines(report: &Report) -> Vec<String> {
    let header: Vec<String> = report.columns.iter().map(|c| c.to_string()).collect();
    let grid: Vec<Vec<String>> = std::iter::once(header)
        .chain(report.tail.iter().map(|r| row_cells(r, &report.columns)))
        .collect();
    let widths: Vec<usize> = (0..report.columns.len())
        .map(|i| grid.iter().map(|row| row[i].len()).max().unwrap_or(0))
        .collect();

    grid.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    if i == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Renders a whole view as text, ending with a newline.
pub fn render_text(view: &DashboardView, display: &DisplayConfig) -> String {
    let mut out = vec![view.heading.clone(), "=".repeat(view.heading.chars().count())];

    match &view.outcome {
        Outcome::NoData { message } | Outcome::Failed { message } => {
            out.push(format!("error: {message}"));
        }
        Outcome::Loaded(report) => {
            out.push(String::new());
            out.extend(table_lines(report));
            out.push(String::new());
            out.extend(return_line(view.selection.period, report));
            out.extend(report.warnings.iter().map(|w| format!("warning: {w}")));
            if let Some(indicators) = &report.indicators {
                out.push(String::new());
                out.push("Indicators:".to_string());
                out.extend(indicator_lines(indicators, &display.currency_symbol));
            }
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}
