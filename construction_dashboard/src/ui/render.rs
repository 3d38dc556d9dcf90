//! Frame layout: sidebar with the pickers on the left, results on the right.

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
        Row, Table, Wrap,
    },
};

use crate::{
    config::DisplayConfig,
    dashboard::{Outcome, Report},
    models::{company::Company, period::Period, selection::Selection},
    report::{indicator_lines, return_line, row_cells},
    ui::app::{App, Focus},
};

const TITLE: &str = "Brazilian Homebuilder Stock Analysis";
const WELCOME: &str = "Welcome to the treasury desk. The stock market is where investors buy \
and sell stakes in companies; in construction, the shares of large Brazilian homebuilders \
track the real-estate cycle and investor confidence. Pick a company and a period to explore \
its price history, closing-price trend, return and trading volume.";
const FOOTER: &str = "Built with ratatui and the Yahoo Finance API";
const HELP: &str = "↑/↓ select · Tab switch list · q quit";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {title} "), bold()))
        .borders(Borders::ALL)
}

pub fn draw(frame: &mut Frame, app: &App, display: &DisplayConfig) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(0)]).areas(frame.area());
    draw_sidebar(frame, sidebar, app);
    draw_main(frame, main, app, display);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let [welcome, companies, periods, help] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(Company::ALL.len() as u16 + 2),
        Constraint::Length(Period::ALL.len() as u16 + 2),
        Constraint::Length(3),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(WELCOME).wrap(Wrap { trim: true }).block(titled("Treasury desk")),
        welcome,
    );

    let selection = app.selection();
    let company_items: Vec<ListItem> = Company::ALL
        .iter()
        .map(|c| ListItem::new(format!("{:<11}{}", c.name(), c.symbol())))
        .collect();
    draw_picker(
        frame,
        companies,
        "Company",
        company_items,
        selection.company.position(),
        app.focus() == Focus::Company,
    );

    let period_items: Vec<ListItem> = Period::ALL.iter().map(|p| ListItem::new(p.as_str())).collect();
    draw_picker(
        frame,
        periods,
        "Period",
        period_items,
        selection.period.position(),
        app.focus() == Focus::Period,
    );

    frame.render_widget(
        Paragraph::new(HELP).block(Block::default().borders(Borders::ALL)),
        help,
    );
}

fn draw_picker(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    selected: usize,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(titled(title).border_style(border))
        .highlight_style(bold().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_main(frame: &mut Frame, area: Rect, app: &App, display: &DisplayConfig) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let heading = match app.view() {
        Some(view) => view.heading.clone(),
        None => app.selection().heading(),
    };
    let mut header_lines = vec![Line::from(Span::styled(TITLE, bold())), Line::from(heading)];
    if app.is_loading() {
        header_lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(header_lines).block(Block::default().borders(Borders::BOTTOM)),
        header,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER, Style::default().fg(Color::DarkGray))),
        footer,
    );

    let Some(view) = app.view() else {
        return;
    };
    match &view.outcome {
        Outcome::NoData { message } | Outcome::Failed { message } => {
            frame.render_widget(
                Paragraph::new(Span::styled(message.as_str(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true })
                    .block(titled("Error")),
                body,
            );
        }
        Outcome::Loaded(report) => draw_report(frame, body, view.selection, report, display),
    }
}

fn draw_report(
    frame: &mut Frame,
    area: Rect,
    selection: Selection,
    report: &Report,
    display: &DisplayConfig,
) {
    let [table_area, chart_area, metrics_area] = Layout::vertical([
        Constraint::Length(report.tail.len() as u16 + 3),
        Constraint::Min(8),
        Constraint::Length(7),
    ])
    .areas(area);

    let header = Row::new(report.columns.iter().copied()).style(bold());
    let rows: Vec<Row> = report
        .tail
        .iter()
        .map(|r| Row::new(row_cells(r, &report.columns)))
        .collect();
    let widths: Vec<Constraint> = report
        .columns
        .iter()
        .enumerate()
        .map(|(i, _)| Constraint::Length(if i == 0 { 10 } else { 12 }))
        .collect();
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(titled("Latest sessions")),
        table_area,
    );

    match report.close_chart.as_deref() {
        Some(points) => draw_chart(frame, chart_area, selection, points),
        None => frame.render_widget(titled("Price history"), chart_area),
    }

    let mut lines: Vec<Line> = Vec::new();
    if let Some(line) = return_line(selection.period, report) {
        lines.push(Line::from(Span::styled(line, bold())));
    }
    for warning in &report.warnings {
        lines.push(Line::from(Span::styled(
            warning.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(indicators) = &report.indicators {
        lines.push(Line::from("Indicators:"));
        lines.extend(
            indicator_lines(indicators, &display.currency_symbol)
                .into_iter()
                .map(Line::from),
        );
    }
    frame.render_widget(Paragraph::new(lines).block(titled("Metrics")), metrics_area);
}

fn draw_chart(frame: &mut Frame, area: Rect, selection: Selection, points: &[(NaiveDate, f64)]) {
    let title = format!("Price history - {}", selection.company.name());
    let Some((x_bounds, y_bounds)) = chart_bounds(points) else {
        frame.render_widget(titled(&title), area);
        return;
    };
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, close))| (i as f64, *close))
        .collect();

    let first = points.first().map(|(d, _)| d.to_string()).unwrap_or_default();
    let last = points.last().map(|(d, _)| d.to_string()).unwrap_or_default();

    let dataset = Dataset::default()
        .name("Close")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(titled(&title))
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds(x_bounds)
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .title("Close")
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(format!("{:.2}", y_bounds[0])),
                    Span::raw(format!("{:.2}", y_bounds[1])),
                ]),
        );
    frame.render_widget(chart, area);
}

/// X spans point indices, Y spans closes padded by 5% (or by 1.0 when flat).
pub(crate) fn chart_bounds(points: &[(NaiveDate, f64)]) -> Option<([f64; 2], [f64; 2])> {
    if points.is_empty() {
        return None;
    }
    let (mut min, mut max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(*v), hi.max(*v))
        });
    let pad = (max - min) * 0.05;
    if pad > 0.0 {
        min -= pad;
        max += pad;
    } else {
        min -= 1.0;
        max += 1.0;
    }
    let x_max = (points.len() - 1).max(1) as f64;
    Some(([0.0, x_max], [min, max]))
}
