//! 3d6 vs flat sampling view

use super::{section, stat_line};
use crate::app::{App, SAMPLE_SIZES};
use gurps_core::analysis::HistogramRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(44)])
        .split(area);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(chunks[1]);

    draw_summary(f, app, side[0]);

    match &app.sampling {
        Some(run) => {
            draw_histogram(f, " 3d6 (observed %) ", &run.bell_rows, Color::Cyan, charts[0]);
            draw_histogram(f, " Flat 3-18 (observed %) ", &run.flat_rows, Color::Magenta, charts[1]);
            draw_comparison(f, &run.bell_rows, &run.flat_rows, side[1]);
        }
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Press Enter to sample",
                Style::default().fg(Color::DarkGray),
            )))
            .block(Block::default().borders(Borders::ALL).title(" Histograms "));
            f.render_widget(hint, chunks[0]);
        }
    }
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let sizes: Vec<Span> = SAMPLE_SIZES
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let style = if i == app.sample_size {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", n), style)
        })
        .collect();

    let mut lines = vec![Line::from(sizes), Line::from("")];
    if let Some(run) = &app.sampling {
        let (bell_extremes, flat_extremes) = run.comparison.extremes();
        let (bell_middle, flat_middle) = run.comparison.middle();
        lines.push(section("3d6 / flat"));
        lines.push(stat_line(
            "Samples",
            run.comparison.bell.samples().to_string(),
        ));
        lines.push(stat_line(
            "3-4 or 17-18",
            format!("{:.2}% / {:.2}%", bell_extremes, flat_extremes),
        ));
        lines.push(stat_line(
            "10-11",
            format!("{:.2}% / {:.2}%", bell_middle, flat_middle),
        ));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Sample size "));
    f.render_widget(paragraph, area);
}

fn draw_histogram(f: &mut Frame, title: &str, rows: &[HistogramRow], color: Color, area: Rect) {
    let labels: Vec<String> = rows.iter().map(|r| r.value.to_string()).collect();
    // Tenths of a percent so small buckets still show
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(rows)
        .map(|(label, row)| (label.as_str(), (row.percentage * 10.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .data(bars.as_slice())
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    f.render_widget(chart, area);
}

fn draw_comparison(f: &mut Frame, bell: &[HistogramRow], flat: &[HistogramRow], area: Rect) {
    let header = Row::new(vec!["Roll", "3d6", "exact", "flat", "exact"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = bell
        .iter()
        .zip(flat)
        .map(|(b, fl)| {
            Row::new(vec![
                b.value.to_string(),
                format!("{:.2}", b.percentage),
                format!("{:.2}", b.theoretical),
                format!("{:.2}", fl.percentage),
                format!("{:.2}", fl.theoretical),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Observed vs exact (%) "));
    f.render_widget(table, area);
}
