//! Weapon analysis view

use super::{section, stat_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(chunks[1]);

    draw_table(f, app, chunks[0]);
    draw_details(f, app, side_chunks[0]);
    draw_histogram(f, app, side_chunks[1]);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Weapon", "Damage", "Type", "Dice", "Mean", "SD"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .analysis
        .iter()
        .map(|data| {
            Row::new(vec![
                Cell::from(data.name.clone()),
                Cell::from(data.damage.clone()),
                Cell::from(data.damage_type.abbreviation()),
                Cell::from(data.parsed.to_string()),
                Cell::from(format!("{:.2}", data.stats.mean)),
                Cell::from(format!("{:.2}", data.stats.std_dev)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Weapons at ST {} ", app.strength)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected_weapon));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match (app.selected_weapon(), app.analysis.get(app.selected_weapon)) {
        (Some(weapon), Some(data)) => {
            let mut lines = vec![
                Line::from(weapon.name.clone()),
                stat_line("Category", weapon.category.clone()),
                stat_line("Damage type", data.damage_type.to_string()),
                stat_line(
                    "Range",
                    format!("{} - {} (mode {})", data.min_damage(), data.max_damage(), data.mode()),
                ),
                stat_line("Expected injury", format!("{:.2}", data.expected_injury())),
                stat_line(
                    "Beats DR 4",
                    format!("{:.1}%", data.penetration_chance(4) * 100.0),
                ),
                section("Notes"),
            ];
            if !weapon.description.is_empty() {
                lines.push(Line::from(weapon.description.clone()));
            }
            lines
        }
        _ => vec![Line::from("No weapon selected")],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(paragraph, area);
}

fn draw_histogram(f: &mut Frame, app: &App, area: Rect) {
    let Some(data) = app.analysis.get(app.selected_weapon) else {
        return;
    };

    // Bar heights in tenths of a percent
    let labels: Vec<String> = data.distribution.iter().map(|p| p.value.to_string()).collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&data.distribution)
        .map(|(label, p)| (label.as_str(), (p.probability * 1000.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Damage distribution (‰) "),
        )
        .data(bars.as_slice())
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));

    f.render_widget(chart, area);
}
