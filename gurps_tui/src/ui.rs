//! UI rendering

mod armor_view;
mod combat_view;
mod dice_view;
mod help_view;
mod weapons_view;

use crate::app::{App, Tab};
use gurps_core::analysis::SamplingProgress;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Combat => combat_view::draw(f, app, chunks[1]),
        Tab::Weapons => weapons_view::draw(f, app, chunks[1]),
        Tab::Dice => dice_view::draw(f, app, chunks[1]),
        Tab::Armor => armor_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", app.status),
            Style::default().fg(Color::Gray),
        )),
        chunks[2],
    );
    draw_keybindings(f, app, chunks[3]);
}

/// Full-screen gauge shown while a sampling run is in progress
pub fn draw_sampling_progress(f: &mut Frame, progress: SamplingProgress) {
    let area = centered(f.area(), 60, 5);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sampling 3d6 vs flat "),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .label(format!("{} / {}", progress.done, progress.total))
        .ratio(progress.fraction().clamp(0.0, 1.0));
    f.render_widget(gauge, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Combat => vec![
            ("a", "Attack"),
            ("m", "x10"),
            ("r", "Heal"),
            ("c", "Clear"),
            ("←/→", "Location"),
            ("x", "Random loc"),
            ("p", "Maneuver/range"),
            ("+/-", "ST"),
        ],
        Tab::Weapons => vec![("↑/↓", "Select"), ("Enter", "Equip"), ("+/-", "ST")],
        Tab::Dice => vec![("←/→", "Sample size"), ("Enter", "Run")],
        Tab::Armor => vec![("←/→", "Model"), ("+/-", "Damage")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{} {}", i + 1, t.name()), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" GURPS Combat Lab "),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// HP-style bar; negative values render empty
pub fn progress_bar(current: f64, max: f64, width: usize) -> String {
    let percent = if max > 0.0 {
        (current / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (percent * width as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn stat_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:18}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ──", title),
        Style::default().fg(Color::Cyan),
    ))
}
