//! Combat log view

use super::{progress_bar, section, stat_line};
use crate::app::App;
use gurps_core::combat::AttackMode;
use gurps_core::AttackOutcome;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(50),    // Log
            Constraint::Length(40), // Setup and last attack
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // HP bar
            Constraint::Min(0),    // Combat log
        ])
        .split(chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(chunks[1]);

    draw_status_bar(f, app, main_chunks[0]);
    draw_combat_log(f, app, main_chunks[1]);
    draw_setup(f, app, side_chunks[0]);
    draw_last_attack(f, app, side_chunks[1]);
}

fn hp_color(current: i32, max: i32) -> Color {
    if current <= 0 {
        Color::Red
    } else if current * 3 < max {
        Color::LightRed
    } else if current * 3 < max * 2 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.combat;
    let max = state.max_hp();
    let color = hp_color(state.current_hp, max);
    let bar_width = area.width.saturating_sub(4) as usize;

    let mut status = vec![
        Span::styled("Target HP: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}/{}", state.current_hp, max),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(injury) = state.results.latest().and_then(|o| o.injury.as_ref()) {
        status.push(Span::raw("  "));
        status.push(Span::styled(
            injury.description.clone(),
            Style::default().fg(color),
        ));
    }

    let lines = vec![
        Line::from(status),
        Line::from(Span::styled(
            progress_bar(state.current_hp as f64, max as f64, bar_width),
            Style::default().fg(color),
        )),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Target "));
    f.render_widget(paragraph, area);
}

fn outcome_style(outcome: &AttackOutcome) -> Style {
    if outcome.injury.as_ref().is_some_and(|i| i.is_dead) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if outcome.is_critical_miss() {
        Style::default().fg(Color::Magenta)
    } else if outcome.hit.is_critical {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if outcome.final_damage() > 0 {
        Style::default().fg(Color::Green)
    } else if outcome.is_hit() {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_combat_log(f: &mut Frame, app: &App, area: Rect) {
    let total = app.combat.results.len();
    let items: Vec<ListItem> = app
        .combat
        .results
        .iter()
        .rev()
        .enumerate()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, outcome)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<3}", total - i),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(outcome.summary(), outcome_style(outcome)),
            ]))
        })
        .collect();

    let title = format!(
        " Combat Log ({}/{}, newest first) ",
        total,
        app.combat.results.capacity()
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_setup(f: &mut Frame, app: &App, area: Rect) {
    let setup = &app.combat.setup;
    let location = if app.combat.random_location {
        "Random".to_string()
    } else {
        format!(
            "{} ({:+})",
            app.combat.target_location,
            app.combat.target_location.hit_penalty()
        )
    };

    let mut lines = vec![
        stat_line(
            "Weapon",
            app.equipped.clone().unwrap_or_else(|| "Custom".to_string()),
        ),
        stat_line("Damage", format!("{} {}", setup.base_damage, setup.damage_type.abbreviation())),
        stat_line("Skill / ST", format!("{} / {}", setup.attacker_skill, setup.attacker_strength)),
        stat_line("Target DR", setup.armor_value.to_string()),
        stat_line("Location", location),
        section("Mode"),
    ];

    match app.mode {
        AttackMode::Melee {
            maneuver, posture, ..
        } => {
            lines.push(stat_line("Maneuver", maneuver.name().to_string()));
            lines.push(stat_line("Posture", posture.name().to_string()));
        }
        AttackMode::Ranged {
            range_yards,
            half_damage_range,
            max_range,
            ..
        } => {
            lines.push(stat_line("Range", format!("{} yd", range_yards)));
            lines.push(stat_line(
                "1/2D / Max",
                format!("{} / {}", half_damage_range, max_range),
            ));
        }
    }

    let mode_total: i32 = app.mode.skill_modifiers().iter().map(|m| m.value).sum();
    lines.push(stat_line("Mode modifier", format!("{:+}", mode_total)));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Setup "));
    f.render_widget(paragraph, area);
}

fn draw_last_attack(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match app.combat.results.latest() {
        Some(outcome) => {
            let mut lines: Vec<Line> = outcome
                .description
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            if let Some(damage) = outcome.damage {
                lines.push(Line::from(""));
                lines.push(section("Damage"));
                lines.push(stat_line("Rolled", damage.rolled_damage.to_string()));
                lines.push(stat_line("After armor", damage.damage_after_armor.to_string()));
                lines.push(stat_line("Wounding", damage.multiplied_damage.to_string()));
                lines.push(stat_line("Final", damage.final_damage.to_string()));
            }
            if let Some(injury) = &outcome.injury {
                lines.push(Line::from(""));
                lines.push(section("Injury"));
                for condition in &injury.conditions {
                    lines.push(Line::from(Span::styled(
                        format!("• {}", condition),
                        Style::default().fg(Color::LightRed),
                    )));
                }
            }
            for note in &outcome.special_injuries {
                lines.push(Line::from(Span::styled(
                    note.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "No attacks yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Last Attack "));
    f.render_widget(paragraph, area);
}
