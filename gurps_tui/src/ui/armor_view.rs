//! Armor mechanics comparison view

use super::{section, stat_line};
use crate::app::{App, MAX_CHART_ARMOR};
use gurps_core::mechanics::{
    ablative, comparison_series, efficiency_metrics, find_optimal_armor, poise, reactive_armor,
    shield_barrier, zone_expected_damage, ArmorModel, ArmorPenetration, ChargeAbsorb, ZoneArmor,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

const MODEL_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Armor used by the fixed scenarios in the side panel
const SCENARIO_ARMOR: f64 = 10.0;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(46)])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(chunks[1]);

    draw_chart(f, app, chunks[0]);
    draw_efficiency(f, app, side[0]);
    draw_scenarios(f, app, side[1]);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let models = ArmorModel::all();
    let series = comparison_series(&models, app.armor_damage, 0..=MAX_CHART_ARMOR);
    let selected = app.selected_model();

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut style = Style::default().fg(MODEL_COLORS[i % MODEL_COLORS.len()]);
            if s.model == selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            Dataset::default()
                .name(s.label.clone())
                .marker(if s.model == selected {
                    symbols::Marker::Block
                } else {
                    symbols::Marker::Braille
                })
                .graph_type(GraphType::Line)
                .style(style)
                .data(&s.points)
        })
        .collect();

    let max_armor = MAX_CHART_ARMOR as f64;
    let max_damage = app.armor_damage.max(1.0);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Damage taken from a {:.0}-point hit ", app.armor_damage)),
        )
        .x_axis(
            Axis::default()
                .title("Armor")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_armor])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.0}", max_armor / 2.0),
                    format!("{:.0}", max_armor),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Damage")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_damage])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.0}", max_damage / 2.0),
                    format!("{:.0}", max_damage),
                ]),
        );

    f.render_widget(chart, area);
}

fn draw_efficiency(f: &mut Frame, app: &App, area: Rect) {
    let model = app.selected_model();
    let data = efficiency_metrics(&model, 0..=MAX_CHART_ARMOR, app.armor_damage);
    let optimal = find_optimal_armor(&data);
    let at = |armor: u32| data.iter().find(|p| p.armor == armor);

    let mut lines = vec![
        Line::from(Span::styled(
            model.name(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            model.description(),
            Style::default().fg(Color::DarkGray),
        )),
        section("Efficiency"),
        stat_line("Best value at", format!("{} armor", optimal.optimal)),
        stat_line(
            "Max efficiency",
            format!("{:.2}% / pt", optimal.max_efficiency * 100.0),
        ),
        stat_line("Diminishing at", format!("{} armor", optimal.diminishing_point)),
    ];
    for armor in [10, 25] {
        if let Some(point) = at(armor) {
            lines.push(stat_line(
                &format!("At {} armor", armor),
                format!(
                    "{:.1} dmg, {} hits to kill",
                    point.damage,
                    point
                        .hits_to_kill
                        .map_or_else(|| "-".to_string(), |h| h.to_string())
                ),
            ));
        }
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Model "));
    f.render_widget(paragraph, area);
}

fn draw_scenarios(f: &mut Frame, app: &App, area: Rect) {
    let damage = app.armor_damage;

    let ablated = ablative(5, damage, SCENARIO_ARMOR, 2.0, 0.0);
    let shield = shield_barrier(50.0, 100.0, 5, damage, 10.0);
    let reactive = reactive_armor(5, damage, 2, ChargeAbsorb::Percent { percent: 75.0 });
    let staggers = poise(60.0, damage, 10.0, 5)
        .iter()
        .filter(|h| h.staggered)
        .count();
    let zones = zone_expected_damage(
        damage,
        &[
            ZoneArmor { armor: 5.0, weight: 10.0 },
            ZoneArmor { armor: 10.0, weight: 60.0 },
            ZoneArmor { armor: 7.0, weight: 30.0 },
        ],
    );

    let mut lines = vec![
        section("Five hits"),
        stat_line(
            "Ablative DR 10",
            format!("{:.0} total", ablated.total_damage),
        ),
        stat_line(
            "Shield 50 + 100 HP",
            format!(
                "{:.0} total{}",
                shield.total_damage,
                if shield.target_down { ", down" } else { "" }
            ),
        ),
        stat_line(
            "Reactive (2 x 75%)",
            format!("{:.0} total", reactive.total_damage),
        ),
        stat_line("Poise 60", format!("{} staggers", staggers)),
        stat_line("Zoned armor", format!("{:.1} per hit", zones)),
        section("Penetration vs DR 15"),
    ];

    for mode in [
        ArmorPenetration::Flat { ap: 5.0 },
        ArmorPenetration::Percent { ap: 5.0 },
        ArmorPenetration::Divisor { divisor: 2.0 },
    ] {
        let result = mode.apply(damage, 15.0);
        lines.push(stat_line(
            mode.name(),
            format!("{:.1} dmg (DR {:.1})", result.damage, result.effective_armor),
        ));
    }

    lines.push(section("Spread (1000 trials)"));
    for (label, stats) in &app.spread {
        let text = match stats {
            Some(s) => format!("{:.1} ± {:.1}, IQR {:.0}", s.mean, s.std_dev, s.iqr),
            None => "-".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:28}", label), Style::default().fg(Color::Gray)),
            Span::styled(text, Style::default().fg(Color::White)),
        ]));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Scenarios "));
    f.render_widget(paragraph, area);
}
