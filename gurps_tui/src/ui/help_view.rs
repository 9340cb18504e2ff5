//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn rule(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    ))
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        heading("Navigation"),
        key_line("1-5", "Jump to tab (Combat/Weapons/Dice/Armor/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll the log / select a weapon"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        heading("Combat"),
        key_line("a", "One attack"),
        key_line("m", "Ten attacks in a row"),
        key_line("r / c", "Heal the target / clear the log"),
        key_line("←/h  →/l", "Aim at the previous/next hit location"),
        key_line("x", "Toggle random hit locations"),
        key_line("p", "Next maneuver (melee) or range band (ranged)"),
        key_line("+ / -", "Attacker ST (weapons tab too)"),
        Line::from(""),
        heading("Weapons / Dice / Armor"),
        key_line("Enter", "Equip the selected weapon / run sampling"),
        key_line("←/→", "Sample size / armor model"),
        key_line("+ / -", "Incoming damage on the Armor tab"),
        Line::from(""),
        heading("Rules"),
        rule("Attack roll (3d6 vs effective skill):"),
        Line::from("  3-4 always a critical hit, 3 also deals max damage"),
        Line::from("  5 is critical at skill 15+, 6 at skill 16+"),
        Line::from("  17-18 always miss"),
        Line::from(""),
        rule("Damage:"),
        Line::from("  Final = floor(floor((Damage - DR) x wound mult) x location mult)"),
        Line::from("  cut x1.5  imp x2  cr x1  pi- x0.5  pi x1  pi+ x1.5  pi++ x2"),
        Line::from(""),
        rule("Injury:"),
        Line::from("  Major wound: more than half of max HP in one hit"),
        Line::from("  Shock: -1 per HP lost (per HP/10 at 20+ HP), max -4"),
        Line::from("  0 HP or less: HT roll to stay conscious"),
        Line::from("  -1xHP to -4xHP: HT roll to survive, -5xHP: dead"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Settings: combat log keeps {} attacks, sampling redraws every {} rolls",
                app.constants.log.capacity, app.constants.sampling.chunk_size),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help & Rules "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
