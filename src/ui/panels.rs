use crate::character::PlayerClass;
use crate::core::snapshot::{CombatView, FighterView, HudView, ResultReport, SessionSnapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

fn health_ratio(health: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (health as f64 / max as f64).clamp(0.0, 1.0)
    }
}

fn health_color(ratio: f64) -> Color {
    if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Draws the character panel: health, rank, attributes and run time
pub fn draw_hud(frame: &mut Frame, area: Rect, hud: &HudView) {
    let block = Block::default().borders(Borders::ALL).title(" Character ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Health gauge
            Constraint::Min(0),    // Details
        ])
        .split(inner);

    let ratio = health_ratio(hud.health, hud.max_health);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(health_color(ratio)))
        .ratio(ratio)
        .label(format!("HP {}/{}", hud.health, hud.max_health));
    frame.render_widget(gauge, chunks[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} - Rank {}", hud.class_name, hud.rank),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("XP {}/{}", hud.experience, hud.experience_needed),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(format!("Kills {}", hud.kills)),
        Line::from(format!("Time  {}", hud.elapsed)),
        Line::from(""),
        Line::from(format!("VIT {:>3}", hud.stats.vitality)),
        Line::from(format!("INT {:>3}", hud.stats.intelligence)),
        Line::from(format!("DEX {:>3}", hud.stats.dexterity)),
    ];
    if hud.attribute_points > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} points: V/I/X to spend", hud.attribute_points),
            Style::default().fg(Color::LightMagenta),
        )));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

/// Draws the equipment and inventory lists with their menu slot numbers
pub fn draw_inventory(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let mut lines = Vec::new();
    for (index, (category, item)) in snapshot.equipment.iter().enumerate() {
        lines.push(item_line(index + 1, category.name(), item.as_deref()));
    }
    lines.push(Line::from(""));
    for (index, item) in snapshot.inventory.iter().enumerate() {
        lines.push(item_line(index + 1, "Bag", item.as_deref()));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Gear U/R 1-5, Bag E/T 1-6 "),
    );
    frame.render_widget(panel, area);
}

fn item_line(slot: usize, label: &str, item: Option<&str>) -> Line<'static> {
    let (text, style) = match item {
        Some(name) => (name.to_string(), Style::default().fg(Color::White)),
        None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![
        Span::styled(format!("{:>2} ", slot), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:<7}", label)),
        Span::styled(text, style),
    ])
}

fn fighter_lines(fighter: &FighterView) -> Vec<Line<'static>> {
    let ratio = health_ratio(fighter.health, fighter.max_health);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} (rank {})", fighter.name, fighter.rank),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("HP {}/{}", fighter.health, fighter.max_health),
            Style::default().fg(health_color(ratio)),
        )),
    ];
    if fighter.shield > 0 {
        lines.push(Line::from(Span::styled(
            format!("Shield {}", fighter.shield),
            Style::default().fg(Color::LightBlue),
        )));
    }
    if fighter.stunned > 0 {
        lines.push(Line::from(Span::styled(
            "Stunned",
            Style::default().fg(Color::Magenta),
        )));
    }
    lines
}

/// Draws both combatants side by side and the player's ability bar
pub fn draw_combat(frame: &mut Frame, area: Rect, combat: &CombatView) {
    let title = if combat.boss {
        " Boss Fight "
    } else {
        " Combat "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    frame.render_widget(Paragraph::new(fighter_lines(&combat.player)), columns[0]);
    frame.render_widget(
        Paragraph::new(fighter_lines(&combat.creature)).alignment(Alignment::Right),
        columns[1],
    );

    let spans: Vec<Span> = combat
        .abilities
        .iter()
        .enumerate()
        .map(|(slot, ability)| {
            if ability.cooldown > 0 {
                Span::styled(
                    format!(" [{}] {} ({}) ", slot + 1, ability.name, ability.cooldown),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::styled(
                    format!(" [{}] {} ", slot + 1, ability.name),
                    Style::default().fg(Color::Yellow),
                )
            }
        })
        .collect();
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).title(format!(
            " Exchange {} ",
            combat.exchanges
        )));
    frame.render_widget(bar, rows[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn draw_title(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "TILEQUEST",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[N] New game"),
        Line::from("[Q] Quit"),
    ];
    let popup = centered(area, 30, 6);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

pub fn draw_class_menu(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("Choose your class"), Line::from("")];
    for class in PlayerClass::all() {
        let key = &class.name()[..1];
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
            Span::raw(class.name()),
        ]));
    }
    let popup = centered(area, 30, 7);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Classes ")),
        popup,
    );
}

pub fn draw_paused(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 24, 3);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new("Paused - [P] resume")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

pub fn draw_result(frame: &mut Frame, area: Rect, report: &ResultReport) {
    let (headline, color) = if report.victory {
        ("The warlord has fallen!", Color::Green)
    } else {
        ("You have been defeated", Color::Red)
    };
    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("{} reached rank {}", report.class_name, report.rank)),
        Line::from(format!("Creatures slain: {}", report.kills)),
        Line::from(format!("Time: {}", report.elapsed)),
        Line::from(""),
        Line::from("[Q] Quit"),
    ];
    let popup = centered(area, 36, 9);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Game Over ")),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_ratio_handles_zero_max() {
        assert_eq!(health_ratio(5, 0), 0.0);
        assert_eq!(health_ratio(5, 10), 0.5);
        assert_eq!(health_ratio(20, 10), 1.0);
    }

    #[test]
    fn test_health_color_thresholds() {
        assert_eq!(health_color(0.9), Color::Green);
        assert_eq!(health_color(0.4), Color::Yellow);
        assert_eq!(health_color(0.1), Color::Red);
    }

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
