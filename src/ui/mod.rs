//! Terminal front end: draws a session snapshot with ratatui.

mod map_view;
mod panels;

pub use map_view::MapWidget;

use crate::combat::Side;
use crate::core::session::SessionMode;
use crate::core::snapshot::SessionSnapshot;
use crate::core::tick::TickEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, snapshot: &SessionSnapshot, messages: &[String]) {
    let size = frame.size();

    match snapshot.mode {
        SessionMode::Start => {
            panels::draw_title(frame, size);
            return;
        }
        SessionMode::Classes => {
            panels::draw_class_menu(frame, size);
            return;
        }
        _ => {}
    }

    // Split horizontally: map and log (left) | character and gear (right)
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(size);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Map or combat
            Constraint::Length(6), // Message log
        ])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12), // Character
            Constraint::Min(0),     // Gear
        ])
        .split(columns[1]);

    match (&snapshot.combat, snapshot.mode) {
        (Some(combat), SessionMode::Combat) => panels::draw_combat(frame, left[0], combat),
        _ => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", snapshot.level_name));
            let inner = block.inner(left[0]);
            frame.render_widget(block, left[0]);
            if let Some(grid) = snapshot.grid {
                frame.render_widget(MapWidget::new(grid, &snapshot.sprites), inner);
            }
        }
    }

    draw_log(frame, left[1], messages);
    panels::draw_hud(frame, right[0], &snapshot.hud);
    panels::draw_inventory(frame, right[1], snapshot);

    if snapshot.mode == SessionMode::Paused {
        panels::draw_paused(frame, size);
    }
    if let Some(report) = &snapshot.report {
        panels::draw_result(frame, size, report);
    }
}

fn draw_log(frame: &mut Frame, area: ratatui::layout::Rect, messages: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = messages
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|m| Line::from(m.as_str()))
        .collect();
    let log = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Creature => "The enemy",
    }
}

/// One log line for an event, `None` for events the log ignores.
pub fn describe_event(event: &TickEvent) -> Option<String> {
    let text = match event {
        TickEvent::CombatStarted { creature, boss } => {
            if *boss {
                format!("{} blocks the way!", creature)
            } else {
                format!("A {} attacks!", creature)
            }
        }
        TickEvent::AbilityUsed {
            side, name, amount, ..
        } => format!("{} used {} ({})", side_name(*side), name, amount),
        TickEvent::ActionLost { side } => format!("{} lost a turn to the stun", side_name(*side)),
        TickEvent::DamageOverTime { target, damage } => {
            format!("{} took {} lingering damage", side_name(*target), damage)
        }
        TickEvent::CombatEnded { winner: Side::Player } => "Victory!".to_string(),
        TickEvent::CombatEnded {
            winner: Side::Creature,
        } => "Defeat...".to_string(),
        TickEvent::LootDropped { item } => format!("Dropped: {}", item.display_name()),
        TickEvent::LootPickedUp { item, .. } => format!("Picked up {}", item.display_name()),
        TickEvent::RankUp { rank } => format!("Reached rank {}!", rank),
        TickEvent::Healed { amount } => format!("Healed {}", amount),
        TickEvent::Equipped { slot } => format!("Equipped slot {}", slot),
        TickEvent::Unequipped { category } => format!("Unequipped {}", category.name()),
        TickEvent::ItemDropped { slot } => format!("Trashed slot {}", slot),
        TickEvent::AttributeSpent { attribute } => format!("{} +1", attribute.abbrev()),
        TickEvent::ModeChanged { .. }
        | TickEvent::MusicStarted
        | TickEvent::LevelTransfer { .. }
        | TickEvent::Sound(_) => return None,
    };
    Some(text)
}
