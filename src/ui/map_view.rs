//! Tile map viewport that follows the player.

use crate::core::constants::TILE_SIZE;
use crate::core::snapshot::{SpriteKind, SpriteView};
use crate::level::{Tile, TileGrid};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Terminal columns per tile; cells are roughly twice as tall as wide.
const CELL_WIDTH: u16 = 2;

fn tile_display(tile: Tile) -> (&'static str, Style) {
    match tile {
        Tile::Void => ("  ", Style::default().bg(Color::Black)),
        Tile::Stone => ("▓▓", Style::default().fg(Color::DarkGray)),
        Tile::Grass => ("  ", Style::default().bg(Color::Rgb(40, 110, 40))),
        Tile::Water => ("~~", Style::default().fg(Color::Cyan).bg(Color::Blue)),
        Tile::Sand => ("  ", Style::default().bg(Color::Rgb(190, 170, 100))),
        Tile::Floor => ("  ", Style::default().bg(Color::Rgb(60, 50, 40))),
        Tile::Wall => ("██", Style::default().fg(Color::Gray)),
        Tile::Start => ("<<", Style::default().fg(Color::Magenta).bg(Color::Rgb(60, 50, 40))),
    }
}

fn sprite_display(sprite: &SpriteView) -> (&'static str, Style) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match sprite.kind {
        SpriteKind::Player => {
            let color = sprite
                .palette
                .rgb(2)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(Color::White);
            let glyph = if sprite.swimming { "@~" } else { "@ " };
            (glyph, bold.fg(color))
        }
        SpriteKind::Creature { boss: true } => ("W!", bold.fg(Color::LightRed)),
        SpriteKind::Creature { boss: false } => {
            let glyph = if sprite.walk_frame == 0 { "o " } else { " o" };
            (glyph, bold.fg(Color::Red))
        }
        SpriteKind::HealthPad { charged: true } => ("++", bold.fg(Color::LightGreen)),
        SpriteKind::HealthPad { charged: false } => ("..", Style::default().fg(Color::Green)),
        SpriteKind::Loot(_) => ("$$", bold.fg(Color::Yellow)),
    }
}

/// First visible tile on one axis, keeping `focus` centred where the map allows.
fn viewport_origin(focus: i32, view: i32, size: i32) -> i32 {
    (focus - view / 2).clamp(0, (size - view).max(0))
}

pub struct MapWidget<'a> {
    grid: &'a TileGrid,
    sprites: &'a [SpriteView],
}

impl<'a> MapWidget<'a> {
    pub fn new(grid: &'a TileGrid, sprites: &'a [SpriteView]) -> Self {
        Self { grid, sprites }
    }

    fn origin(&self, area: Rect) -> (i32, i32) {
        let view_w = (area.width / CELL_WIDTH) as i32;
        let view_h = area.height as i32;
        let (px, py) = self
            .sprites
            .iter()
            .find(|s| s.kind == SpriteKind::Player)
            .map(|s| (s.x / TILE_SIZE, s.y / TILE_SIZE))
            .unwrap_or((0, 0));
        (
            viewport_origin(px, view_w, self.grid.width() as i32),
            viewport_origin(py, view_h, self.grid.height() as i32),
        )
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (ox, oy) = self.origin(area);
        let view_w = (area.width / CELL_WIDTH) as i32;
        let view_h = area.height as i32;

        for row in 0..view_h {
            for col in 0..view_w {
                let (symbol, style) = tile_display(self.grid.get(ox + col, oy + row));
                let x = area.x + col as u16 * CELL_WIDTH;
                let y = area.y + row as u16;
                buf.set_string(x, y, symbol, style);
            }
        }

        // Sprites arrive in draw order with the player last
        for sprite in self.sprites {
            let col = sprite.x / TILE_SIZE - ox;
            let row = sprite.y / TILE_SIZE - oy;
            if col < 0 || row < 0 || col >= view_w || row >= view_h {
                continue;
            }
            let (symbol, style) = sprite_display(sprite);
            buf.set_string(
                area.x + col as u16 * CELL_WIDTH,
                area.y + row as u16,
                symbol,
                style,
            );
        }
    }
}
