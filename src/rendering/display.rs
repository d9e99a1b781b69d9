//! # Display Management
//!
//! Board, HUD, inventory and message rendering with macroquad. The display
//! only reads the session; it never changes core state.

use crate::game::{Category, Facing, GameSession, RoundStatus, Tile, TileKind};
use crate::{ClassId, GameConfig, GameEvent};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Board origin on screen
    pub board_x: f32,
    pub board_y: f32,
    /// Board size in pixels
    pub board_width: f32,
    pub board_height: f32,
    /// Right-hand panel width in pixels
    pub panel_width: f32,
    /// Height of the inventory row in pixels
    pub inventory_height: f32,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl MacroquadDisplay {
    /// Creates a display sized for the configured board.
    pub fn new(config: &GameConfig) -> Self {
        let tile = config.tile_size as f32;
        Self {
            board_x: 0.0,
            board_y: 0.0,
            board_width: config.board_width as f32 * tile,
            board_height: config.board_height as f32 * tile,
            panel_width: 260.0,
            inventory_height: tile,
            messages: Vec::new(),
            max_messages: 100,
        }
    }

    /// Window size that fits the board, the panel and the message area.
    pub fn window_size(config: &GameConfig) -> (i32, i32) {
        let display = Self::new(config);
        let width = display.board_width + display.panel_width;
        let height = display.board_height + display.inventory_height + 80.0;
        (width as i32, height as i32)
    }

    /// Renders the complete game screen.
    pub fn render(&self, session: &GameSession) {
        clear_background(BLACK);

        self.render_board(session);
        self.render_inventory(session);
        self.render_hud(session);
        self.render_messages();
        self.render_overlay(session);
    }

    /// Records the message of every event that has one.
    pub fn push_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(message) = event.message() {
                self.add_message(message);
            }
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    fn render_board(&self, session: &GameSession) {
        let world = &session.world;
        let portal_active = session.round.portal_active();

        for category in Category::DRAW_ORDER {
            match category {
                Category::Actor => {
                    let rect = world.actor.rect;
                    self.fill_clipped(rect.x, rect.y, rect.w, rect.h, YELLOW);
                    let eye_x = match world.actor.facing {
                        Facing::Left => rect.x + rect.w / 5,
                        Facing::Right => rect.x + rect.w * 3 / 5,
                    };
                    self.fill_clipped(eye_x, rect.y + rect.h / 4, rect.w / 5, rect.h / 5, BLACK);
                }
                Category::Hazard => {
                    for hazard in &world.hazards {
                        let rect = hazard.rect;
                        self.fill_clipped(rect.x + 6, rect.y + 6, rect.w - 12, rect.h - 12, RED);
                    }
                }
                _ => {
                    for tile in world.layer(category) {
                        let rect = tile.rect;
                        let inset = tile_inset(tile);
                        self.fill_clipped(
                            rect.x + inset,
                            rect.y + inset,
                            rect.w - inset * 2,
                            rect.h - inset * 2,
                            tile_color(tile, portal_active),
                        );
                    }
                }
            }
        }

        draw_rectangle_lines(
            self.board_x,
            self.board_y,
            self.board_width,
            self.board_height,
            2.0,
            DARKGRAY,
        );
    }

    /// Draws the part of a rectangle that falls inside the board.
    fn fill_clipped(&self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let left = (x as f32).max(0.0);
        let top = (y as f32).max(0.0);
        let right = ((x + w) as f32).min(self.board_width);
        let bottom = ((y + h) as f32).min(self.board_height);
        if right <= left || bottom <= top {
            return;
        }
        draw_rectangle(
            self.board_x + left,
            self.board_y + top,
            right - left,
            bottom - top,
            color,
        );
    }

    fn render_inventory(&self, session: &GameSession) {
        let y = self.board_y + self.board_height;
        let slot = self.inventory_height;
        let inventory = &session.inventory;

        for index in 0..inventory.capacity() {
            let x = self.board_x + index as f32 * slot;
            draw_rectangle_lines(x, y, slot, slot, 1.0, GRAY);
            if let Some(class) = inventory.items().get(index).and_then(Tile::class) {
                draw_rectangle(x + 10.0, y + 10.0, slot - 20.0, slot - 20.0, class_color(class));
            }
        }
    }

    fn render_hud(&self, session: &GameSession) {
        let panel_x = self.board_x + self.board_width + 16.0;
        let mut line_y = 30.0;
        let line_height = 24.0;

        draw_text("LEVEL MOVER", panel_x, line_y, 28.0, WHITE);
        line_y += line_height * 2.0;

        draw_text(
            &format!("Level: {}", session.level_id()),
            panel_x,
            line_y,
            22.0,
            WHITE,
        );
        line_y += line_height;

        let time_color = if session.round.time_left <= 10 {
            RED
        } else {
            WHITE
        };
        draw_text(
            &format!("Time: {}", session.round.time_left),
            panel_x,
            line_y,
            22.0,
            time_color,
        );
        line_y += line_height;

        draw_text(
            &format!("Stars left: {}", session.round.collectibles_left),
            panel_x,
            line_y,
            22.0,
            GOLD,
        );
        line_y += line_height;

        if let Some(best) = session
            .evaluator()
            .store()
            .get_best(session.level_id())
            .ok()
            .flatten()
        {
            draw_text(&format!("Best: {best}"), panel_x, line_y, 22.0, SKYBLUE);
        }
        line_y += line_height * 2.0;

        draw_text("Controls:", panel_x, line_y, 20.0, GREEN);
        line_y += line_height;
        for control in [
            "Arrows/WASD: Move",
            "Space/P: Pause",
            "Enter/R: Restart",
            "Esc: Quit",
        ] {
            draw_text(control, panel_x, line_y, 18.0, WHITE);
            line_y += line_height;
        }
    }

    fn render_messages(&self) {
        let message_area_y = self.board_y + self.board_height + self.inventory_height + 24.0;
        let message_count = 3;
        let line_height = 18.0;

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 18.0, WHITE);
        }
    }

    fn render_overlay(&self, session: &GameSession) {
        let (title, color) = match session.status() {
            RoundStatus::Playing if session.is_paused() => ("PAUSED", WHITE),
            RoundStatus::Playing => return,
            RoundStatus::GameOver(_) => ("GAME OVER", RED),
            RoundStatus::LevelComplete => ("LEVEL COMPLETE", GREEN),
            RoundStatus::Won => ("YOU WIN!", GOLD),
        };

        draw_rectangle(
            self.board_x,
            self.board_y,
            self.board_width,
            self.board_height,
            Color::new(0.0, 0.0, 0.0, 0.6),
        );

        let center_x = self.board_x + self.board_width / 2.0;
        let center_y = self.board_y + self.board_height / 2.0;
        let size = measure_text(title, None, 48, 1.0);
        draw_text(title, center_x - size.width / 2.0, center_y, 48.0, color);

        let mut detail_y = center_y + 36.0;
        if let Some(report) = session.last_win().filter(|_| session.round.is_terminal()) {
            let mut line = format!("Score: {}", report.score);
            if let Some(improvement) = report.improvement {
                line.push_str(&format!(" ({improvement:+})"));
            }
            let size = measure_text(&line, None, 24, 1.0);
            draw_text(&line, center_x - size.width / 2.0, detail_y, 24.0, WHITE);
            detail_y += 28.0;
        }

        if session.round.is_terminal() {
            let hint = "Press Enter to continue";
            let size = measure_text(hint, None, 20, 1.0);
            draw_text(hint, center_x - size.width / 2.0, detail_y, 20.0, LIGHTGRAY);
        }
    }
}

fn tile_inset(tile: &Tile) -> i32 {
    match tile.kind {
        TileKind::Key { .. } | TileKind::Collectible => 18,
        TileKind::Pushable | TileKind::Portal => 4,
        _ => 0,
    }
}

fn tile_color(tile: &Tile, portal_active: bool) -> Color {
    match tile.kind {
        TileKind::Wall => match tile.glyph {
            'Z' => BROWN,
            'C' => GRAY,
            _ => DARKGRAY,
        },
        TileKind::Floor => match tile.glyph {
            '1' => Color::new(0.30, 0.35, 0.30, 1.0),
            '2' => Color::new(0.35, 0.30, 0.30, 1.0),
            '3' => Color::new(0.30, 0.30, 0.35, 1.0),
            '4' => Color::new(0.35, 0.35, 0.30, 1.0),
            _ => Color::new(0.25, 0.25, 0.25, 1.0),
        },
        TileKind::Liquid => BLUE,
        TileKind::Pushable => BEIGE,
        TileKind::Collectible => GOLD,
        TileKind::Key { class } => class_color(class),
        TileKind::Door { class, .. } => {
            let color = class_color(class);
            Color::new(color.r * 0.6, color.g * 0.6, color.b * 0.6, 1.0)
        }
        TileKind::Portal => {
            if portal_active {
                VIOLET
            } else {
                Color::new(0.3, 0.2, 0.35, 1.0)
            }
        }
    }
}

fn class_color(class: ClassId) -> Color {
    match class.0 {
        0 => RED,
        1 => SKYBLUE,
        2 => GREEN,
        _ => YELLOW,
    }
}
