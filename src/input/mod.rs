//! # Input Module
//!
//! Keyboard handling for the macroquad frontend.

pub mod commands;

pub use commands::*;

use crate::Direction;
use macroquad::prelude::*;

/// Keys polled every frame, in priority order.
const KEYS: [KeyCode; 14] = [
    KeyCode::Escape,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
    KeyCode::Space,
    KeyCode::P,
    KeyCode::Enter,
    KeyCode::R,
    KeyCode::KpEnter,
];

/// Input handler for processing player commands.
///
/// Turns key presses into [`PlayerInput`]s, at most one per frame.
pub struct InputHandler {
    /// Whether WASD moves in addition to the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.wasd_enabled);
    /// ```
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Gets the input for this frame, if a mapped key was pressed.
    pub fn get_input(&self) -> Option<PlayerInput> {
        KEYS.iter()
            .filter(|&&key| is_key_pressed(key))
            .find_map(|&key| self.map_key(key))
    }

    /// Maps a key to the command it triggers.
    pub fn map_key(&self, key: KeyCode) -> Option<PlayerInput> {
        let input = match key {
            KeyCode::Escape => PlayerInput::Quit,
            KeyCode::Up => PlayerInput::Move(Direction::Up),
            KeyCode::Down => PlayerInput::Move(Direction::Down),
            KeyCode::Left => PlayerInput::Move(Direction::Left),
            KeyCode::Right => PlayerInput::Move(Direction::Right),
            KeyCode::W if self.wasd_enabled => PlayerInput::Move(Direction::Up),
            KeyCode::S if self.wasd_enabled => PlayerInput::Move(Direction::Down),
            KeyCode::A if self.wasd_enabled => PlayerInput::Move(Direction::Left),
            KeyCode::D if self.wasd_enabled => PlayerInput::Move(Direction::Right),
            KeyCode::Space | KeyCode::P => PlayerInput::TogglePause,
            KeyCode::Enter | KeyCode::KpEnter | KeyCode::R => PlayerInput::Restart,
            _ => return None,
        };
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.map_key(KeyCode::Up),
            Some(PlayerInput::Move(Direction::Up))
        );
        assert_eq!(
            handler.map_key(KeyCode::A),
            Some(PlayerInput::Move(Direction::Left))
        );
        assert_eq!(handler.map_key(KeyCode::F1), None);
    }

    #[test]
    fn test_wasd_can_be_disabled() {
        let handler = InputHandler {
            wasd_enabled: false,
        };
        assert_eq!(handler.map_key(KeyCode::W), None);
        assert_eq!(
            handler.map_key(KeyCode::Right),
            Some(PlayerInput::Move(Direction::Right))
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.map_key(KeyCode::P), Some(PlayerInput::TogglePause));
        assert_eq!(handler.map_key(KeyCode::Enter), Some(PlayerInput::Restart));
        assert_eq!(handler.map_key(KeyCode::Escape), Some(PlayerInput::Quit));
    }
}
