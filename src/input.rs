//! Logical commands and the key map that produces them.
//!
//! The main loop matches on `Command`, not on keycodes, so the bindings
//! live in one place and the dispatch code stays readable.

use sdl2::keyboard::{Keycode, Mod};

/// Pan step multiplier while Shift is held
pub const FAST_PAN_MULTIPLIER: i32 = 4;

/// Pan direction in window coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step on each axis
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What the user asked the magnifier to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ZoomIn,
    ZoomOut,
    Pan { direction: Direction, fast: bool },
    ToggleFullscreen,
}

impl Command {
    /// Translate a pressed key into a command, or None for unbound keys.
    /// Shift turns pans into fast pans; zoom keys ignore modifiers, so
    /// Shift+Equals (a plus sign on most layouts) still zooms in.
    pub fn from_key(key: Keycode, keymod: Mod) -> Option<Command> {
        let fast = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
        let pan = |direction| Some(Command::Pan { direction, fast });

        match key {
            Keycode::Escape | Keycode::Q => Some(Command::Quit),
            Keycode::Plus | Keycode::Equals | Keycode::KpPlus | Keycode::PageUp => {
                Some(Command::ZoomIn)
            },
            Keycode::Minus | Keycode::KpMinus | Keycode::PageDown => Some(Command::ZoomOut),
            Keycode::Up | Keycode::W => pan(Direction::Up),
            Keycode::Down | Keycode::S => pan(Direction::Down),
            Keycode::Left | Keycode::A => pan(Direction::Left),
            Keycode::Right | Keycode::D => pan(Direction::Right),
            Keycode::F11 => Some(Command::ToggleFullscreen),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            Command::from_key(Keycode::Escape, Mod::NOMOD),
            Some(Command::Quit)
        );
        assert_eq!(Command::from_key(Keycode::Q, Mod::NOMOD), Some(Command::Quit));
    }

    #[test]
    fn test_zoom_keys() {
        for key in [Keycode::Plus, Keycode::Equals, Keycode::KpPlus, Keycode::PageUp] {
            assert_eq!(Command::from_key(key, Mod::NOMOD), Some(Command::ZoomIn));
        }
        for key in [Keycode::Minus, Keycode::KpMinus, Keycode::PageDown] {
            assert_eq!(Command::from_key(key, Mod::NOMOD), Some(Command::ZoomOut));
        }
        // Plus reached through Shift still zooms
        assert_eq!(
            Command::from_key(Keycode::Equals, Mod::LSHIFTMOD),
            Some(Command::ZoomIn)
        );
    }

    #[test]
    fn test_pan_keys_arrows_and_wasd() {
        let pairs = [
            (Keycode::Up, Direction::Up),
            (Keycode::W, Direction::Up),
            (Keycode::Down, Direction::Down),
            (Keycode::S, Direction::Down),
            (Keycode::Left, Direction::Left),
            (Keycode::A, Direction::Left),
            (Keycode::Right, Direction::Right),
            (Keycode::D, Direction::Right),
        ];
        for (key, direction) in pairs {
            assert_eq!(
                Command::from_key(key, Mod::NOMOD),
                Some(Command::Pan {
                    direction,
                    fast: false
                })
            );
        }
    }

    #[test]
    fn test_shift_makes_pans_fast() {
        assert_eq!(
            Command::from_key(Keycode::Left, Mod::LSHIFTMOD),
            Some(Command::Pan {
                direction: Direction::Left,
                fast: true
            })
        );
        assert_eq!(
            Command::from_key(Keycode::W, Mod::RSHIFTMOD),
            Some(Command::Pan {
                direction: Direction::Up,
                fast: true
            })
        );
    }

    #[test]
    fn test_fullscreen_and_unbound_keys() {
        assert_eq!(
            Command::from_key(Keycode::F11, Mod::NOMOD),
            Some(Command::ToggleFullscreen)
        );
        assert_eq!(Command::from_key(Keycode::Z, Mod::NOMOD), None);
        assert_eq!(Command::from_key(Keycode::Space, Mod::NOMOD), None);
    }

    #[test]
    fn test_direction_steps() {
        assert_eq!(Direction::Up.step(), (0, -1));
        assert_eq!(Direction::Down.step(), (0, 1));
        assert_eq!(Direction::Left.step(), (-1, 0));
        assert_eq!(Direction::Right.step(), (1, 0));
    }
}
