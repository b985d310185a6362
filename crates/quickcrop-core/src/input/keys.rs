//! Keyboard vocabulary and shortcut mapping.

use crate::boundary::Side;
use serde::{Deserialize, Serialize};

/// Keys the router understands. Anything else is [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Tab,
    Plus,
    Minus,
    /// A letter key, lowercased.
    Char(char),
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn parse(key: &str) -> Key {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Tab" => Key::Tab,
            "+" | "=" => Key::Plus,
            "-" | "_" => Key::Minus,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_alphabetic() => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other,
                }
            }
        }
    }

    fn arrow(self) -> Option<Side> {
        match self {
            Key::ArrowLeft => Some(Side::Left),
            Key::ArrowRight => Some(Side::Right),
            Key::ArrowUp => Some(Side::Top),
            Key::ArrowDown => Some(Side::Bottom),
            _ => None,
        }
    }
}

/// Modifier state at the time of a key press. `meta` is Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn command() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl or Cmd held.
    pub fn command_held(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// What a key press asks the router to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pan { direction: Side, coarse: bool },
    Zoom(ZoomDirection),
    CyclePreset { reverse: bool },
    Undo,
    Redo,
}

/// Map a key press to an action.
///
/// - Arrow: pan (coarse with Shift)
/// - Ctrl/Cmd + Up/Right: zoom in; Ctrl/Cmd + Down/Left: zoom out
/// - `+` / `-`: zoom in / out
/// - Tab / Shift+Tab: next / previous preset
/// - Ctrl/Cmd + Z: undo; Ctrl/Cmd + Shift + Z or Ctrl/Cmd + Y: redo
pub fn action_for(key: Key, modifiers: Modifiers) -> Option<Action> {
    if let Some(side) = key.arrow() {
        if modifiers.command_held() {
            let direction = match side {
                Side::Top | Side::Right => ZoomDirection::In,
                Side::Bottom | Side::Left => ZoomDirection::Out,
            };
            return Some(Action::Zoom(direction));
        }
        return Some(Action::Pan {
            direction: side,
            coarse: modifiers.shift,
        });
    }

    match key {
        Key::Tab if !modifiers.command_held() => Some(Action::CyclePreset {
            reverse: modifiers.shift,
        }),
        Key::Plus if !modifiers.command_held() => Some(Action::Zoom(ZoomDirection::In)),
        Key::Minus if !modifiers.command_held() => Some(Action::Zoom(ZoomDirection::Out)),
        Key::Char('z') if modifiers.command_held() => {
            if modifiers.shift {
                Some(Action::Redo)
            } else {
                Some(Action::Undo)
            }
        }
        Key::Char('y') if modifiers.command_held() => Some(Action::Redo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dom_keys() {
        assert_eq!(Key::parse("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::parse("Tab"), Key::Tab);
        assert_eq!(Key::parse("="), Key::Plus);
        assert_eq!(Key::parse("Z"), Key::Char('z'));
        assert_eq!(Key::parse("Escape"), Key::Other);
        assert_eq!(Key::parse("1"), Key::Other);
        assert_eq!(Key::parse(""), Key::Other);
    }

    #[test]
    fn test_arrows_pan() {
        assert_eq!(
            action_for(Key::ArrowLeft, Modifiers::NONE),
            Some(Action::Pan {
                direction: Side::Left,
                coarse: false
            })
        );
        assert_eq!(
            action_for(Key::ArrowDown, Modifiers::shift()),
            Some(Action::Pan {
                direction: Side::Bottom,
                coarse: true
            })
        );
    }

    #[test]
    fn test_command_arrows_zoom() {
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            action_for(Key::ArrowUp, cmd),
            Some(Action::Zoom(ZoomDirection::In))
        );
        assert_eq!(
            action_for(Key::ArrowRight, Modifiers::command()),
            Some(Action::Zoom(ZoomDirection::In))
        );
        assert_eq!(
            action_for(Key::ArrowLeft, Modifiers::command()),
            Some(Action::Zoom(ZoomDirection::Out))
        );
    }

    #[test]
    fn test_history_shortcuts() {
        assert_eq!(action_for(Key::Char('z'), Modifiers::command()), Some(Action::Undo));
        let redo = Modifiers {
            ctrl: true,
            shift: true,
            meta: false,
        };
        assert_eq!(action_for(Key::Char('z'), redo), Some(Action::Redo));
        assert_eq!(action_for(Key::Char('y'), Modifiers::command()), Some(Action::Redo));
        assert_eq!(action_for(Key::Char('z'), Modifiers::NONE), None);
    }

    #[test]
    fn test_tab_cycles() {
        assert_eq!(
            action_for(Key::Tab, Modifiers::NONE),
            Some(Action::CyclePreset { reverse: false })
        );
        assert_eq!(
            action_for(Key::Tab, Modifiers::shift()),
            Some(Action::CyclePreset { reverse: true })
        );
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(action_for(Key::Other, Modifiers::NONE), None);
        assert_eq!(action_for(Key::Char('q'), Modifiers::command()), None);
    }
}
