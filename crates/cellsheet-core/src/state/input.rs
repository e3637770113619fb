use serde::{Deserialize, Serialize};

use super::selection::Direction;

/// Keyboard actions the grid responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Move(Direction),
    Extend(Direction),
    /// Escape: drop the edit, or the selection when not editing
    Cancel,
    ConfirmEdit,
    /// Clear every selected cell
    Delete,
    Copy,
    Cut,
    Paste,
    None,
}

/// Key codes for the keys the grid handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Delete,
    Char(char),
    Unknown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Delete" | "Del" => Key::Delete,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }
}

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    pub fn none_pressed(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    pub fn only_shift(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }

    pub fn ctrl_or_meta(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Maps a key and modifiers to an InputAction
pub fn key_to_action(key: Key, modifiers: Modifiers) -> InputAction {
    let direction = match key {
        Key::ArrowUp => Some(Direction::Up),
        Key::ArrowDown => Some(Direction::Down),
        Key::ArrowLeft => Some(Direction::Left),
        Key::ArrowRight => Some(Direction::Right),
        _ => None,
    };

    match (key, direction) {
        (_, Some(d)) if modifiers.none_pressed() => InputAction::Move(d),
        (_, Some(d)) if modifiers.only_shift() => InputAction::Extend(d),

        (Key::Escape, _) => InputAction::Cancel,
        (Key::Enter, _) if modifiers.none_pressed() => InputAction::ConfirmEdit,
        (Key::Delete, _) => InputAction::Delete,

        (Key::Char(c), _) if modifiers.ctrl_or_meta() => match c.to_ascii_lowercase() {
            'c' => InputAction::Copy,
            'x' => InputAction::Cut,
            'v' => InputAction::Paste,
            _ => InputAction::None,
        },

        _ => InputAction::None,
    }
}
