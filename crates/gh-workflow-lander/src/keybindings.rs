//! Keybinding system
//!
//! This module provides the keybinding infrastructure that maps keyboard input
//! to commands. It supports single keys and modifier combinations.
//!
//! Key patterns are textual (e.g., "q", "shift+left", "ctrl+c") so the
//! bindings can be listed as hints in the UI.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command_id::CommandId;

/// A single keybinding that maps a key pattern to a command
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Textual representation of the key - e.g., "ctrl+c", "shift+left"
    pub keys: String,
    /// Display hint for the UI - e.g., "Ctrl+C", "⇧←"
    pub hint: String,
    /// The command this binding triggers
    pub command: CommandId,
}

impl KeyBinding {
    /// Create a new keybinding
    pub fn new(keys: impl Into<String>, hint: impl Into<String>, command: CommandId) -> Self {
        Self {
            keys: keys.into(),
            hint: hint.into(),
            command,
        }
    }
}

/// Parsed key pattern for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Parse a textual key pattern into a matchable form
///
/// Supported formats:
/// - Single char: "q", "R" (case-sensitive)
/// - With modifiers: "ctrl+c", "shift+left"
/// - Special keys: "tab", "enter", "esc", "up", "down", "left", "right"
pub fn parse_key_pattern(pattern: &str) -> Option<KeyPattern> {
    let pattern = pattern.trim();

    // Single characters keep their case; the shift state is carried by the char
    if pattern.chars().count() == 1 {
        let c = pattern.chars().next()?;
        return Some(KeyPattern {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        });
    }

    let pattern_lower = pattern.to_lowercase();
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = pattern_lower.as_str();

    while let Some((modifier, rest)) = key_part.split_once('+') {
        match modifier {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
        key_part = rest;
    }

    let code = parse_key_code(key_part)?;
    Some(KeyPattern { code, modifiers })
}

/// Parse a key code string into a KeyCode
fn parse_key_code(s: &str) -> Option<KeyCode> {
    match s {
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        _ => None,
    }
}

/// Normalize an event for matching
///
/// Terminals disagree on whether an uppercase letter carries SHIFT, so the
/// shift bit is dropped for character keys.
fn normalize(key: &KeyEvent) -> KeyPattern {
    let mut modifiers =
        key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
    if matches!(key.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyPattern {
        code: key.code,
        modifiers,
    }
}

/// The keymap - a collection of keybindings with matching logic
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, KeyPattern)>,
}

impl Keymap {
    /// Create a new keymap from a list of bindings
    ///
    /// Bindings whose pattern cannot be parsed are dropped with a warning.
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        let parsed = bindings
            .into_iter()
            .filter_map(|binding| match parse_key_pattern(&binding.keys) {
                Some(pattern) => Some((binding, pattern)),
                None => {
                    log::warn!("Ignoring invalid key pattern '{}'", binding.keys);
                    None
                }
            })
            .collect();

        Self { bindings: parsed }
    }

    /// Command bound to a key event, if any
    pub fn match_key(&self, key: &KeyEvent) -> Option<CommandId> {
        let pressed = normalize(key);
        self.bindings
            .iter()
            .find(|(_, pattern)| normalize_pattern(pattern) == pressed)
            .map(|(binding, _)| binding.command)
    }

    /// First hint bound to a command
    pub fn hint_for(&self, command: CommandId) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.command == command)
            .map(|(binding, _)| binding.hint.as_str())
    }
}

fn normalize_pattern(pattern: &KeyPattern) -> KeyPattern {
    let mut pattern = *pattern;
    if matches!(pattern.code, KeyCode::Char(_)) {
        pattern.modifiers.remove(KeyModifiers::SHIFT);
    }
    pattern
}
