#![warn(missing_docs)]
//! Keyboard input tracking and key bindings.
//!
//! Hosts feed raw press/release edges into [`InputState`]; consumers drain
//! per-binding click counts through [`KeyEventSource`] once per tick.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Physical key, named after its US-layout legend.
#[allow(missing_docs)]
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space,
    Tab,
    Enter,
    Escape,
    Backquote,
}

#[rustfmt::skip]
const KEY_NAMES: [(Key, &str); 53] = [
    (Key::A, "A"), (Key::B, "B"), (Key::C, "C"), (Key::D, "D"), (Key::E, "E"),
    (Key::F, "F"), (Key::G, "G"), (Key::H, "H"), (Key::I, "I"), (Key::J, "J"),
    (Key::K, "K"), (Key::L, "L"), (Key::M, "M"), (Key::N, "N"), (Key::O, "O"),
    (Key::P, "P"), (Key::Q, "Q"), (Key::R, "R"), (Key::S, "S"), (Key::T, "T"),
    (Key::U, "U"), (Key::V, "V"), (Key::W, "W"), (Key::X, "X"), (Key::Y, "Y"),
    (Key::Z, "Z"),
    (Key::Digit0, "0"), (Key::Digit1, "1"), (Key::Digit2, "2"), (Key::Digit3, "3"),
    (Key::Digit4, "4"), (Key::Digit5, "5"), (Key::Digit6, "6"), (Key::Digit7, "7"),
    (Key::Digit8, "8"), (Key::Digit9, "9"),
    (Key::F1, "F1"), (Key::F2, "F2"), (Key::F3, "F3"), (Key::F4, "F4"),
    (Key::F5, "F5"), (Key::F6, "F6"), (Key::F7, "F7"), (Key::F8, "F8"),
    (Key::F9, "F9"), (Key::F10, "F10"), (Key::F11, "F11"), (Key::F12, "F12"),
    (Key::Space, "SPACE"),
    (Key::Tab, "TAB"),
    (Key::Enter, "ENTER"),
    (Key::Escape, "ESCAPE"),
    (Key::Backquote, "BACKQUOTE"),
];

/// Error returned when a key name does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name {0:?}")]
pub struct KeyParseError(pub String);

impl Key {
    /// Canonical name, as written back to config files.
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map(|(_, name)| *name)
            .unwrap_or("?")
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Accepts `P`, `p`, `KeyP`, `Digit1`, `1`, `F6`, `Space`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper
            .strip_prefix("KEY")
            .filter(|rest| rest.len() == 1)
            .or_else(|| upper.strip_prefix("DIGIT"))
            .unwrap_or(upper.as_str());
        KEY_NAMES
            .iter()
            .find(|(_, name)| *name == bare)
            .map(|(key, _)| *key)
            .ok_or_else(|| KeyParseError(s.to_string()))
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Named action bound to a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Translation-style action name, e.g. `key.autoplanter.toggle`.
    pub name: String,
    /// Bound key.
    pub key: Key,
}

impl KeyBinding {
    /// Create a binding.
    pub fn new(name: impl Into<String>, key: Key) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    /// Default binding for the planting toggle.
    pub fn planting_toggle() -> Self {
        Self::new("key.autoplanter.toggle", Key::P)
    }
}

/// Source of discrete key activations.
pub trait KeyEventSource {
    /// Drain and return the activations of `binding` queued since the last call.
    fn consume_activations(&mut self, binding: &KeyBinding) -> u32;
}

/// Keyboard state tracking across ticks.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held.
    keys_pressed: HashSet<Key>,
    /// Keys pressed this tick (edge-triggered).
    keys_just_pressed: HashSet<Key>,
    /// Keys released this tick (edge-triggered).
    keys_just_released: HashSet<Key>,
    /// Press edges not yet consumed, per key.
    pending_clicks: HashMap<Key, u32>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Holding a key does not queue repeats.
    pub fn press(&mut self, key: Key) {
        if self.keys_pressed.insert(key) {
            self.keys_just_pressed.insert(key);
            *self.pending_clicks.entry(key).or_insert(0) += 1;
        }
    }

    /// Record a key going up.
    pub fn release(&mut self, key: Key) {
        if self.keys_pressed.remove(&key) {
            self.keys_just_released.insert(key);
        }
    }

    /// Press and immediately release `key`.
    pub fn tap(&mut self, key: Key) {
        self.press(key);
        self.release(key);
    }

    /// Reset per-tick edge state (call at the end of each tick).
    pub fn end_tick(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }

    /// Check if a key is currently held.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was pressed this tick.
    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a key was released this tick.
    pub fn key_just_released(&self, key: Key) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Clicks queued for `key` and not yet consumed.
    pub fn pending_clicks(&self, key: Key) -> u32 {
        self.pending_clicks.get(&key).copied().unwrap_or(0)
    }
}

impl KeyEventSource for InputState {
    fn consume_activations(&mut self, binding: &KeyBinding) -> u32 {
        self.pending_clicks.remove(&binding.key).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_spellings() {
        assert_eq!("P".parse::<Key>(), Ok(Key::P));
        assert_eq!("p".parse::<Key>(), Ok(Key::P));
        assert_eq!("KeyP".parse::<Key>(), Ok(Key::P));
        assert_eq!("Digit7".parse::<Key>(), Ok(Key::Digit7));
        assert_eq!("7".parse::<Key>(), Ok(Key::Digit7));
        assert_eq!("f6".parse::<Key>(), Ok(Key::F6));
        assert_eq!("space".parse::<Key>(), Ok(Key::Space));
        assert!("Keyboard".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn names_round_trip() {
        for (key, name) in KEY_NAMES {
            assert_eq!(key.name(), name);
            assert_eq!(name.parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn press_queues_one_click_per_edge() {
        let mut input = InputState::new();
        let binding = KeyBinding::planting_toggle();

        input.press(Key::P);
        input.press(Key::P);
        assert_eq!(input.pending_clicks(Key::P), 1);
        assert!(input.key_pressed(Key::P));
        assert!(input.key_just_pressed(Key::P));

        input.release(Key::P);
        input.tap(Key::P);
        assert_eq!(input.consume_activations(&binding), 2);
        assert_eq!(input.consume_activations(&binding), 0);
    }

    #[test]
    fn end_tick_clears_edges_but_keeps_held_keys() {
        let mut input = InputState::new();
        input.press(Key::W);
        input.end_tick();
        assert!(input.key_pressed(Key::W));
        assert!(!input.key_just_pressed(Key::W));

        input.release(Key::W);
        assert!(input.key_just_released(Key::W));
        input.end_tick();
        assert!(!input.key_just_released(Key::W));
    }

    #[test]
    fn other_keys_do_not_activate_binding() {
        let mut input = InputState::new();
        input.tap(Key::O);
        assert_eq!(
            input.consume_activations(&KeyBinding::planting_toggle()),
            0
        );
        assert_eq!(input.pending_clicks(Key::O), 1);
    }

    #[test]
    fn binding_deserializes_from_key_name() {
        let binding: KeyBinding =
            serde_json::from_str(r#"{"name":"key.autoplanter.toggle","key":"KeyG"}"#)
                .expect("binding parses");
        assert_eq!(binding.key, Key::G);
        let json = serde_json::to_string(&binding).expect("binding serializes");
        assert!(json.contains(r#""key":"G""#));
    }
}
