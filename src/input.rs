use macroquad::prelude::KeyCode;

use crate::config::Keybinds;

/// Discrete user actions bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Flap,
    Pause,
}

/// Key -> action table, resolved once from the configured key names.
pub struct InputMap {
    bindings: Vec<(KeyCode, Action)>,
}

impl InputMap {
    /// Unknown names are dropped; `Config::validate` rejects them earlier.
    pub fn from_keybinds(keybinds: &Keybinds) -> Self {
        let mut bindings = Vec::with_capacity(2);
        for (name, action) in [(&keybinds.flap, Action::Flap), (&keybinds.pause, Action::Pause)] {
            if let Some(key) = name.as_deref().and_then(parse_key) {
                bindings.push((key, action));
            }
        }
        Self { bindings }
    }

    pub fn key_for(&self, action: Action) -> Option<KeyCode> {
        self.bindings.iter().find(|(_, a)| *a == action).map(|(k, _)| *k)
    }

    /// Actions whose key `is_pressed` reports as pressed this frame.
    pub fn pressed(&self, mut is_pressed: impl FnMut(KeyCode) -> bool) -> Vec<Action> {
        self.bindings
            .iter()
            .filter(|(key, _)| is_pressed(*key))
            .map(|(_, action)| *action)
            .collect()
    }
}

/// Map a key name ("Space", "P", "ArrowUp", "Enter", ...) to a key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    if name == " " {
        return Some(KeyCode::Space);
    }
    let lower = name.trim().to_ascii_lowercase();
    let key = match lower.as_str() {
        "space" => KeyCode::Space,
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,
        "backspace" => KeyCode::Backspace,
        _ if lower.len() == 1 => {
            let c = lower.chars().next()?;
            letter_or_digit(c)?
        }
        _ => return None,
    };
    Some(key)
}

fn letter_or_digit(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F, KeyCode::G,
        KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N,
        KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T, KeyCode::U,
        KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y, KeyCode::Z,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Key0, KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4,
        KeyCode::Key5, KeyCode::Key6, KeyCode::Key7, KeyCode::Key8, KeyCode::Key9,
    ];
    match c {
        'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
        '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        _ => None,
    }
}
