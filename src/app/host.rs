//! Binding between the panel and whatever delivers the global activation key.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

/// Entry point the host calls when the registered key combination fires.
pub trait Activate {
    fn activate(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shift is ignored for characters since it is already folded into the
    /// character itself.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                a.eq_ignore_ascii_case(&b)
                    && self.modifiers.difference(KeyModifiers::SHIFT)
                        == key.modifiers.difference(KeyModifiers::SHIFT)
            }
            (a, b) => a == b && self.modifiers == key.modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key combination '{0}'")]
pub struct ParseKeyComboError(String);

impl FromStr for KeyCombo {
    type Err = ParseKeyComboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyComboError(s.to_string());
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key, mods) = match parts.split_last() {
            // "ctrl++" splits into a trailing empty part
            Some((&"", rest)) if s.ends_with("++") => ("+", &rest[..rest.len().saturating_sub(1)]),
            Some((key, rest)) => (*key, rest),
            None => return Err(err()),
        };

        let mut modifiers = KeyModifiers::NONE;
        for m in mods {
            modifiers |= match m.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "super" | "cmd" => KeyModifiers::SUPER,
                _ => return Err(err()),
            };
        }

        let lower = key.to_lowercase();
        let code = match lower.as_str() {
            "space" => KeyCode::Char(' '),
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            f if f.len() > 1 && f.starts_with('f') => {
                let n: u8 = f[1..].parse().map_err(|_| err())?;
                KeyCode::F(n)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(err()),
                }
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
            (KeyModifiers::SUPER, "Super+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// The host side of activation: owns the registered key combination and
/// forwards matching key presses to the panel it is handed.
#[derive(Debug, Default)]
pub struct KeyHost {
    shortcut: Option<KeyCombo>,
}

impl KeyHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_activate_shortcut(&mut self, combo: KeyCombo) {
        log::info!("activation shortcut registered: {}", combo);
        self.shortcut = Some(combo);
    }

    pub fn shortcut(&self) -> Option<KeyCombo> {
        self.shortcut
    }

    pub fn dispatch(&self, key: &KeyEvent, target: &mut dyn Activate) -> bool {
        match self.shortcut {
            Some(combo) if combo.matches(key) => {
                target.activate();
                true
            }
            _ => false,
        }
    }
}
