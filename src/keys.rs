use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeyConfig;

// ============================================================================
// KEY PARSING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    key: KeyCode,
    ctrl: bool,
    alt: bool,
    shift: bool,
}

pub fn parse_key(key_str: &str) -> Option<KeyBinding> {
    let parts: Vec<&str> = key_str.split('-').collect();

    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;
    let mut key_part = key_str;

    // a bare "-" is the minus key, not a modifier separator
    if parts.len() > 1 && key_str != "-" {
        for modifier in &parts[..parts.len() - 1] {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                _ => return None,
            }
        }
        key_part = parts[parts.len() - 1];
    }

    let key = match key_part {
        "Esc" | "esc" | "Escape" => KeyCode::Esc,
        "Enter" | "enter" | "Return" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Backspace" => KeyCode::Backspace,
        "Delete" | "Del" => KeyCode::Delete,
        "Insert" | "Ins" => KeyCode::Insert,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Space" | "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('F') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return None,
        },
        c => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some(KeyBinding {
        key,
        ctrl,
        alt,
        shift,
    })
}

pub fn matches_key(key: &KeyBinding, event: &KeyEvent) -> bool {
    if key.key != event.code {
        return false;
    }

    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    // Shift is already part of "G" or BackTab; terminals differ on reporting it
    let shift_implied = matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab);

    key.ctrl == ctrl && key.alt == alt && (shift_implied || key.shift == shift)
}

// ============================================================================
// KEYMAP
// ============================================================================

/// What a key press asks the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextSection,
    PrevSection,
    Left,
    Right,
    ToggleTheme,
    Menu,
    Compose,
}

/// Configured key strings, parsed once.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(Command, Vec<KeyBinding>)>,
}

impl Keymap {
    pub fn new(keys: &KeyConfig) -> Self {
        let parse = |list: &[String]| -> Vec<KeyBinding> {
            list.iter().map(String::as_str).filter_map(parse_key).collect()
        };

        // quit is checked first so it can never be shadowed
        let bindings = vec![
            (Command::Quit, parse(&keys.quit)),
            (Command::Up, parse(&keys.up)),
            (Command::Down, parse(&keys.down)),
            (Command::PageUp, parse(&keys.page_up)),
            (Command::PageDown, parse(&keys.page_down)),
            (Command::Top, parse(&keys.top)),
            (Command::Bottom, parse(&keys.bottom)),
            (Command::NextSection, parse(&keys.next_section)),
            (Command::PrevSection, parse(&keys.prev_section)),
            (Command::Left, parse(&keys.left)),
            (Command::Right, parse(&keys.right)),
            (Command::ToggleTheme, parse(&keys.toggle_theme)),
            (Command::Menu, parse(&keys.menu)),
            (Command::Compose, parse(&keys.compose)),
        ];
        Self { bindings }
    }

    pub fn command(&self, event: &KeyEvent) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|key| matches_key(key, event)))
            .map(|(command, _)| *command)
    }
}
