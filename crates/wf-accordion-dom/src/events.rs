//! Keyboard input events.
//!
//! Hosts translate their native key events into a [`KeyEvent`] and hand it to
//! the widget together with the event target. Both the modern `key` names and
//! the legacy numeric `which`/`keyCode` values are understood.
//!
//! ```
//! use wf_accordion_dom::{Key, KeyEvent, KeyboardModifiers};
//!
//! assert_eq!(Key::from_key_code(40), Key::ArrowDown);
//! assert_eq!(Key::from_name("PageUp"), Key::PageUp);
//!
//! let mut event = KeyEvent::new(Key::PageDown, KeyboardModifiers::CTRL);
//! event.prevent_default();
//! assert!(event.is_default_prevented());
//! ```

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Keys relevant to disclosure widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Activation
    Enter,
    Space,

    Tab,
    Escape,

    /// A printable character.
    Character(char),
    /// Anything else.
    Unidentified,
}

impl Key {
    /// Map a legacy `KeyboardEvent.which` / `keyCode` value.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            9 => Key::Tab,
            13 => Key::Enter,
            27 => Key::Escape,
            32 => Key::Space,
            33 => Key::PageUp,
            34 => Key::PageDown,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            48..=57 | 65..=90 => char::from_u32(code)
                .map(|c| Key::Character(c.to_ascii_lowercase()))
                .unwrap_or(Key::Unidentified),
            _ => Key::Unidentified,
        }
    }

    /// Map a `KeyboardEvent.key` value, including the legacy IE/Edge names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Unidentified,
                }
            }
        }
    }

    /// Returns true for the four arrow keys.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// A key press delivered to the widget.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    default_prevented: bool,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// Suppress the host's default action (such as scrolling).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check whether the default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }
}
