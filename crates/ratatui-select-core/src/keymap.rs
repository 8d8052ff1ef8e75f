//! Key patterns and help-line bindings.
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A set of alternative keys bound to one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet(Vec<KeyEvent>);

impl KeySet {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self(keys.into_iter().collect())
    }

    pub fn keys(&self) -> &[KeyEvent] {
        &self.0
    }

    /// Exact match: same code and the same modifiers.
    pub fn contains(&self, event: &KeyEvent) -> bool {
        self.0.iter().any(|p| key_event_matches(p, event))
    }

    /// Code-only match; modifiers are ignored.
    pub fn contains_code(&self, event: &KeyEvent) -> bool {
        self.0.iter().any(|p| p.code == event.code)
    }
}

impl FromIterator<KeyEvent> for KeySet {
    fn from_iter<I: IntoIterator<Item = KeyEvent>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One entry of a help line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: KeySet,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(help_key: impl Into<String>, help_desc: impl Into<String>, keys: KeySet) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.contains(event)
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn key_ctrl(code: KeyCode) -> KeyEvent {
    key(code).with_modifiers(KeyModifiers::ctrl())
}
