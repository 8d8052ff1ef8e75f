//! Conversion from `crossterm` events into the crate's input model.
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crossterm::event as ct;

/// Converts a raw terminal event. Only key presses pass; releases, repeats, resizes and
/// unsupported keys yield `None`.
pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) => {
            if key.kind != ct::KeyEventKind::Press {
                return None;
            }
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Paste(s) => Some(InputEvent::Paste(s)),
        ct::Event::Mouse(m) => mouse_event_from_crossterm(m).map(InputEvent::Mouse),
        ct::Event::FocusLost => Some(InputEvent::FocusLost),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let mut modifiers = modifiers_from_crossterm(key.modifiers);
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Tab if modifiers.shift => {
            modifiers.shift = false;
            KeyCode::BackTab
        }
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => {
            // crossterm reports BackTab with SHIFT set; the code already carries it.
            modifiers.shift = false;
            KeyCode::BackTab
        }
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    // Uppercase letters arrive with SHIFT; bindings match on the char itself.
    if let KeyCode::Char(c) = code {
        if c.is_uppercase() {
            modifiers.shift = false;
        }
    }

    Some(KeyEvent { code, modifiers })
}

pub fn mouse_event_from_crossterm(m: ct::MouseEvent) -> Option<MouseEvent> {
    let kind = match m.kind {
        ct::MouseEventKind::Down(b) => MouseEventKind::Down(mouse_button_from_crossterm(b)),
        ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(mouse_button_from_crossterm(b)),
        ct::MouseEventKind::Up(b) => MouseEventKind::Up(mouse_button_from_crossterm(b)),
        ct::MouseEventKind::Moved => MouseEventKind::Moved,
        ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };

    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers_from_crossterm(m.modifiers),
    })
}

fn modifiers_from_crossterm(m: ct::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(ct::KeyModifiers::SHIFT),
        ctrl: m.contains(ct::KeyModifiers::CONTROL),
        alt: m.contains(ct::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: ct::MouseButton) -> MouseButton {
    match b {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}
