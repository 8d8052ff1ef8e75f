//! Key event to command mapping.
//!
//! The same key means different things depending on where focus sits. On the trigger every
//! navigation key is ours. In the search field, typing belongs to the field: only `Enter`,
//! vertical arrows, paging, `Esc` and `Tab` are intercepted, and `Home`/`End` jump the list only
//! while a jump modifier (Ctrl or Alt) is held. Otherwise they move the text caret.
use crate::highlight::Navigation;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::keymap::Binding;
use crate::keymap::KeySet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusContext {
    #[default]
    Trigger,
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the dropdown (closed) or commit the highlighted option (open).
    Activate,
    /// Open if closed, otherwise move the highlight.
    Move(Navigation),
    /// Commit the highlighted option without opening.
    Commit,
    Close,
    /// Close, but let the host move focus as it normally would.
    TabOut,
    Clear,
}

#[derive(Clone, Debug)]
pub struct SelectBindings {
    /// Rows moved by `page_down`/`page_up`.
    pub page_step: usize,
    pub activate: KeySet,
    pub next: KeySet,
    pub previous: KeySet,
    pub first: KeySet,
    pub last: KeySet,
    pub page_down: KeySet,
    pub page_up: KeySet,
    pub close: KeySet,
    pub tab_out: KeySet,
    /// Only honored on a closed, clearable select.
    pub clear: KeySet,
}

impl Default for SelectBindings {
    fn default() -> Self {
        Self {
            page_step: 5,
            activate: KeySet::new([keymap::key(KeyCode::Enter), keymap::key_char(' ')]),
            next: KeySet::new([keymap::key(KeyCode::Down)]),
            previous: KeySet::new([keymap::key(KeyCode::Up)]),
            first: KeySet::new([keymap::key(KeyCode::Home)]),
            last: KeySet::new([keymap::key(KeyCode::End)]),
            page_down: KeySet::new([keymap::key(KeyCode::PageDown)]),
            page_up: KeySet::new([keymap::key(KeyCode::PageUp)]),
            close: KeySet::new([keymap::key(KeyCode::Esc)]),
            tab_out: KeySet::new([keymap::key(KeyCode::Tab), keymap::key(KeyCode::BackTab)]),
            clear: KeySet::new([
                keymap::key_ctrl(KeyCode::Backspace),
                keymap::key(KeyCode::Delete),
            ]),
        }
    }
}

impl SelectBindings {
    /// Maps `key` to a command. `None` means the key is not intercepted.
    pub fn command_for(&self, key: &KeyEvent, context: FocusContext, open: bool) -> Option<Command> {
        match context {
            FocusContext::Trigger => self.trigger_command(key, open),
            FocusContext::Search => self.search_command(key),
        }
    }

    fn trigger_command(&self, key: &KeyEvent, open: bool) -> Option<Command> {
        if self.activate.contains(key) {
            return Some(Command::Activate);
        }
        if let Some(nav) = self.vertical(key) {
            return Some(Command::Move(nav));
        }
        if !open {
            if self.clear.contains(key) {
                return Some(Command::Clear);
            }
            return None;
        }
        if let Some(nav) = self.jump(key) {
            return Some(Command::Move(nav));
        }
        self.dismissal(key)
    }

    fn search_command(&self, key: &KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Enter && self.activate.contains(key) {
            return Some(Command::Commit);
        }
        if let Some(nav) = self.vertical(key) {
            return Some(Command::Move(nav));
        }
        if key.modifiers.has_jump_modifier() {
            if let Some(nav) = self.jump(key) {
                return Some(Command::Move(nav));
            }
        }
        self.dismissal(key)
    }

    fn vertical(&self, key: &KeyEvent) -> Option<Navigation> {
        if self.next.contains(key) {
            return Some(Navigation::Next);
        }
        if self.previous.contains(key) {
            return Some(Navigation::Previous);
        }
        if self.page_down.contains(key) {
            return Some(Navigation::PageDown(self.page_step));
        }
        if self.page_up.contains(key) {
            return Some(Navigation::PageUp(self.page_step));
        }
        None
    }

    /// First/last, matched on the key code alone so modified variants jump too.
    fn jump(&self, key: &KeyEvent) -> Option<Navigation> {
        if self.first.contains_code(key) {
            return Some(Navigation::First);
        }
        if self.last.contains_code(key) {
            return Some(Navigation::Last);
        }
        None
    }

    fn dismissal(&self, key: &KeyEvent) -> Option<Command> {
        if self.close.contains(key) {
            return Some(Command::Close);
        }
        if self.tab_out.contains(key) {
            return Some(Command::TabOut);
        }
        None
    }

    /// Hints for a help line, depending on whether the dropdown is open.
    pub fn help(&self, open: bool) -> Vec<Binding> {
        if !open {
            return vec![
                Binding::new("enter", "open", self.activate.clone()),
                Binding::new("del", "clear", self.clear.clone()),
            ];
        }
        let nav: KeySet = self.next.keys().iter().chain(self.previous.keys()).cloned().collect();
        let jump: KeySet = self.first.keys().iter().chain(self.last.keys()).cloned().collect();
        vec![
            Binding::new("↑/↓", "move", nav),
            Binding::new("home/end", "first/last", jump),
            Binding::new("enter", "select", self.activate.clone()),
            Binding::new("esc", "close", self.close.clone()),
        ]
    }
}
