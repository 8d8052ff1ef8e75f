//! Single-line text field used for the dropdown's search box.
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui_select_core::input::KeyCode;
use ratatui_select_core::input::KeyEvent;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFieldAction {
    None,
    Moved,
    Changed,
}

#[derive(Clone, Debug, Default)]
pub struct SearchField {
    text: String,
    cursor: usize, // char index
    scroll_x: u32, // display columns
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the text and puts the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.char_len();
        self.scroll_x = 0;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> SearchFieldAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.ctrl || key.modifiers.alt || !key.code.is_char() {
                    return SearchFieldAction::None;
                }
                self.insert_char(c);
                SearchFieldAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return SearchFieldAction::None;
                }
                self.cursor -= 1;
                self.remove_at_cursor();
                SearchFieldAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return SearchFieldAction::None;
                }
                self.remove_at_cursor();
                SearchFieldAction::Changed
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.char_len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_len()),
            _ => SearchFieldAction::None,
        }
    }

    /// Inserts pasted text at the caret. Line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) -> SearchFieldAction {
        let mut changed = false;
        for ch in s.chars() {
            let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
            if ch.is_control() && ch != '\t' {
                continue;
            }
            self.insert_char(ch);
            changed = true;
        }
        if changed {
            SearchFieldAction::Changed
        } else {
            SearchFieldAction::None
        }
    }

    /// Caret column relative to the start of the text.
    pub fn cursor_display_x(&self) -> u32 {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0) as u32)
            .sum()
    }

    /// Screen position of the caret when rendered into `area`.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let x = self.cursor_display_x().saturating_sub(self.scroll_x);
        if x >= area.width as u32 {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    pub fn render_ref(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        style: Style,
        placeholder: &str,
        placeholder_style: Style,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.ensure_cursor_visible(area.width);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);
        if self.text.is_empty() {
            render::render_str_clipped(area.x, area.y, 0, area.width, buf, placeholder, placeholder_style);
        } else {
            render::render_str_clipped(area.x, area.y, self.scroll_x, area.width, buf, &self.text, style);
        }
    }

    fn ensure_cursor_visible(&mut self, width: u16) {
        let cx = self.cursor_display_x();
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if cx >= self.scroll_x.saturating_add(width as u32) {
            self.scroll_x = cx.saturating_sub(width.saturating_sub(1) as u32);
        }
    }

    fn move_to(&mut self, cursor: usize) -> SearchFieldAction {
        if cursor == self.cursor {
            return SearchFieldAction::None;
        }
        self.cursor = cursor;
        SearchFieldAction::Moved
    }

    fn insert_char(&mut self, ch: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        let byte_idx = self.byte_index(self.cursor);
        if byte_idx < self.text.len() {
            self.text.remove(byte_idx);
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
