//! `SelectView`: a ratatui host for [`SelectEngine`].
//!
//! The view owns the engine plus everything the engine deliberately does not: the search text
//! field, the overlay scroll offset, hit-testing of mouse events, and a [`Positioner`] that turns
//! the placement request into terminal cells. Render the view after the rest of the frame so the
//! overlay ends up on top.
use crate::positioner::FlipPositioner;
use crate::render;
use crate::search_field::SearchField;
use crate::search_field::SearchFieldAction;
use crate::theme::Theme;
use crate::viewport::ListViewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::layout::Size;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;
use ratatui_select_core::config::SelectConfig;
use ratatui_select_core::dispatch::FocusContext;
use ratatui_select_core::engine::SelectEngine;
use ratatui_select_core::engine::FocusRequest;
use ratatui_select_core::engine::SelectEvent;
use ratatui_select_core::engine::SelectOutcome;
use ratatui_select_core::engine::SelectedLabel;
use ratatui_select_core::error::SelectError;
use ratatui_select_core::highlight::Navigation;
use ratatui_select_core::input::InputEvent;
use ratatui_select_core::input::MouseEvent;
use ratatui_select_core::input::MouseEventKind;
use ratatui_select_core::option::ListRow;
use ratatui_select_core::placement::Positioner;
use ratatui_select_core::selection::SelectMode;
use unicode_width::UnicodeWidthStr;

/// How the trigger summarizes several selected values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MultiSummary {
    /// Comma-separated labels, truncated to fit.
    #[default]
    Labels,
    /// "N selected" once more than one value is picked.
    Count,
}

#[derive(Clone, Debug)]
pub struct SelectViewOptions {
    pub placeholder: String,
    pub search_placeholder: String,
    pub empty_text: String,
    /// Shown for selected values that match no option.
    pub unknown_label: String,
    pub max_visible: u16,
    pub min_overlay_width: u16,
    pub show_scrollbar: bool,
    pub show_descriptions: bool,
    pub summary: MultiSummary,
    pub selected_marker: String,
    pub unselected_marker: String,
    pub open_indicator: String,
    pub closed_indicator: String,
}

impl Default for SelectViewOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select…".to_string(),
            search_placeholder: "Search…".to_string(),
            empty_text: "No results".to_string(),
            unknown_label: "Unknown".to_string(),
            max_visible: 8,
            min_overlay_width: 12,
            show_scrollbar: true,
            show_descriptions: true,
            summary: MultiSummary::default(),
            selected_marker: "✓ ".to_string(),
            unselected_marker: "  ".to_string(),
            open_indicator: "▴".to_string(),
            closed_indicator: "▾".to_string(),
        }
    }
}

/// Screen regions from the last render, used for hit-testing.
#[derive(Clone, Debug, Default)]
struct HitMap {
    trigger: Rect,
    overlay: Option<Rect>,
    search: Option<Rect>,
    list: Rect,
    /// Filtered position for each visible list row; `None` for headers.
    rows: Vec<Option<usize>>,
}

impl HitMap {
    fn row_at(&self, x: u16, y: u16) -> Option<Option<usize>> {
        if !self.list.contains(Position::new(x, y)) {
            return None;
        }
        self.rows.get((y - self.list.y) as usize).copied()
    }
}

pub struct SelectView<T: Ord> {
    engine: SelectEngine<T>,
    options: SelectViewOptions,
    search: SearchField,
    scroll: ListViewport,
    positioner: Box<dyn Positioner>,
    focused: bool,
    hits: HitMap,
}

impl<T: Ord + Clone> SelectView<T> {
    pub fn new(config: SelectConfig<T>) -> Result<Self, SelectError> {
        Self::with_options(config, SelectViewOptions::default())
    }

    pub fn with_options(
        config: SelectConfig<T>,
        options: SelectViewOptions,
    ) -> Result<Self, SelectError> {
        Ok(Self {
            engine: SelectEngine::new(config)?,
            options,
            search: SearchField::new(),
            scroll: ListViewport::default(),
            positioner: Box::new(FlipPositioner::default()),
            focused: false,
            hits: HitMap::default(),
        })
    }

    pub fn engine(&self) -> &SelectEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SelectEngine<T> {
        &mut self.engine
    }

    pub fn options(&self) -> &SelectViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SelectViewOptions) {
        self.options = options;
    }

    pub fn set_positioner(&mut self, positioner: impl Positioner + 'static) {
        self.positioner = Box::new(positioner);
    }

    /// Whether the host considers this select focused. Only affects styling.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    fn search_focused(&self) -> bool {
        self.engine.is_open() && self.engine.focus_context() == FocusContext::Search
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> SelectOutcome<T> {
        let out = match event {
            InputEvent::Key(key) => {
                let out = self.engine.handle_key(key);
                if out.handled || !self.search_focused() {
                    out
                } else {
                    self.edit_search(|f| f.handle_key(key))
                }
            }
            InputEvent::Paste(text) if self.search_focused() => {
                self.edit_search(|f| f.insert_str(text))
            }
            InputEvent::Mouse(m) => self.handle_mouse(m),
            other => self.engine.handle_event(other),
        };
        self.sync_search();
        if out.events.contains(&SelectEvent::Opened) {
            self.scroll.to_top();
        }
        out
    }

    /// Runs effects deferred to the next tick (focusing the search field after opening).
    /// Call after drawing the frame that followed the event.
    pub fn run_deferred(&mut self) -> Option<FocusRequest> {
        let request = self.engine.run_deferred();
        if request == Some(FocusRequest::Search) {
            let text = self.engine.search_text();
            self.search.set_text(text);
        }
        request
    }

    fn edit_search(
        &mut self,
        edit: impl FnOnce(&mut SearchField) -> SearchFieldAction,
    ) -> SelectOutcome<T> {
        match edit(&mut self.search) {
            SearchFieldAction::Changed => {
                self.scroll.to_top();
                let mut out = self.engine.set_search_text(self.search.text());
                out.handled = true;
                out.redraw = true;
                out
            }
            SearchFieldAction::Moved => SelectOutcome::consumed(true),
            SearchFieldAction::None => SelectOutcome::ignored(),
        }
    }

    fn sync_search(&mut self) {
        if self.engine.search_text() != self.search.text() {
            self.search.set_text(self.engine.search_text());
        }
    }

    fn handle_mouse(&mut self, m: &MouseEvent) -> SelectOutcome<T> {
        let at = m.position();
        let in_overlay = self.hits.overlay.is_some_and(|o| o.contains(at));
        match m.kind {
            _ if m.is_primary_press() => {
                if self.hits.trigger.contains(at) {
                    self.engine.set_focus(FocusContext::Trigger);
                    return self.engine.toggle();
                }
                if !self.engine.is_open() {
                    return SelectOutcome::ignored();
                }
                if !in_overlay {
                    return self.engine.dismiss();
                }
                if self.hits.search.is_some_and(|s| s.contains(at)) {
                    self.engine.set_focus(FocusContext::Search);
                    return SelectOutcome::consumed(true);
                }
                match self.hits.row_at(m.x, m.y) {
                    Some(Some(position)) => self.engine.click_option(position),
                    _ => SelectOutcome::consumed(false),
                }
            }
            MouseEventKind::Moved if in_overlay => match self.hits.row_at(m.x, m.y) {
                Some(Some(position)) => self.engine.hover(position),
                _ => SelectOutcome::consumed(false),
            },
            MouseEventKind::ScrollDown if in_overlay => self.engine.navigate(Navigation::Next),
            MouseEventKind::ScrollUp if in_overlay => self.engine.navigate(Navigation::Previous),
            MouseEventKind::Down(_) if self.engine.is_open() && !in_overlay => {
                self.engine.dismiss()
            }
            _ => SelectOutcome::ignored(),
        }
    }

    /// Trigger text, or `None` when nothing is selected.
    pub fn display_text(&self) -> Option<String> {
        let labels = self.engine.selected_labels();
        if labels.is_empty() {
            return None;
        }
        let text_of = |l: &SelectedLabel<'_>| match l {
            SelectedLabel::Known(s) => s.to_string(),
            SelectedLabel::Unknown => self.options.unknown_label.clone(),
        };
        match (self.engine.mode(), self.options.summary) {
            (SelectMode::Multiple, MultiSummary::Count) if labels.len() > 1 => {
                Some(format!("{} selected", labels.len()))
            }
            (SelectMode::Single, _) => labels.first().map(text_of),
            (SelectMode::Multiple, _) => {
                Some(labels.iter().map(text_of).collect::<Vec<_>>().join(", "))
            }
        }
    }

    /// Caret position of the search field while it has focus.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        if !self.search_focused() {
            return None;
        }
        self.search.cursor_pos(self.hits.search?)
    }

    pub fn render(&mut self, trigger: Rect, boundary: Rect, buf: &mut Buffer, theme: &Theme) {
        let _span = tracing::trace_span!(
            "select_render",
            open = self.engine.is_open(),
            x = trigger.x,
            y = trigger.y,
            w = trigger.width
        )
        .entered();

        self.render_trigger(trigger, buf, theme);
        self.render_overlay(trigger, boundary, buf, theme);
    }

    pub fn render_trigger(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.hits.trigger = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = if self.engine.is_disabled() {
            theme.disabled
        } else if self.focused || self.engine.is_open() {
            theme.trigger_focused
        } else {
            theme.trigger
        };
        buf.set_style(area, base);

        let indicator = if self.engine.is_open() {
            &self.options.open_indicator
        } else {
            &self.options.closed_indicator
        };
        let indicator_w = UnicodeWidthStr::width(indicator.as_str()) as u16;
        let text_w = area.width.saturating_sub(indicator_w + 1);
        let y = area.y + area.height / 2;

        let (text, style) = match self.display_text() {
            Some(text) => {
                let stale = self
                    .engine
                    .selected_labels()
                    .iter()
                    .any(|l| *l == SelectedLabel::Unknown);
                (text, if stale { base.patch(theme.danger) } else { base })
            }
            None => (self.options.placeholder.clone(), base.patch(theme.text_muted)),
        };
        let text = render::truncate_with_ellipsis(&text, text_w);
        render::render_str_clipped(area.x, y, 0, text_w, buf, &text, style);
        if area.width > indicator_w {
            let x = area.x + area.width - indicator_w;
            render::render_str_clipped(x, y, 0, indicator_w, buf, indicator, base);
        }
    }

    fn desired_size(&self, trigger: Rect) -> Size {
        let marker_w = UnicodeWidthStr::width(self.options.selected_marker.as_str())
            .max(UnicodeWidthStr::width(self.options.unselected_marker.as_str()));
        let label_w = self
            .engine
            .filtered_options()
            .map(|o| UnicodeWidthStr::width(o.label.as_str()))
            .max()
            .unwrap_or(UnicodeWidthStr::width(self.options.empty_text.as_str()));
        let chrome = 2 + usize::from(self.options.show_scrollbar);
        let width = (marker_w + label_w + chrome).min(u16::MAX as usize) as u16;
        let width = width.max(trigger.width).max(self.options.min_overlay_width);

        let rows = self.engine.rows().len().max(1);
        let list_h = rows.min(self.options.max_visible.max(1) as usize) as u16;
        let search_h = u16::from(self.engine.is_searchable());
        Size::new(width, list_h + search_h + 2)
    }

    pub fn render_overlay(&mut self, trigger: Rect, boundary: Rect, buf: &mut Buffer, theme: &Theme) {
        self.hits.overlay = None;
        self.hits.search = None;
        self.hits.rows.clear();
        if !self.engine.is_open() {
            return;
        }

        let desired = self.desired_size(trigger);
        self.engine.set_anchor(trigger);
        self.engine.set_boundary(boundary);
        self.engine.set_overlay_size(desired);
        let Some(placed) = self.engine.update_placement(self.positioner.as_mut()) else {
            return;
        };
        let area = placed.area.intersection(boundary);
        if area.width < 3 || area.height < 3 {
            return;
        }
        self.hits.overlay = Some(area);

        Clear.render(area, buf);
        buf.set_style(area, theme.overlay);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);
        let mut inner = block.inner(area);
        block.render(area, buf);

        if self.engine.is_searchable() && inner.height > 1 {
            let search_area = Rect::new(inner.x, inner.y, inner.width, 1);
            let style = if self.search_focused() {
                theme.text_primary
            } else {
                theme.text_muted
            };
            self.search.render_ref(
                search_area,
                buf,
                style,
                &self.options.search_placeholder,
                theme.text_muted,
            );
            self.hits.search = Some(search_area);
            inner = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        }
        self.render_list(inner, buf, theme);
    }

    fn render_list(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let rows = self.engine.rows();
        let (list, scrollbar_x) = if self.options.show_scrollbar
            && area.width >= 2
            && rows.len() > area.height as usize
        {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };
        self.hits.list = list;

        if rows.is_empty() {
            render::render_str_clipped(
                list.x,
                list.y,
                0,
                list.width,
                buf,
                &self.options.empty_text,
                theme.text_muted,
            );
            return;
        }

        self.scroll.set_viewport(list.height as usize);
        self.scroll.set_content(rows.len());
        let highlighted = self.engine.highlighted_index();
        if let Some(row) = rows.iter().position(
            |r| matches!(r, ListRow::Option { position, .. } if Some(*position) == highlighted),
        ) {
            // Keep the group header above the first option visible too.
            if row == 1 && matches!(rows[0], ListRow::Header(_)) {
                self.scroll.ensure_visible(0);
            }
            self.scroll.ensure_visible(row);
        }

        let options = self.engine.options();
        for (dy, row) in rows[self.scroll.visible_rows()].iter().enumerate() {
            let y = list.y + dy as u16;
            match *row {
                ListRow::Header(label) => {
                    self.hits.rows.push(None);
                    let text = render::truncate_with_ellipsis(label, list.width);
                    render::render_str_clipped(list.x, y, 0, list.width, buf, &text, theme.group_header);
                }
                ListRow::Option { position, index } => {
                    self.hits.rows.push(Some(position));
                    let Some(option) = options.get(index) else {
                        continue;
                    };
                    let selected = self.engine.is_selected(option);
                    let mut style = if option.disabled {
                        theme.disabled
                    } else if selected {
                        theme.selected
                    } else {
                        theme.text_primary
                    };
                    if highlighted == Some(position) {
                        style = style.patch(theme.highlighted);
                    }
                    let line = Rect::new(list.x, y, list.width, 1);
                    buf.set_style(line, style);

                    let marker = if selected {
                        &self.options.selected_marker
                    } else {
                        &self.options.unselected_marker
                    };
                    let mut x = list.x;
                    let mut room = list.width;
                    let used = render::render_str_clipped(x, y, 0, room, buf, marker, style);
                    x += used;
                    room -= used;
                    let label = render::truncate_with_ellipsis(&option.label, room);
                    let used = render::render_str_clipped(x, y, 0, room, buf, &label, style);
                    x += used;
                    room -= used;
                    if let (true, Some(desc)) =
                        (self.options.show_descriptions, option.description.as_deref())
                    {
                        if room > 4 {
                            let desc = render::truncate_with_ellipsis(desc, room - 2);
                            let muted: Style = style.patch(theme.text_muted);
                            render::render_str_clipped(x + 2, y, 0, room - 2, buf, &desc, muted);
                        }
                    }
                }
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &self.scroll,
                theme.border,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_select_core::input::KeyCode;
    use ratatui_select_core::input::KeyEvent;
    use ratatui_select_core::option::SelectOption;
    use ratatui_select_core::selection::SelectValue;

    fn fruit() -> Vec<SelectOption<u32>> {
        vec![
            SelectOption::new(1, "Apple"),
            SelectOption::new(2, "Banana"),
            SelectOption::new(3, "Cherry"),
        ]
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    #[test]
    fn display_text_summaries() {
        let v = SelectView::new(
            SelectConfig::new(fruit())
                .multiple()
                .default_value(SelectValue::multiple([3, 1])),
        )
        .unwrap();
        assert_eq!(v.display_text().as_deref(), Some("Apple, Cherry"));

        let v = SelectView::with_options(
            SelectConfig::new(fruit())
                .multiple()
                .default_value(SelectValue::multiple([3, 1])),
            SelectViewOptions {
                summary: MultiSummary::Count,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(v.display_text().as_deref(), Some("2 selected"));

        let v = SelectView::new(SelectConfig::new(fruit()).default_value(SelectValue::single(9)))
            .unwrap();
        assert_eq!(v.display_text().as_deref(), Some("Unknown"));
    }

    #[test]
    fn typing_goes_to_search_field_after_deferred_focus() {
        let mut v = SelectView::new(SelectConfig::new(fruit()).searchable(true)).unwrap();
        v.handle_event(&key(KeyCode::Enter));
        // Before the deferred focus runs, characters are not ours.
        assert!(!v.handle_event(&key(KeyCode::Char('c'))).handled);
        v.run_deferred();
        assert!(v.handle_event(&key(KeyCode::Char('c'))).handled);
        v.handle_event(&key(KeyCode::Char('h')));
        assert_eq!(v.search_text(), "ch");
        assert_eq!(v.engine().filtered_indices(), &[2]);

        v.handle_event(&key(KeyCode::Esc));
        assert_eq!(v.search_text(), "");
        assert!(!v.engine().is_open());
    }

    #[test]
    fn home_moves_caret_not_highlight_in_search() {
        let mut v = SelectView::new(SelectConfig::new(fruit()).searchable(true)).unwrap();
        v.handle_event(&key(KeyCode::Enter));
        v.run_deferred();
        v.handle_event(&key(KeyCode::End));
        v.handle_event(&key(KeyCode::Down));
        v.handle_event(&key(KeyCode::Char('a')));
        v.handle_event(&key(KeyCode::Home));
        assert_eq!(v.search_text(), "a");
        assert_eq!(v.engine().highlighted_index(), Some(0));
    }

    #[test]
    fn paste_into_search_filters() {
        let mut v = SelectView::new(SelectConfig::new(fruit()).searchable(true)).unwrap();
        v.handle_event(&key(KeyCode::Enter));
        v.run_deferred();
        v.handle_event(&InputEvent::Paste("an".to_string()));
        assert_eq!(v.engine().filtered_indices(), &[1]);
    }
}
