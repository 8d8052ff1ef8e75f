//! The select engine: one object owning selection, lifecycle and highlight for one select.
//!
//! Every entry point is synchronous and total. It applies the whole transition for one user event
//! and returns a [`SelectOutcome`] describing what the host should do next (redraw, move focus,
//! forward notifications). Nothing here knows about rendering.
use crate::accessibility::AccessibilityState;
use crate::accessibility::OptionAccessibility;
use crate::config::SelectConfig;
use crate::dispatch::Command;
use crate::dispatch::FocusContext;
use crate::dispatch::SelectBindings;
use crate::error::SelectError;
use crate::filter;
use crate::filter::FilterFn;
use crate::highlight::HighlightCursor;
use crate::highlight::Navigation;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::lifecycle::CloseReason;
use crate::lifecycle::DropdownLifecycle;
use crate::lifecycle::Lifecycle;
use crate::option;
use crate::option::ListRow;
use crate::option::SelectOption;
use crate::placement::PlacementAdapter;
use crate::placement::PlacementPreference;
use crate::placement::Positioner;
use crate::placement::ResolvedPlacement;
use crate::selection::Authority;
use crate::selection::SelectMode;
use crate::selection::SelectValue;
use crate::selection::SelectionState;
use ratatui::layout::Rect;
use ratatui::layout::Size;

/// Notifications for the caller, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectEvent<T: Ord> {
    /// The value changed (internal authority) or a change is proposed (external authority).
    Changed(SelectValue<T>),
    Opened,
    Closed,
}

/// Where keyboard focus should go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusRequest {
    Trigger,
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOutcome<T: Ord> {
    /// The engine consumed the event.
    pub handled: bool,
    /// The host should suppress its default handling. `false` for `Tab` so focus can move on.
    pub prevent_default: bool,
    pub redraw: bool,
    pub events: Vec<SelectEvent<T>>,
    /// Immediate focus move. Deferred moves come out of [`SelectEngine::run_deferred`].
    pub focus: Option<FocusRequest>,
}

impl<T: Ord> Default for SelectOutcome<T> {
    fn default() -> Self {
        Self {
            handled: false,
            prevent_default: false,
            redraw: false,
            events: Vec::new(),
            focus: None,
        }
    }
}

impl<T: Ord> SelectOutcome<T> {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed(redraw: bool) -> Self {
        Self {
            handled: true,
            prevent_default: true,
            redraw,
            ..Self::default()
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.handled |= other.handled;
        self.prevent_default |= other.prevent_default;
        self.redraw |= other.redraw;
        self.events.extend(other.events);
        if other.focus.is_some() {
            self.focus = other.focus;
        }
        self
    }

    pub fn changed(&self) -> Option<&SelectValue<T>> {
        self.events.iter().rev().find_map(|e| match e {
            SelectEvent::Changed(v) => Some(v),
            _ => None,
        })
    }
}

/// Label of one selected value, for the trigger's display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectedLabel<'a> {
    Known(&'a str),
    /// The value no longer matches any option.
    Unknown,
}

pub struct SelectEngine<T: Ord> {
    options: Vec<SelectOption<T>>,
    filtered: Vec<usize>,
    filter: Option<FilterFn<T>>,
    search: String,
    selection: SelectionState<T>,
    lifecycle: DropdownLifecycle,
    cursor: HighlightCursor,
    placement: PlacementAdapter,
    bindings: SelectBindings,
    focus: FocusContext,
    deferred: Option<FocusRequest>,
    searchable: bool,
    disabled: bool,
    clearable: bool,
    listbox_id: String,
}

impl<T: Ord + Clone> SelectEngine<T> {
    pub fn new(config: SelectConfig<T>) -> Result<Self, SelectError> {
        let selection = SelectionState::new(config.mode, config.value, config.default_value)?;
        let mut engine = Self {
            options: Vec::new(),
            filtered: Vec::new(),
            filter: config.filter,
            search: String::new(),
            selection,
            lifecycle: DropdownLifecycle::default(),
            cursor: HighlightCursor::default(),
            placement: PlacementAdapter::new(config.placement),
            bindings: config.bindings,
            focus: FocusContext::Trigger,
            deferred: None,
            searchable: config.searchable,
            disabled: config.disabled,
            clearable: config.clearable,
            listbox_id: config.listbox_id,
        };
        engine.set_options(config.options);
        Ok(engine)
    }

    // ---- options & filtering ------------------------------------------------------------

    /// Replaces the option snapshot. The highlight resets if the visible list changed shape.
    pub fn set_options(&mut self, options: Vec<SelectOption<T>>) {
        let duplicates = option::duplicate_indices(&options);
        if !duplicates.is_empty() {
            tracing::warn!(
                count = duplicates.len(),
                "duplicate option values; lookups resolve to the last duplicate"
            );
        }
        let filtered = filter::filter_indices(&options, &self.search, self.filter.as_ref());
        let shape_changed = filtered.len() != self.filtered.len()
            || filtered
                .iter()
                .zip(&self.filtered)
                .any(|(&new, &old)| match self.options.get(old) {
                    Some(prev) => prev.value != options[new].value,
                    None => true,
                });
        self.options = options;
        self.filtered = filtered;
        if shape_changed && self.lifecycle.is_open() {
            self.cursor.reset(self.filtered.len());
        }
        self.trace_stale_values();
    }

    pub fn options(&self) -> &[SelectOption<T>] {
        &self.options
    }

    /// Indices into [`options`](Self::options) of the visible options, in order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_options(&self) -> impl Iterator<Item = &SelectOption<T>> {
        self.filtered.iter().filter_map(|&i| self.options.get(i))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The visible option at `position` in the filtered list.
    pub fn filtered_option(&self, position: usize) -> Option<&SelectOption<T>> {
        self.filtered
            .get(position)
            .and_then(|&i| self.options.get(i))
    }

    /// Visible options laid out with group headers.
    pub fn rows(&self) -> Vec<ListRow<'_>> {
        option::list_rows(&self.options, &self.filtered)
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Updates the search text. Ignored unless the select is searchable and open.
    pub fn set_search_text(&mut self, text: &str) -> SelectOutcome<T> {
        if !self.searchable || !self.lifecycle.is_open() || self.search == text {
            return SelectOutcome::ignored();
        }
        self.search.clear();
        self.search.push_str(text);
        self.refilter();
        self.cursor.reset(self.filtered.len());
        tracing::trace!(visible = self.filtered.len(), "search text changed");
        SelectOutcome::consumed(true)
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.options, &self.search, self.filter.as_ref());
    }

    // ---- highlight ------------------------------------------------------------------------

    pub fn highlighted_index(&self) -> Option<usize> {
        self.cursor.valid(self.filtered.len())
    }

    pub fn highlighted_option(&self) -> Option<&SelectOption<T>> {
        self.highlighted_index()
            .and_then(|p| self.filtered_option(p))
    }

    pub fn navigate(&mut self, nav: Navigation) -> SelectOutcome<T> {
        if !self.lifecycle.is_open() {
            return SelectOutcome::ignored();
        }
        let moved = self.cursor.navigate(nav, self.filtered.len());
        SelectOutcome::consumed(moved)
    }

    /// Pointer hover over the visible option at `position`.
    pub fn hover(&mut self, position: usize) -> SelectOutcome<T> {
        if !self.lifecycle.is_open() {
            return SelectOutcome::ignored();
        }
        let moved = self.cursor.set_explicit(position, self.filtered.len());
        SelectOutcome::consumed(moved)
    }

    // ---- lifecycle ------------------------------------------------------------------------

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.state()
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_clearable(&self) -> bool {
        self.clearable
    }

    pub fn set_disabled(&mut self, disabled: bool) -> SelectOutcome<T> {
        self.disabled = disabled;
        if disabled {
            return self.close(CloseReason::Disabled);
        }
        SelectOutcome::ignored()
    }

    /// `closed -> open`. No-op when already open or disabled.
    pub fn open(&mut self) -> SelectOutcome<T> {
        if self.disabled {
            tracing::trace!("ignoring activation of a disabled select");
            return SelectOutcome::ignored();
        }
        if !self.lifecycle.open() {
            return SelectOutcome::consumed(false);
        }
        self.search.clear();
        self.refilter();
        self.cursor.reset(self.filtered.len());
        self.focus = FocusContext::Trigger;
        if self.searchable {
            self.deferred = Some(FocusRequest::Search);
        }
        self.placement.activate();
        let mut out = SelectOutcome::consumed(true);
        out.events.push(SelectEvent::Opened);
        out
    }

    /// `open -> closed`. Focus returns to the trigger.
    pub fn close(&mut self, reason: CloseReason) -> SelectOutcome<T> {
        if !self.lifecycle.close(reason) {
            return SelectOutcome::ignored();
        }
        self.search.clear();
        self.refilter();
        self.cursor.clear();
        self.focus = FocusContext::Trigger;
        self.deferred = None;
        self.placement.deactivate();
        let mut out = SelectOutcome::consumed(true);
        out.prevent_default = reason != CloseReason::Tab;
        out.focus = Some(FocusRequest::Trigger);
        out.events.push(SelectEvent::Closed);
        out
    }

    /// Trigger click.
    pub fn toggle(&mut self) -> SelectOutcome<T> {
        if self.lifecycle.is_open() {
            self.close(CloseReason::Toggle)
        } else {
            self.open()
        }
    }

    /// Any interaction outside trigger and overlay.
    pub fn dismiss(&mut self) -> SelectOutcome<T> {
        self.close(CloseReason::Outside)
    }

    // ---- focus ----------------------------------------------------------------------------

    pub fn focus_context(&self) -> FocusContext {
        self.focus
    }

    /// Host reports where focus went.
    pub fn set_focus(&mut self, focus: FocusContext) {
        self.focus = match focus {
            FocusContext::Search if !(self.searchable && self.lifecycle.is_open()) => {
                FocusContext::Trigger
            }
            other => other,
        };
    }

    /// Releases side effects scheduled for the next tick. Call once after the current handler
    /// returned and the frame containing the search field exists.
    pub fn run_deferred(&mut self) -> Option<FocusRequest> {
        let request = self.deferred.take()?;
        match request {
            FocusRequest::Search if self.searchable && self.lifecycle.is_open() => {
                self.focus = FocusContext::Search;
                Some(FocusRequest::Search)
            }
            FocusRequest::Search => None,
            FocusRequest::Trigger => {
                self.focus = FocusContext::Trigger;
                Some(FocusRequest::Trigger)
            }
        }
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    // ---- selection ------------------------------------------------------------------------

    pub fn mode(&self) -> SelectMode {
        self.selection.mode()
    }

    pub fn authority(&self) -> Authority {
        self.selection.authority()
    }

    pub fn value(&self) -> &SelectValue<T> {
        self.selection.value()
    }

    pub fn is_selected(&self, option: &SelectOption<T>) -> bool {
        self.selection.is_selected(option)
    }

    /// Pushes the caller's value into a controlled select.
    pub fn set_value(&mut self, value: SelectValue<T>) -> Result<(), SelectError> {
        self.selection.set_controlled(value)?;
        self.trace_stale_values();
        Ok(())
    }

    /// Picks `option`. Single mode closes the dropdown afterwards; multiple mode stays open.
    /// Disabled options and a disabled select are ignored. With duplicate values the last option
    /// carrying the value decides whether it is disabled.
    pub fn select(&mut self, option: &SelectOption<T>) -> SelectOutcome<T> {
        let value_disabled = option::find_by_value(&self.options, &option.value)
            .is_some_and(|(_, winner)| winner.disabled);
        if self.disabled || option.disabled || value_disabled {
            tracing::trace!("ignoring selection while disabled");
            return SelectOutcome::ignored();
        }
        let mut out = SelectOutcome::consumed(false);
        if let Some(change) = self.selection.select(option) {
            out.redraw = true;
            out.events.push(SelectEvent::Changed(change.proposed));
        }
        if self.selection.mode() == SelectMode::Single {
            out = out.merge(self.close(CloseReason::Commit));
        }
        out
    }

    /// Picks the visible option at `position`.
    pub fn select_position(&mut self, position: usize) -> SelectOutcome<T> {
        match self.filtered_option(position).cloned() {
            Some(option) => self.select(&option),
            None => SelectOutcome::ignored(),
        }
    }

    /// Commits the highlighted option. No-op without a valid highlight or on a disabled option;
    /// the key counts as handled either way.
    pub fn commit_highlighted(&mut self) -> SelectOutcome<T> {
        let out = match self.highlighted_index() {
            Some(position) => self.select_position(position),
            None => SelectOutcome::ignored(),
        };
        if out.handled {
            out
        } else {
            SelectOutcome::consumed(false)
        }
    }

    /// Pointer click on the visible option at `position`.
    pub fn click_option(&mut self, position: usize) -> SelectOutcome<T> {
        let hovered = self.hover(position);
        if !hovered.handled {
            return hovered;
        }
        hovered.merge(self.select_position(position))
    }

    pub fn clear(&mut self) -> SelectOutcome<T> {
        if self.disabled {
            return SelectOutcome::ignored();
        }
        match self.selection.clear() {
            Some(change) => {
                let mut out = SelectOutcome::consumed(true);
                out.events.push(SelectEvent::Changed(change.proposed));
                out
            }
            None => SelectOutcome::consumed(false),
        }
    }

    /// Labels of the selected values in option order; values without an option come last.
    pub fn selected_labels(&self) -> Vec<SelectedLabel<'_>> {
        let mut known: Vec<(usize, &str)> = Vec::new();
        let mut unknown = 0;
        for v in self.selection.value().values() {
            match option::find_by_value(&self.options, v) {
                Some((i, o)) => known.push((i, o.label.as_str())),
                None => unknown += 1,
            }
        }
        known.sort_by_key(|(i, _)| *i);
        known
            .into_iter()
            .map(|(_, l)| SelectedLabel::Known(l))
            .chain(std::iter::repeat_n(SelectedLabel::Unknown, unknown))
            .collect()
    }

    fn trace_stale_values(&self) {
        let stale = self
            .selection
            .value()
            .values()
            .filter(|v| option::find_by_value(&self.options, v).is_none())
            .count();
        if stale > 0 {
            tracing::trace!(stale, "selected values without a matching option");
        }
    }

    // ---- keyboard -------------------------------------------------------------------------

    pub fn bindings(&self) -> &SelectBindings {
        &self.bindings
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> SelectOutcome<T> {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::FocusLost => self.dismiss(),
            InputEvent::Paste(_) | InputEvent::Mouse(_) => SelectOutcome::ignored(),
        }
    }

    /// Dispatches a key according to the current focus context. Unknown keys are left alone.
    pub fn handle_key(&mut self, key: &KeyEvent) -> SelectOutcome<T> {
        if self.disabled {
            return SelectOutcome::ignored();
        }
        let open = self.lifecycle.is_open();
        let Some(command) = self.bindings.command_for(key, self.focus, open) else {
            return SelectOutcome::ignored();
        };
        tracing::trace!(?command, open, context = ?self.focus, "key command");
        match command {
            Command::Activate if open => self.commit_highlighted(),
            Command::Activate => self.open(),
            Command::Move(_) if !open => self.open(),
            Command::Move(nav) => self.navigate(nav),
            Command::Commit => self.commit_highlighted(),
            Command::Close => self.close(CloseReason::Escape),
            Command::TabOut => self.close(CloseReason::Tab),
            Command::Clear if self.clearable => self.clear(),
            Command::Clear => SelectOutcome::ignored(),
        }
    }

    // ---- placement ------------------------------------------------------------------------

    pub fn placement_preference(&self) -> PlacementPreference {
        self.placement.preference()
    }

    /// Records the trigger rectangle. Cheap to call every frame.
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.placement.set_anchor(anchor);
    }

    /// Records the collision boundary (the viewport).
    pub fn set_boundary(&mut self, boundary: Rect) {
        self.placement.set_boundary(boundary);
    }

    pub fn set_overlay_size(&mut self, size: Size) {
        self.placement.set_desired_size(size);
    }

    /// Asks `positioner` for coordinates when something changed. `None` while closed.
    pub fn update_placement(&mut self, positioner: &mut dyn Positioner) -> Option<ResolvedPlacement> {
        self.placement.update(positioner)
    }

    pub fn resolved_placement(&self) -> Option<ResolvedPlacement> {
        self.placement.resolved()
    }

    // ---- accessibility --------------------------------------------------------------------

    pub fn accessibility(&self) -> AccessibilityState {
        let open = self.lifecycle.is_open();
        let active = self.highlighted_index();
        let options = if open {
            self.filtered
                .iter()
                .enumerate()
                .filter_map(|(position, &index)| {
                    let o = self.options.get(index)?;
                    Some(OptionAccessibility {
                        position,
                        index,
                        selected: self.selection.is_selected(o),
                        disabled: o.disabled,
                        active: active == Some(position),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };
        AccessibilityState {
            expanded: open,
            controls: self.listbox_id.clone(),
            disabled: self.disabled,
            multiselectable: self.selection.mode() == SelectMode::Multiple,
            active_descendant: if open {
                active.and_then(|p| self.filtered.get(p).copied())
            } else {
                None
            },
            options,
        }
    }
}
