//! Option entries and lookups over an option list.
//!
//! Options are immutable snapshots handed in by the caller; nothing here mutates them. A list may
//! contain several options with the same value. Lookups by value resolve to the *last* such
//! option, so the last duplicate wins for labels and for disabled checks done by value.
use std::collections::BTreeSet;

/// One selectable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
    pub description: Option<String>,
    pub disabled: bool,
    /// Consecutive options with the same group label are rendered under one header.
    pub group_label: Option<String>,
}

impl<T> SelectOption<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            description: None,
            disabled: false,
            group_label: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_group(mut self, group_label: impl Into<String>) -> Self {
        self.group_label = Some(group_label.into());
        self
    }

    /// Text the default filter matches against: the description if present, else the label.
    pub fn search_text(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.label)
    }
}

/// Finds the option carrying `value`. With duplicates the last one wins.
pub fn find_by_value<'a, T: PartialEq>(
    options: &'a [SelectOption<T>],
    value: &T,
) -> Option<(usize, &'a SelectOption<T>)> {
    options
        .iter()
        .enumerate()
        .rev()
        .find(|(_, o)| o.value == *value)
}

/// Indices of options whose value already appeared earlier in the list.
pub fn duplicate_indices<T: Ord>(options: &[SelectOption<T>]) -> Vec<usize> {
    let mut seen: BTreeSet<&T> = BTreeSet::new();
    options
        .iter()
        .enumerate()
        .filter_map(|(i, o)| (!seen.insert(&o.value)).then_some(i))
        .collect()
}

/// A row of the rendered list: either a group header or a visible option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListRow<'a> {
    Header(&'a str),
    /// `position` indexes the filtered list; `index` indexes the full option list.
    Option { position: usize, index: usize },
}

/// Lays out the filtered options as rows, inserting a header whenever the group label changes.
pub fn list_rows<'a, T>(options: &'a [SelectOption<T>], filtered: &[usize]) -> Vec<ListRow<'a>> {
    let mut rows = Vec::with_capacity(filtered.len());
    let mut current: Option<&str> = None;
    for (position, &index) in filtered.iter().enumerate() {
        let Some(option) = options.get(index) else {
            continue;
        };
        let group = option.group_label.as_deref();
        if group != current {
            if let Some(label) = group {
                rows.push(ListRow::Header(label));
            }
            current = group;
        }
        rows.push(ListRow::Option { position, index });
    }
    rows
}
