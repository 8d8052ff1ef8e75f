use crate::dispatch::SelectBindings;
use crate::filter::FilterFn;
use crate::option::SelectOption;
use crate::placement::PlacementPreference;
use crate::selection::SelectMode;
use crate::selection::SelectValue;
use std::sync::Arc;

pub const DEFAULT_LISTBOX_ID: &str = "select-listbox";

/// Construction inputs for [`SelectEngine`](crate::engine::SelectEngine).
///
/// `value` makes the select controlled: the caller owns the value and gets change proposals.
/// Without it the select owns its value, starting from `default_value`.
#[derive(Clone)]
pub struct SelectConfig<T: Ord> {
    pub options: Vec<SelectOption<T>>,
    pub mode: SelectMode,
    pub value: Option<SelectValue<T>>,
    pub default_value: Option<SelectValue<T>>,
    pub searchable: bool,
    pub disabled: bool,
    pub clearable: bool,
    pub placement: PlacementPreference,
    pub filter: Option<FilterFn<T>>,
    pub bindings: SelectBindings,
    pub listbox_id: String,
}

impl<T: Ord> Default for SelectConfig<T> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            mode: SelectMode::Single,
            value: None,
            default_value: None,
            searchable: false,
            disabled: false,
            clearable: false,
            placement: PlacementPreference::Auto,
            filter: None,
            bindings: SelectBindings::default(),
            listbox_id: DEFAULT_LISTBOX_ID.to_string(),
        }
    }
}

impl<T: Ord> SelectConfig<T> {
    pub fn new(options: Vec<SelectOption<T>>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn mode(mut self, mode: SelectMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn multiple(self) -> Self {
        self.mode(SelectMode::Multiple)
    }

    pub fn value(mut self, value: SelectValue<T>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn default_value(mut self, value: SelectValue<T>) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn placement(mut self, placement: PlacementPreference) -> Self {
        self.placement = placement;
        self
    }

    pub fn filter(
        mut self,
        f: impl Fn(&SelectOption<T>, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    pub fn bindings(mut self, bindings: SelectBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn listbox_id(mut self, id: impl Into<String>) -> Self {
        self.listbox_id = id.into();
        self
    }
}
