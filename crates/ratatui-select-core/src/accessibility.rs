/// Roles and states a renderer must expose for the trigger and the listbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessibilityState {
    /// Trigger is expanded (dropdown open).
    pub expanded: bool,
    /// Identifier of the listbox the trigger owns.
    pub controls: String,
    pub disabled: bool,
    pub multiselectable: bool,
    /// Index into the full option list of the option announced as active.
    pub active_descendant: Option<usize>,
    /// One entry per visible option, in display order. Empty while closed.
    pub options: Vec<OptionAccessibility>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionAccessibility {
    pub position: usize,
    pub index: usize,
    pub selected: bool,
    pub disabled: bool,
    pub active: bool,
}
