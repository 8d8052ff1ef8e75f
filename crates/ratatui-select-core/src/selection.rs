//! Selected value(s) and who owns them.
//!
//! A select is either *internal* (it owns its value and commits changes itself) or *external*
//! (the caller owns the value; the select only proposes changes and waits for the caller to push
//! the next value back with [`SelectionState::set_controlled`]). The authority is fixed at
//! construction.
use crate::error::SelectError;
use crate::option::SelectOption;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    #[default]
    Single,
    Multiple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectValue<T: Ord> {
    Single(Option<T>),
    Multiple(BTreeSet<T>),
}

impl<T: Ord + Clone> SelectValue<T> {
    pub fn empty(mode: SelectMode) -> Self {
        match mode {
            SelectMode::Single => Self::Single(None),
            SelectMode::Multiple => Self::Multiple(BTreeSet::new()),
        }
    }

    pub fn single(value: T) -> Self {
        Self::Single(Some(value))
    }

    pub fn multiple(values: impl IntoIterator<Item = T>) -> Self {
        Self::Multiple(values.into_iter().collect())
    }

    pub fn mode(&self) -> SelectMode {
        match self {
            Self::Single(_) => SelectMode::Single,
            Self::Multiple(_) => SelectMode::Multiple,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Single(v) => v.as_ref() == Some(value),
            Self::Multiple(set) => set.contains(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(v) => v.is_none(),
            Self::Multiple(set) => set.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(v) => usize::from(v.is_some()),
            Self::Multiple(set) => set.len(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        let (single, multiple) = match self {
            Self::Single(v) => (v.as_ref(), None),
            Self::Multiple(set) => (None, Some(set.iter())),
        };
        single.into_iter().chain(multiple.into_iter().flatten())
    }

    /// The value after picking `value`: replaced in single mode, toggled in multiple mode.
    pub fn picked(&self, value: &T) -> Self {
        match self {
            Self::Single(_) => Self::Single(Some(value.clone())),
            Self::Multiple(set) => {
                let mut next = set.clone();
                if !next.remove(value) {
                    next.insert(value.clone());
                }
                Self::Multiple(next)
            }
        }
    }

    pub fn cleared(&self) -> Self {
        Self::empty(self.mode())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    Internal,
    External,
}

/// Result of a selection operation that was not ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChange<T: Ord> {
    /// The value the select wants to move to.
    pub proposed: SelectValue<T>,
    /// `true` when the select applied it itself (internal authority).
    pub committed: bool,
}

#[derive(Clone, Debug)]
pub struct SelectionState<T: Ord> {
    mode: SelectMode,
    authority: Authority,
    value: SelectValue<T>,
}

impl<T: Ord + Clone> SelectionState<T> {
    /// Resolves authority once: a controlled value makes the state external, otherwise the
    /// state owns `default_value` (or an empty value).
    pub fn new(
        mode: SelectMode,
        controlled: Option<SelectValue<T>>,
        default_value: Option<SelectValue<T>>,
    ) -> Result<Self, SelectError> {
        for v in controlled.iter().chain(default_value.iter()) {
            check_mode(mode, v)?;
        }
        let (authority, value) = match controlled {
            Some(v) => (Authority::External, v),
            None => (
                Authority::Internal,
                default_value.unwrap_or_else(|| SelectValue::empty(mode)),
            ),
        };
        Ok(Self {
            mode,
            authority,
            value,
        })
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn value(&self) -> &SelectValue<T> {
        &self.value
    }

    pub fn is_selected(&self, option: &SelectOption<T>) -> bool {
        self.value.contains(&option.value)
    }

    /// Picks `option`. Disabled options are ignored. Returns `None` when nothing would change.
    pub fn select(&mut self, option: &SelectOption<T>) -> Option<SelectionChange<T>> {
        if option.disabled {
            tracing::trace!("ignoring selection of a disabled option");
            return None;
        }
        let proposed = self.value.picked(&option.value);
        self.propose(proposed)
    }

    pub fn clear(&mut self) -> Option<SelectionChange<T>> {
        let proposed = self.value.cleared();
        self.propose(proposed)
    }

    /// Pushes the caller's value into an externally owned state.
    pub fn set_controlled(&mut self, value: SelectValue<T>) -> Result<(), SelectError> {
        if self.authority != Authority::External {
            return Err(SelectError::NotControlled);
        }
        check_mode(self.mode, &value)?;
        self.value = value;
        Ok(())
    }

    fn propose(&mut self, proposed: SelectValue<T>) -> Option<SelectionChange<T>> {
        if proposed == self.value {
            return None;
        }
        let committed = self.authority == Authority::Internal;
        if committed {
            self.value = proposed.clone();
        }
        tracing::debug!(
            committed,
            selected = proposed.len(),
            "selection change proposed"
        );
        Some(SelectionChange {
            proposed,
            committed,
        })
    }
}

fn check_mode<T: Ord + Clone>(mode: SelectMode, value: &SelectValue<T>) -> Result<(), SelectError> {
    if value.mode() == mode {
        Ok(())
    } else {
        Err(SelectError::ModeMismatch {
            mode,
            value: value.mode(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(v: u32) -> SelectOption<u32> {
        SelectOption::new(v, format!("#{v}"))
    }

    #[test]
    fn single_select_replaces_value() {
        let mut s = SelectionState::new(SelectMode::Single, None, None).unwrap();
        s.select(&opt(1));
        let change = s.select(&opt(2)).unwrap();
        assert!(change.committed);
        assert_eq!(s.value(), &SelectValue::single(2));
        assert!(s.is_selected(&opt(2)));
        assert!(!s.is_selected(&opt(1)));
    }

    #[test]
    fn reselecting_same_single_value_is_not_a_change() {
        let mut s =
            SelectionState::new(SelectMode::Single, None, Some(SelectValue::single(1))).unwrap();
        assert_eq!(s.select(&opt(1)), None);
    }

    #[test]
    fn multiple_toggles_membership() {
        let mut s = SelectionState::new(
            SelectMode::Multiple,
            None,
            Some(SelectValue::multiple([1, 3])),
        )
        .unwrap();
        s.select(&opt(2));
        assert_eq!(s.value(), &SelectValue::multiple([1, 2, 3]));
        s.select(&opt(2));
        assert_eq!(s.value(), &SelectValue::multiple([1, 3]));
    }

    #[test]
    fn disabled_option_is_ignored() {
        let mut s = SelectionState::new(SelectMode::Multiple, None, None).unwrap();
        assert_eq!(s.select(&opt(1).with_disabled(true)), None);
        assert!(s.value().is_empty());
    }

    #[test]
    fn external_authority_only_proposes() {
        let mut s =
            SelectionState::new(SelectMode::Single, Some(SelectValue::Single(None)), None)
                .unwrap();
        let change = s.select(&opt(4)).unwrap();
        assert!(!change.committed);
        assert_eq!(change.proposed, SelectValue::single(4));
        assert!(s.value().is_empty());

        s.set_controlled(change.proposed).unwrap();
        assert_eq!(s.value(), &SelectValue::single(4));
    }

    #[test]
    fn controlled_value_wins_over_default() {
        let s = SelectionState::new(
            SelectMode::Single,
            Some(SelectValue::single(1)),
            Some(SelectValue::single(2)),
        )
        .unwrap();
        assert_eq!(s.authority(), Authority::External);
        assert_eq!(s.value(), &SelectValue::single(1));
    }

    #[test]
    fn mode_mismatch_is_rejected() {
        let err = SelectionState::new(SelectMode::Single, None, Some(SelectValue::multiple([1])))
            .unwrap_err();
        assert_eq!(
            err,
            SelectError::ModeMismatch {
                mode: SelectMode::Single,
                value: SelectMode::Multiple
            }
        );
    }

    #[test]
    fn internal_state_refuses_controlled_push() {
        let mut s = SelectionState::<u32>::new(SelectMode::Single, None, None).unwrap();
        assert_eq!(
            s.set_controlled(SelectValue::single(1)),
            Err(SelectError::NotControlled)
        );
    }

    #[test]
    fn clear_empties_and_reports_once() {
        let mut s = SelectionState::new(
            SelectMode::Multiple,
            None,
            Some(SelectValue::multiple([1, 2])),
        )
        .unwrap();
        assert!(s.clear().is_some());
        assert!(s.value().is_empty());
        assert_eq!(s.clear(), None);
    }
}
