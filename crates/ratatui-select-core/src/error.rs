use crate::selection::SelectMode;

/// Errors reported when a select is misconfigured.
///
/// Interaction never fails; these only come out of construction and of pushing a controlled
/// value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A value of one shape was supplied to a select of the other mode.
    #[error("{value:?} value supplied to a {mode:?} select")]
    ModeMismatch { mode: SelectMode, value: SelectMode },
    /// `set_value` was called on a select that owns its value.
    #[error("select owns its value; it was not constructed with a controlled value")]
    NotControlled,
}
