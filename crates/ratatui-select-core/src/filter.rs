use crate::option::SelectOption;
use std::sync::Arc;

/// Caller-supplied match predicate: `(option, search_text) -> visible`.
pub type FilterFn<T> = Arc<dyn Fn(&SelectOption<T>, &str) -> bool + Send + Sync>;

/// Case-insensitive substring match against the description, or the label when there is none.
pub fn default_matches<T>(option: &SelectOption<T>, search: &str) -> bool {
    option
        .search_text()
        .to_lowercase()
        .contains(&search.to_lowercase())
}

/// Returns indices into `options` that stay visible for `search`, in their original order.
///
/// An empty search keeps every option. Disabled options are filtered like any other; they are
/// never hidden for being disabled. Without a `predicate`, [`default_matches`] decides.
pub fn filter_indices<T>(
    options: &[SelectOption<T>],
    search: &str,
    predicate: Option<&FilterFn<T>>,
) -> Vec<usize> {
    if search.is_empty() {
        return (0..options.len()).collect();
    }
    let matches = |o: &SelectOption<T>| match predicate {
        Some(f) => f(o, search),
        None => default_matches(o, search),
    };
    options
        .iter()
        .enumerate()
        .filter_map(|(i, o)| matches(o).then_some(i))
        .collect()
}
