//! Keyboard highlight cursor over the filtered option list.
//!
//! The cursor is either `None` (nothing highlighted) or a valid index into the current filtered
//! list. Disabled options are ordinary stops: disabling blocks selection, not traversal.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    First,
    Last,
    PageDown(usize),
    PageUp(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightCursor {
    index: Option<usize>,
}

impl HighlightCursor {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Points at the first option, or at nothing when the list is empty.
    pub fn reset(&mut self, len: usize) {
        self.index = (len > 0).then_some(0);
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Applies a directional command. Returns `true` if the index changed.
    pub fn navigate(&mut self, nav: Navigation, len: usize) -> bool {
        if len == 0 {
            let changed = self.index.is_some();
            self.index = None;
            return changed;
        }
        let last = len - 1;
        // An unset cursor behaves as if it sat just above the first item.
        let next = match (nav, self.index) {
            (Navigation::First, _) => 0,
            (Navigation::Last, _) => last,
            (Navigation::Next | Navigation::Previous | Navigation::PageUp(_), None) => 0,
            (Navigation::PageDown(step), None) => step.max(1) - 1,
            (Navigation::Next, Some(i)) => i.saturating_add(1),
            (Navigation::Previous, Some(i)) => i.saturating_sub(1),
            (Navigation::PageDown(step), Some(i)) => i.saturating_add(step.max(1)),
            (Navigation::PageUp(step), Some(i)) => i.saturating_sub(step.max(1)),
        };
        self.set(Some(next.min(last)))
    }

    /// Pointer hover. Out-of-range indices are ignored.
    pub fn set_explicit(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.set(Some(index))
    }

    /// The highlighted index if it is still inside a list of `len` items.
    pub fn valid(&self, len: usize) -> Option<usize> {
        self.index.filter(|&i| i < len)
    }

    fn set(&mut self, index: Option<usize>) -> bool {
        let changed = self.index != index;
        self.index = index;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_clamp_at_edges() {
        let mut c = HighlightCursor::default();
        c.reset(3);
        assert!(!c.navigate(Navigation::Previous, 3));
        assert_eq!(c.index(), Some(0));
        c.navigate(Navigation::Last, 3);
        assert!(!c.navigate(Navigation::Next, 3));
        assert_eq!(c.index(), Some(2));
    }

    #[test]
    fn unset_cursor_moves_onto_first_item() {
        let mut c = HighlightCursor::default();
        assert!(c.navigate(Navigation::Next, 4));
        assert_eq!(c.index(), Some(0));
        c.clear();
        assert!(c.navigate(Navigation::Previous, 4));
        assert_eq!(c.index(), Some(0));
    }

    #[test]
    fn empty_list_never_gets_an_index() {
        let mut c = HighlightCursor::default();
        c.reset(0);
        assert_eq!(c.index(), None);
        for nav in [Navigation::Next, Navigation::Last, Navigation::PageDown(3)] {
            c.navigate(nav, 0);
            assert_eq!(c.index(), None);
        }
    }

    #[test]
    fn paging_clamps() {
        let mut c = HighlightCursor::default();
        c.reset(10);
        c.navigate(Navigation::PageDown(4), 10);
        assert_eq!(c.index(), Some(4));
        c.navigate(Navigation::PageDown(40), 10);
        assert_eq!(c.index(), Some(9));
        c.navigate(Navigation::PageUp(5), 10);
        assert_eq!(c.index(), Some(4));
        c.navigate(Navigation::PageUp(50), 10);
        assert_eq!(c.index(), Some(0));
    }

    #[test]
    fn huge_page_steps_saturate() {
        let mut c = HighlightCursor::default();
        c.reset(10);
        c.navigate(Navigation::Next, 10);
        c.navigate(Navigation::Next, 10);
        assert!(c.navigate(Navigation::PageDown(usize::MAX), 10));
        assert_eq!(c.index(), Some(9));
        c.navigate(Navigation::PageDown(i64::MAX as usize), 10);
        assert_eq!(c.index(), Some(9));
        assert!(c.navigate(Navigation::PageUp(usize::MAX), 10));
        assert_eq!(c.index(), Some(0));

        c.clear();
        c.navigate(Navigation::PageDown(usize::MAX), 10);
        assert_eq!(c.index(), Some(9));
    }

    #[test]
    fn explicit_index_must_be_in_range() {
        let mut c = HighlightCursor::default();
        assert!(c.set_explicit(2, 3));
        assert!(!c.set_explicit(3, 3));
        assert_eq!(c.index(), Some(2));
        assert_eq!(c.valid(2), None);
    }
}
