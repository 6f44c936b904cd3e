//! Bulk selection tracking
//!
//! The selection survives filter and page changes. Identifiers that are no
//! longer visible stay selected; bulk operations skip the ones that no
//! longer exist server-side.

use std::collections::BTreeSet;

/// State of the "select all" checkbox relative to the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: BTreeSet<u64>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a single task
    pub fn toggle(&mut self, id: u64, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Check or uncheck every task on the rendered page; other pages are untouched
    pub fn set_page(&mut self, page_ids: &[u64], checked: bool) {
        for &id in page_ids {
            self.toggle(id, checked);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order, as sent to bulk operations
    pub fn ids(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn header_state(&self, page_ids: &[u64]) -> HeaderCheckbox {
        let on_page = page_ids.iter().filter(|id| self.contains(**id)).count();
        match on_page {
            0 => HeaderCheckbox::Unchecked,
            n if n == page_ids.len() => HeaderCheckbox::Checked,
            _ => HeaderCheckbox::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_and_removes() {
        let mut selection = SelectionTracker::new();
        selection.toggle(3, true);
        selection.toggle(1, true);
        selection.toggle(3, true);
        assert_eq!(selection.ids(), vec![1, 3]);

        selection.toggle(3, false);
        assert_eq!(selection.ids(), vec![1]);
    }

    #[test]
    fn select_all_only_touches_page() {
        let mut selection = SelectionTracker::new();
        selection.toggle(42, true);

        selection.set_page(&[1, 2, 3], true);
        assert_eq!(selection.ids(), vec![1, 2, 3, 42]);

        selection.set_page(&[1, 2, 3], false);
        assert_eq!(selection.ids(), vec![42]);
    }

    #[test]
    fn header_state_tracks_page() {
        let mut selection = SelectionTracker::new();
        let page = [1, 2, 3];
        assert_eq!(selection.header_state(&page), HeaderCheckbox::Unchecked);

        selection.toggle(2, true);
        assert_eq!(selection.header_state(&page), HeaderCheckbox::Indeterminate);

        selection.set_page(&page, true);
        assert_eq!(selection.header_state(&page), HeaderCheckbox::Checked);

        assert_eq!(selection.header_state(&[]), HeaderCheckbox::Unchecked);
    }

    #[test]
    fn clear_empties_selection() {
        let mut selection = SelectionTracker::new();
        selection.set_page(&[5, 6], true);
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.contains(5));
    }
}
