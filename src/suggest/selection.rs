//! Selection state for dropdown navigation
//!
//! Tracks the keyboard-highlighted candidate and the scroll window of the
//! dropdown. Navigation clamps at both ends instead of wrapping: `None` sits
//! "above" the first row and the last row is a hard stop.

/// Selection state for dropdown navigation
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Currently highlighted candidate index (None = nothing highlighted)
    selected_index: Option<usize>,
    /// First candidate row visible in the dropdown
    scroll_offset: usize,
    /// Number of rows the dropdown can show (0 = not rendered yet)
    viewport: usize,
}

impl SelectionState {
    /// Create a new SelectionState with no selection
    pub fn new() -> Self {
        Self {
            selected_index: None,
            scroll_offset: 0,
            viewport: 0,
        }
    }

    /// Clear the current selection and scroll back to the top
    pub fn clear_selection(&mut self) {
        self.selected_index = None;
        self.scroll_offset = 0;
    }

    /// Get the currently highlighted candidate index
    pub fn get_selected(&self) -> Option<usize> {
        self.selected_index
    }

    /// Selection as a signed index, `-1` when nothing is highlighted
    pub fn index(&self) -> isize {
        self.selected_index.map_or(-1, |i| i as isize)
    }

    /// Highlight a specific row (pointer hover)
    ///
    /// Out-of-range indices are clamped to the last row.
    pub fn select_index(&mut self, index: usize, count: usize) {
        if count == 0 {
            self.clear_selection();
            return;
        }
        self.selected_index = Some(index.min(count - 1));
        self.ensure_visible();
    }

    /// Move the highlight down one row, stopping at the last row (ArrowDown)
    pub fn navigate_next(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.selected_index = match self.selected_index {
            Some(current) => Some((current + 1).min(count - 1)),
            None => Some(0),
        };
        self.ensure_visible();
    }

    /// Move the highlight up one row; from the first row this clears it (ArrowUp)
    pub fn navigate_previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.selected_index = match self.selected_index {
            Some(0) | None => None,
            Some(current) => Some(current.min(count) - 1),
        };
        self.ensure_visible();
    }

    /// Update the number of visible rows, keeping the highlight in view
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.ensure_visible();
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn ensure_visible(&mut self) {
        let Some(selected) = self.selected_index else {
            self.scroll_offset = 0;
            return;
        };
        if self.viewport == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + self.viewport {
            self.scroll_offset = selected + 1 - self.viewport;
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
