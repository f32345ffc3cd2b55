//! Scroll position of the option list.

/// The window of option rows visible in the open list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListViewport {
    visible_rows: usize,
    row_height: f32,
    first_row: usize,
}

impl ListViewport {
    pub fn new(visible_rows: usize, row_height: f32) -> Self {
        Self {
            visible_rows,
            row_height,
            first_row: 0,
        }
    }

    /// Index of the topmost visible row.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Whether row `index` is inside the window.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.first_row && index < self.first_row + self.visible_rows
    }

    /// Scroll the least distance that brings `index` into view, aligning it
    /// to the nearest edge. Returns whether the window moved.
    pub fn reveal(&mut self, index: usize) -> bool {
        if self.visible_rows == 0 || self.is_visible(index) {
            return false;
        }
        self.first_row = if index < self.first_row {
            index
        } else {
            index + 1 - self.visible_rows
        };
        true
    }

    /// Scroll offset of the list element in pixels.
    pub fn scroll_top(&self) -> f32 {
        self.first_row as f32 * self.row_height
    }
}
