/// Vertical scroll state of the dropdown list, in rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListViewport {
    pub y: usize,
    pub viewport_h: usize,
    pub content_h: usize,
}

impl ListViewport {
    pub fn set_viewport(&mut self, h: usize) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: usize) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    /// Scrolls the minimum amount that brings `row` into view.
    pub fn ensure_visible(&mut self, row: usize) {
        if self.viewport_h == 0 {
            return;
        }
        if row < self.y {
            self.y = row;
        } else if row >= self.y + self.viewport_h {
            self.y = row + 1 - self.viewport_h;
        }
        self.clamp();
    }

    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        self.y..(self.y + self.viewport_h).min(self.content_h)
    }

    fn max_y(&self) -> usize {
        self.content_h.saturating_sub(self.viewport_h)
    }
}
