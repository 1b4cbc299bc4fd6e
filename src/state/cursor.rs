/// Pagination position for a single collection.
///
/// `page` is 0 until the first fetch has been applied. `total_pages` is
/// whatever the most recent successful response reported, and is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub total_pages: u32,
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            page: 0,
            total_pages: 1,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Record a successfully applied page. Monotonic: a late-arriving
    /// earlier page never rewinds the cursor.
    pub fn advance_to(&mut self, page: u32, total_pages: u32) {
        self.page = self.page.max(page);
        self.total_pages = total_pages.max(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}
