use std::collections::HashSet;

use crate::domain::Entity;
use crate::state::PageCursor;

/// One independently paginated, independently fetched list of entities.
///
/// Pages are appended in arrival order, which may differ from issue order.
/// Duplicate ids across overlapping fetches are dropped on append, and the
/// cursor tracks the highest successfully applied page. A failed fetch
/// leaves the accumulated items visible (stale-but-visible policy).
#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub cursor: PageCursor,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            cursor: PageCursor::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Flip the spinner on. Callers do this synchronously before issuing
    /// the request so the loading flag is never observably late.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Apply one successful page response. Items whose id is already
    /// present are skipped, so overlapping or repeated fetches cannot
    /// introduce duplicates.
    pub fn apply_page(&mut self, page: u32, new_items: Vec<T>, total_pages: u32) {
        let mut seen: HashSet<String> = self.items.iter().map(|i| i.id().to_string()).collect();

        for item in new_items {
            if seen.insert(item.id().to_string()) {
                self.items.push(item);
            } else {
                tracing::debug!(id = item.id(), page, "skipping duplicate entity");
            }
        }

        self.cursor.advance_to(page, total_pages);
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch. Accumulated items stay visible.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.loading = false;
        self.error = Some(error.into());
    }

    /// Full replacement, used by search and filter-switch flows.
    pub fn replace_all(&mut self, items: Vec<T>, total_pages: u32) {
        self.items = items;
        self.cursor = PageCursor::new();
        self.cursor.advance_to(1, total_pages);
        self.loading = false;
        self.error = None;
    }

    /// In-place transform of the single entity matching `id`. Absent ids
    /// are a silent no-op.
    pub fn mutate<F: FnOnce(&mut T)>(&mut self, id: &str, f: F) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Remove the first entity matching `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id() == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Discard everything, back to the never-fetched state. Used when the
    /// filter context (category, article) changes.
    pub fn reset(&mut self) {
        self.items.clear();
        self.loading = false;
        self.error = None;
        self.cursor.reset();
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
