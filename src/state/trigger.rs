use crate::state::PageCursor;

/// Turns "the last rendered item became visible" signals into at most one
/// next-page fetch per page.
///
/// The visibility signal repeats freely while a fetch is in flight, so the
/// trigger latches the page it asked for and stays quiet until the cursor
/// actually advances past it (`settle`) or the fetch fails (`abort`, which
/// re-arms so the user can retry).
#[derive(Debug, Default)]
pub struct FetchTrigger {
    requested: Option<u32>,
}

impl FetchTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard predicate for issuing the next page fetch. Returns the page to
    /// request, or None when any guard fails or that page was already
    /// requested.
    pub fn request(
        &mut self,
        cursor: &PageCursor,
        sentinel_is_last: bool,
        visible: bool,
    ) -> Option<u32> {
        if !sentinel_is_last || !visible || !cursor.has_more() {
            return None;
        }

        let next = cursor.next_page();
        if self.requested == Some(next) {
            return None;
        }

        self.requested = Some(next);
        Some(next)
    }

    /// Call after a fetch settles successfully; releases the latch once the
    /// cursor has caught up with the requested page.
    pub fn settle(&mut self, cursor: &PageCursor) {
        if let Some(page) = self.requested {
            if cursor.page >= page {
                self.requested = None;
            }
        }
    }

    /// Call after a fetch fails; re-arms the trigger for a retry.
    pub fn abort(&mut self) {
        self.requested = None;
    }

    pub fn reset(&mut self) {
        self.requested = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(page: u32, total: u32) -> PageCursor {
        let mut c = PageCursor::new();
        c.advance_to(page, total);
        c
    }

    #[test]
    fn test_fires_once_for_repeated_visibility() {
        let mut trigger = FetchTrigger::new();
        let c = cursor(1, 3);

        assert_eq!(trigger.request(&c, true, true), Some(2));
        for _ in 0..5 {
            assert_eq!(trigger.request(&c, true, true), None);
        }
    }

    #[test]
    fn test_rearms_after_cursor_advances() {
        let mut trigger = FetchTrigger::new();
        let c1 = cursor(1, 3);
        assert_eq!(trigger.request(&c1, true, true), Some(2));

        let c2 = cursor(2, 3);
        trigger.settle(&c2);
        assert_eq!(trigger.request(&c2, true, true), Some(3));
    }

    #[test]
    fn test_settle_before_advance_keeps_latch() {
        let mut trigger = FetchTrigger::new();
        let c = cursor(1, 3);
        assert_eq!(trigger.request(&c, true, true), Some(2));
        // Cursor has not moved yet; latch must hold.
        trigger.settle(&c);
        assert_eq!(trigger.request(&c, true, true), None);
    }

    #[test]
    fn test_abort_allows_retry_of_same_page() {
        let mut trigger = FetchTrigger::new();
        let c = cursor(1, 3);
        assert_eq!(trigger.request(&c, true, true), Some(2));
        trigger.abort();
        assert_eq!(trigger.request(&c, true, true), Some(2));
    }

    #[test]
    fn test_guards() {
        let mut trigger = FetchTrigger::new();
        let c = cursor(1, 3);
        assert_eq!(trigger.request(&c, false, true), None);
        assert_eq!(trigger.request(&c, true, false), None);

        let exhausted = cursor(3, 3);
        assert_eq!(trigger.request(&exhausted, true, true), None);
    }

    #[test]
    fn test_first_fetch_from_fresh_cursor() {
        let mut trigger = FetchTrigger::new();
        let c = PageCursor::new();
        assert_eq!(trigger.request(&c, true, true), Some(1));
    }
}
