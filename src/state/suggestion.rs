/// Lifecycle of the single assistant-suggested reply.
///
/// Idle -> (begin) Pending -> (resolve) Available -> (consume/clear) Idle,
/// with Pending -> (fail) Idle keeping the error around for display. At most
/// one request is ever in flight: `begin` refuses while Pending, and refuses
/// while Available because a non-empty suggestion means "use it", not "ask
/// again".
#[derive(Debug, Default)]
pub struct Suggestion {
    text: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Suggestion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.loading
    }

    pub fn is_available(&self) -> bool {
        !self.text.is_empty()
    }

    /// Try to enter Pending. Returns false (and changes nothing) when a
    /// request is already in flight or a suggestion is already available.
    pub fn begin(&mut self) -> bool {
        if self.loading || self.is_available() {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub fn resolve(&mut self, text: String) {
        self.loading = false;
        self.error = None;
        self.text = text;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.loading = false;
        self.error = Some(error.into());
    }

    /// Take the suggestion for use, returning to Idle.
    pub fn consume(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Explicit reset, e.g. the user cleared the input or dismissed the
    /// suggestion before consuming it.
    pub fn clear(&mut self) {
        self.text.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_from_idle() {
        let mut s = Suggestion::new();
        assert!(s.begin());
        assert!(s.is_pending());
        assert!(!s.is_available());
    }

    #[test]
    fn test_begin_while_pending_is_noop() {
        let mut s = Suggestion::new();
        assert!(s.begin());
        assert!(!s.begin());
        assert!(s.is_pending());
    }

    #[test]
    fn test_begin_while_available_is_noop() {
        let mut s = Suggestion::new();
        s.begin();
        s.resolve("try this reply".into());
        assert!(!s.begin());
        assert_eq!(s.text(), "try this reply");
    }

    #[test]
    fn test_consume_clears_to_idle() {
        let mut s = Suggestion::new();
        s.begin();
        s.resolve("try this reply".into());
        assert_eq!(s.consume(), "try this reply");
        assert_eq!(s.text(), "");
        assert!(!s.is_available());
        assert!(s.begin());
    }

    #[test]
    fn test_fail_returns_to_idle_with_error() {
        let mut s = Suggestion::new();
        s.begin();
        s.fail("model unavailable");
        assert!(!s.is_pending());
        assert!(!s.is_available());
        assert_eq!(s.error.as_deref(), Some("model unavailable"));
        // Recoverable by a later request.
        assert!(s.begin());
        assert!(s.error.is_none());
    }

    #[test]
    fn test_clear_from_available() {
        let mut s = Suggestion::new();
        s.begin();
        s.resolve("unused".into());
        s.clear();
        assert!(!s.is_available());
    }

    #[test]
    fn test_clear_from_idle_is_harmless() {
        let mut s = Suggestion::new();
        s.clear();
        assert!(!s.is_available());
        assert!(!s.is_pending());
    }
}
