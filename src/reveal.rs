//! Character-by-character reveal of a fetched suggestion string.
//!
//! [`Reveal`] is the pure prefix machine; [`RevealSession`] owns the timer
//! task that drives it and publishes the visible prefix through a watch
//! channel. A session is tied to one source string identity: a new
//! suggestion means dropping the old session and starting a fresh one.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_TICK: Duration = Duration::from_millis(25);

/// Prefix state for one reveal session. Advances one character per tick
/// until the whole source is visible, then goes quiet.
#[derive(Debug)]
pub struct Reveal {
    source: String,
    revealed_bytes: usize,
    revealed_chars: usize,
}

impl Reveal {
    pub fn new(source: String) -> Self {
        Self {
            source,
            revealed_bytes: 0,
            revealed_chars: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_chars
    }

    pub fn visible(&self) -> &str {
        &self.source[..self.revealed_bytes]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_bytes == self.source.len()
    }

    /// Reveal one more character. Returns false once the full source is
    /// visible and there is nothing left to do.
    pub fn tick(&mut self) -> bool {
        match self.source[self.revealed_bytes..].chars().next() {
            Some(c) => {
                self.revealed_bytes += c.len_utf8();
                self.revealed_chars += 1;
                !self.is_complete()
            }
            None => false,
        }
    }

    /// Replace the source text, restarting the reveal from length zero.
    pub fn replace(&mut self, source: String) {
        self.source = source;
        self.revealed_bytes = 0;
        self.revealed_chars = 0;
    }
}

/// A running reveal: a spawned timer task plus the channel its progress is
/// read from. Dropping the session aborts the task, so no output can be
/// produced after teardown.
pub struct RevealSession {
    handle: JoinHandle<()>,
    progress: watch::Receiver<String>,
}

impl RevealSession {
    pub fn start(source: String, tick: Duration) -> Self {
        let (tx, progress) = watch::channel(String::new());

        let handle = tokio::spawn(async move {
            let mut reveal = Reveal::new(source);
            loop {
                tokio::time::sleep(tick).await;
                let more = reveal.tick();
                if tx.send(reveal.visible().to_string()).is_err() {
                    // Receiver gone, nobody is watching.
                    break;
                }
                if !more {
                    break;
                }
            }
        });

        Self { handle, progress }
    }

    /// The prefix revealed so far.
    pub fn visible(&self) -> String {
        self.progress.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RevealSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_tick() {
        let mut reveal = Reveal::new("abc".into());
        assert_eq!(reveal.visible(), "");

        assert!(reveal.tick());
        assert_eq!(reveal.visible(), "a");
        assert!(reveal.tick());
        assert_eq!(reveal.visible(), "ab");
        assert!(!reveal.tick());
        assert_eq!(reveal.visible(), "abc");
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_no_work_after_completion() {
        let mut reveal = Reveal::new("hi".into());
        reveal.tick();
        reveal.tick();
        assert!(!reveal.tick());
        assert_eq!(reveal.visible(), "hi");
        assert_eq!(reveal.revealed_len(), 2);
    }

    #[test]
    fn test_full_length_after_length_ticks() {
        let text = "a suggested reply";
        let mut reveal = Reveal::new(text.into());
        for _ in 0..text.chars().count() {
            reveal.tick();
        }
        assert!(reveal.is_complete());
        assert_eq!(reveal.revealed_len(), text.chars().count());
    }

    #[test]
    fn test_multibyte_boundaries() {
        let mut reveal = Reveal::new("héllo".into());
        reveal.tick();
        reveal.tick();
        assert_eq!(reveal.visible(), "hé");
        assert_eq!(reveal.revealed_len(), 2);
    }

    #[test]
    fn test_replace_restarts_from_zero() {
        let mut reveal = Reveal::new("first".into());
        reveal.tick();
        reveal.tick();
        reveal.replace("second".into());
        assert_eq!(reveal.visible(), "");
        assert_eq!(reveal.revealed_len(), 0);
        reveal.tick();
        assert_eq!(reveal.visible(), "s");
    }

    #[test]
    fn test_empty_source_is_already_complete() {
        let mut reveal = Reveal::new(String::new());
        assert!(reveal.is_complete());
        assert!(!reveal.tick());
    }

    /// Let the session task park on its sleep, fire one tick, then let it
    /// apply the tick.
    async fn step(tick: Duration) {
        tokio::task::yield_now().await;
        tokio::time::advance(tick).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_reveals_over_time() {
        let session = RevealSession::start("abc".into(), DEFAULT_TICK);

        step(DEFAULT_TICK).await;
        assert_eq!(session.visible(), "a");

        for _ in 0..10 {
            step(DEFAULT_TICK).await;
        }
        assert_eq!(session.visible(), "abc");
        assert!(session.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_cancel_stops_output() {
        let session = RevealSession::start("abcdef".into(), DEFAULT_TICK);

        step(DEFAULT_TICK).await;
        let before = session.visible();

        session.cancel();
        for _ in 0..10 {
            step(DEFAULT_TICK).await;
        }
        assert_eq!(session.visible(), before);
    }
}
