/**
 * Change Debouncing
 *
 * Collapses rapid editor keystrokes into a single outbound content update.
 * Each scheduled change cancels the previous pending one, so only the last
 * content within the delay window is emitted.
 *
 * The emitter owns a channel sender; whoever drives the realtime connection
 * holds the receiver and forwards emitted changes to the relay.
 */

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default trailing-edge debounce delay for editor changes
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A content change ready to be sent to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundChange {
    /// Room the change belongs to
    pub slug: String,
    /// Full document content after the change
    pub content: String,
}

/// Trailing-edge debouncer for outbound content changes
pub struct ChangeEmitter {
    delay: Duration,
    tx: mpsc::UnboundedSender<OutboundChange>,
    pending: Option<JoinHandle<()>>,
}

impl ChangeEmitter {
    /// Create an emitter and the receiver for its emitted changes
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<OutboundChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedule a change, replacing any not-yet-emitted one
    pub fn schedule(&mut self, slug: String, content: String) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A closed receiver means the relay connection is gone; dropping
            // the change is the correct degraded behavior.
            let _ = tx.send(OutboundChange { slug, content });
        }));
    }

    /// Cancel any pending emission
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a change is waiting out its delay window
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ChangeEmitter {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_collapse_to_last() {
        let (mut emitter, mut rx) = ChangeEmitter::new(DEFAULT_DEBOUNCE);

        emitter.schedule("abc123".into(), "{\"a\":1".into());
        tokio::time::advance(Duration::from_millis(100)).await;
        emitter.schedule("abc123".into(), "{\"a\":12".into());
        tokio::time::advance(Duration::from_millis(100)).await;
        emitter.schedule("abc123".into(), "{\"a\":123}".into());

        tokio::time::advance(DEFAULT_DEBOUNCE).await;
        tokio::task::yield_now().await;

        let emitted = rx.recv().await.unwrap();
        assert_eq!(emitted.content, "{\"a\":123}");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_pending_change() {
        let (mut emitter, mut rx) = ChangeEmitter::new(DEFAULT_DEBOUNCE);

        emitter.schedule("abc123".into(), "{}".into());
        emitter.cancel();

        tokio::time::advance(DEFAULT_DEBOUNCE * 2).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_changes_each_emit() {
        let (mut emitter, mut rx) = ChangeEmitter::new(DEFAULT_DEBOUNCE);

        emitter.schedule("abc123".into(), "first".into());
        tokio::time::advance(DEFAULT_DEBOUNCE).await;
        tokio::task::yield_now().await;

        emitter.schedule("abc123".into(), "second".into());
        tokio::time::advance(DEFAULT_DEBOUNCE).await;
        tokio::task::yield_now().await;

        assert_eq!(rx.recv().await.unwrap().content, "first");
        assert_eq!(rx.recv().await.unwrap().content, "second");
    }
}
