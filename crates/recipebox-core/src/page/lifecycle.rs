//! Page lifecycle signals.
//!
//! A page moves `Loading` -> `Interactive` (content loaded) -> `Complete`
//! (fully loaded) and never backwards. Interested tasks hold a
//! [`LoadSignal`] and wait for the state they care about.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

pub struct PageLifecycle {
    tx: watch::Sender<ReadyState>,
}

impl PageLifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ReadyState::Loading);
        Self { tx }
    }

    pub fn state(&self) -> ReadyState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> LoadSignal {
        LoadSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Content loaded. Returns false if the page was already past this point.
    pub fn content_loaded(&self) -> bool {
        self.advance(ReadyState::Interactive)
    }

    /// Page fully loaded. Returns false if it already was.
    pub fn loaded(&self) -> bool {
        self.advance(ReadyState::Complete)
    }

    fn advance(&self, target: ReadyState) -> bool {
        self.tx.send_if_modified(|state| {
            if *state < target {
                *state = target;
                true
            } else {
                false
            }
        })
    }
}

impl Default for PageLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LoadSignal {
    rx: watch::Receiver<ReadyState>,
}

impl LoadSignal {
    /// Wait until the page reaches `state`. Returns false if the page went
    /// away first.
    pub async fn reached(&mut self, state: ReadyState) -> bool {
        self.rx.wait_for(|current| *current >= state).await.is_ok()
    }

    pub async fn loaded(&mut self) -> bool {
        self.reached(ReadyState::Complete).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_only_moves_forward() {
        let page = PageLifecycle::new();
        assert_eq!(page.state(), ReadyState::Loading);

        assert!(page.content_loaded());
        assert!(!page.content_loaded());
        assert_eq!(page.state(), ReadyState::Interactive);

        assert!(page.loaded());
        assert!(!page.content_loaded());
        assert_eq!(page.state(), ReadyState::Complete);
    }

    #[tokio::test]
    async fn test_signal_resolves_once_loaded() {
        let page = PageLifecycle::new();
        let mut signal = page.subscribe();

        let waiter = tokio::spawn(async move { signal.loaded().await });
        page.content_loaded();
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        page.loaded();
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_signal_after_load_resolves_immediately() {
        let page = PageLifecycle::new();
        page.loaded();
        assert!(page.subscribe().loaded().await);
    }

    #[tokio::test]
    async fn test_signal_fails_when_page_dropped() {
        let page = PageLifecycle::new();
        let mut signal = page.subscribe();
        drop(page);
        assert!(!signal.loaded().await);
    }
}
