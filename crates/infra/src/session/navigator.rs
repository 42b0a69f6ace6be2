use moodlog_core::Navigator;
use tokio::sync::watch;
use tracing::debug;

/// Navigator that publishes the current location over a watch channel.
///
/// A UI layer subscribes and reacts to forced redirects such as the move to
/// the login view after the session ends.
#[derive(Debug)]
pub struct WatchNavigator {
    tx: watch::Sender<String>,
}

impl WatchNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(initial.into());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for WatchNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for WatchNavigator {
    fn current_location(&self) -> String {
        self.tx.borrow().clone()
    }

    fn navigate(&self, location: &str) {
        debug!(to = %location, "navigating");
        self.tx.send_replace(location.to_string());
    }
}
