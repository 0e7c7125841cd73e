use tokio::sync::{RwLock, mpsc};

/// Notifications about the login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login or signup stored a new token.
    LoggedIn { username: String },
    /// The user asked to log out.
    LoggedOut,
    /// The session was cleared because the backend rejected it.
    ForcedLogout { reason: String },
}

/// Fan-out of session events to every open view.
///
/// Each subscriber gets its own unbounded channel. Senders whose receiver has
/// been dropped are pruned on the next broadcast.
#[derive(Debug, Default)]
pub struct SessionEvents {
    subscribers: RwLock<Vec<mpsc::UnboundedSender<SessionEvent>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Events sent before this call are not replayed.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.write().await.push(tx);
        rx
    }

    /// Deliver `event` to all live subscribers; returns how many received it.
    pub async fn broadcast(&self, event: SessionEvent) -> usize {
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}
