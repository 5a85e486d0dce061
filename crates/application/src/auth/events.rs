//! Auth-expired event channel

use tokio::sync::broadcast;

/// The payload-free auth-expired event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthExpired;

/// Fan-out for the auth-expired signal.
///
/// Fired exactly once per failed refresh cycle, after stored tokens
/// have been cleared. Subscribers drop their receiver to unsubscribe.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthExpired>,
}

impl AuthEvents {
    /// Creates an event channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(8);
        Self { sender }
    }

    /// Registers a listener.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthExpired> {
        self.sender.subscribe()
    }

    /// Fires the signal. No-op when nobody is listening.
    pub(crate) fn emit(&self) {
        let _ = self.sender.send(AuthExpired);
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_emit() {
        let events = AuthEvents::new();
        let mut first = events.subscribe();
        let mut second = events.subscribe();

        events.emit();

        assert_eq!(first.recv().await.unwrap(), AuthExpired);
        assert_eq!(second.recv().await.unwrap(), AuthExpired);
    }

    #[test]
    fn test_emit_without_listeners_is_harmless() {
        let events = AuthEvents::new();
        events.emit();
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_emit() {
        let events = AuthEvents::new();
        events.emit();

        let mut listener = events.subscribe();
        assert!(listener.try_recv().is_err());
    }
}
