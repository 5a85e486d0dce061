//! Single-flight coordination for token refresh

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use fieldfare_domain::AuthError;

/// The in-flight flag and the waiter queue. The two are one logical
/// unit: they are only ever read or written together, under the one
/// mutex, with no await point in between.
#[derive(Debug, Default)]
struct RefreshState {
    refreshing: bool,
    queue: Vec<oneshot::Sender<Result<(), AuthError>>>,
}

/// Coordinates the at-most-one-refresh-in-flight invariant.
///
/// Every request that hits a 401 calls [`RefreshGate::acquire`]. The
/// first caller becomes the leader and must run the refresh and then
/// call [`RefreshGate::settle`] exactly once; everyone else receives
/// a waiter that resolves with the leader's outcome. Waiters are
/// queued and completed in arrival order.
#[derive(Debug, Default)]
pub struct RefreshGate {
    state: Mutex<RefreshState>,
}

/// What [`RefreshGate::acquire`] handed the caller.
#[derive(Debug)]
pub enum RefreshSlot {
    /// The caller owns the refresh and must settle the gate.
    Leader,
    /// A refresh is already in flight; await the outcome.
    Follower(oneshot::Receiver<Result<(), AuthError>>),
}

impl RefreshGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the refresh slot or joins the queue behind the current
    /// holder. Check-and-set happens under one lock acquisition.
    pub fn acquire(&self) -> RefreshSlot {
        let mut state = self.lock();
        if state.refreshing {
            let (sender, receiver) = oneshot::channel();
            state.queue.push(sender);
            RefreshSlot::Follower(receiver)
        } else {
            state.refreshing = true;
            RefreshSlot::Leader
        }
    }

    /// Clears the in-flight flag and completes every queued waiter
    /// with the refresh outcome, in arrival order.
    ///
    /// Only the leader may call this, exactly once per acquired slot.
    pub fn settle(&self, outcome: Result<(), AuthError>) {
        let waiters = {
            let mut state = self.lock();
            state.refreshing = false;
            std::mem::take(&mut state.queue)
        };
        for waiter in waiters {
            // A waiter whose request was dropped is simply gone.
            let _ = waiter.send(outcome.clone());
        }
    }

    /// Returns true if a refresh is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        // The mutex only guards plain data; a poisoned lock still
        // holds a usable state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_caller_leads() {
        let gate = RefreshGate::new();
        assert!(matches!(gate.acquire(), RefreshSlot::Leader));
        assert!(gate.is_refreshing());
    }

    #[test]
    fn test_second_caller_follows() {
        let gate = RefreshGate::new();
        let _leader = gate.acquire();
        assert!(matches!(gate.acquire(), RefreshSlot::Follower(_)));
    }

    #[tokio::test]
    async fn test_settle_completes_all_waiters() {
        let gate = RefreshGate::new();
        let _leader = gate.acquire();

        let followers: Vec<_> = (0..3)
            .map(|_| match gate.acquire() {
                RefreshSlot::Follower(receiver) => receiver,
                RefreshSlot::Leader => unreachable!("slot is held"),
            })
            .collect();

        gate.settle(Ok(()));
        assert!(!gate.is_refreshing());

        for receiver in followers {
            assert_eq!(receiver.await.unwrap(), Ok(()));
        }
    }

    #[tokio::test]
    async fn test_settle_distributes_failure() {
        let gate = RefreshGate::new();
        let _leader = gate.acquire();
        let RefreshSlot::Follower(receiver) = gate.acquire() else {
            unreachable!("slot is held");
        };

        gate.settle(Err(AuthError::RefreshRejected { status: 400 }));

        assert_eq!(
            receiver.await.unwrap(),
            Err(AuthError::RefreshRejected { status: 400 })
        );
    }

    #[test]
    fn test_slot_reopens_after_settle() {
        let gate = RefreshGate::new();
        let _leader = gate.acquire();
        gate.settle(Ok(()));
        assert!(matches!(gate.acquire(), RefreshSlot::Leader));
    }
}
