//! Single-writer session store.
//!
//! The store wraps a `tokio::sync::watch` channel: the sender stays inside
//! [`AuthSessionManager`](crate::AuthSessionManager), and every consumer
//! (route guard, predictor, UI) holds a [`SessionReader`]. Readers always
//! see the latest value and can await changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::Session;

/// Owns the current [`Session`]. Writes are crate-private.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Session>,
    revision: Arc<AtomicU64>,
}

impl SessionStore {
    /// Creates a store in the [`Session::Loading`] state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::Loading);
        Self {
            tx,
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            rx: self.tx.subscribe(),
            revision: Arc::clone(&self.revision),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Number of writes so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub(crate) fn set(&self, session: Session) {
        self.revision.fetch_add(1, Ordering::AcqRel);
        self.tx.send_replace(session);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle on a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<Session>,
    revision: Arc<AtomicU64>,
}

impl SessionReader {
    pub fn snapshot(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Number of writes the store has seen.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Waits for the next write and returns the new value.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Session> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until start-up refresh has settled, then returns the session.
    ///
    /// Returns immediately if it already has. If the store is dropped
    /// while still loading, returns the last value seen.
    pub async fn settled(&mut self) -> Session {
        if let Ok(session) = self.rx.wait_for(|s| !s.is_loading()).await {
            return session.clone();
        }
        self.snapshot()
    }
}
