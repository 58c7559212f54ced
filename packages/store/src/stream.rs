//! Snapshot broadcasting, shared by every store.
//!
//! Built on `tokio::sync::watch`: the sender side always holds the latest
//! snapshot, so a new subscriber gets a value immediately and late
//! subscribers never block. Publishing replaces the whole value — subscribers
//! only ever observe complete, consistent snapshots, never partial updates.

use tokio::sync::watch;

/// Subscription handle to a store's published snapshots.
pub struct EntityStream<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> EntityStream<T> {
    pub(crate) fn new(rx: watch::Receiver<T>) -> Self {
        Self { rx }
    }

    /// The snapshot as of now.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next publish and return its snapshot.
    /// Returns `None` once the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
