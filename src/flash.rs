//! One-time messages handed from a redirect to the next page.
//!
//! The message text stays in process memory; the browser only carries an
//! opaque id, so any text survives the round trip unchanged.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

/// Oldest pending messages are dropped past this many.
pub const MAX_PENDING: usize = 1024;

#[derive(Clone)]
pub struct FlashMessages {
    pending: Arc<Mutex<VecDeque<(String, String)>>>,
    capacity: usize,
}

impl Default for FlashMessages {
    fn default() -> Self {
        Self::with_capacity(MAX_PENDING)
    }
}

impl FlashMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Stores `message` and returns the id to hand to the browser.
    pub async fn put(&self, message: String) -> String {
        let id = Uuid::new_v4().to_string();
        let mut pending = self.pending.lock().await;
        while pending.len() >= self.capacity {
            pending.pop_front();
        }
        pending.push_back((id.clone(), message));
        id
    }

    /// Removes and returns the message for `id`, if still pending.
    pub async fn take(&self, id: &str) -> Option<String> {
        let mut pending = self.pending.lock().await;
        let index = pending.iter().position(|(key, _)| key == id)?;
        pending.remove(index).map(|(_, message)| message)
    }
}
