use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Identifies one in-flight generation for a caller-chosen key (usually a
/// device or session id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    key: String,
    sequence: u64,
}

impl RequestToken {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Tracks the latest generation started per key so that a slow, older call
/// cannot overwrite the result of a newer one.
#[derive(Default)]
pub struct RequestTracker {
    next: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new call for `key`. The entry is released when the
    /// returned guard is finished or dropped.
    pub fn begin(&self, key: &str) -> RequestGuard<'_> {
        let sequence = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.entries().insert(key.to_string(), sequence);
        RequestGuard {
            tracker: self,
            token: RequestToken {
                key: key.to_string(),
                sequence,
            },
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.entries().get(&token.key) == Some(&token.sequence)
    }

    pub fn in_flight(&self) -> usize {
        self.entries().len()
    }

    /// Removes the entry for `token` if it is still the latest for its key.
    fn release(&self, token: &RequestToken) -> bool {
        let mut latest = self.entries();
        if latest.get(&token.key) == Some(&token.sequence) {
            latest.remove(&token.key);
            true
        } else {
            false
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Live registration of one call. Dropping it (for instance when the client
/// disconnects and the handler future is dropped) releases the key.
pub struct RequestGuard<'a> {
    tracker: &'a RequestTracker,
    token: RequestToken,
}

impl RequestGuard<'_> {
    pub fn token(&self) -> &RequestToken {
        &self.token
    }

    pub fn is_current(&self) -> bool {
        self.tracker.is_current(&self.token)
    }

    /// Mark the call as done. Returns whether its result is still the one
    /// the caller should display.
    pub fn finish(self) -> bool {
        self.tracker.release(&self.token)
    }
}

impl Drop for RequestGuard<'_> {
    fn drop(&mut self) {
        // No-op after `finish` or once a newer call owns the key.
        self.tracker.release(&self.token);
    }
}
