use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::utils;

/// How long a login may take between `/login` and `/spotify-redirect`.
pub const STATE_TTL_MINUTES: i64 = 10;

/// Upper bound on outstanding login attempts. The oldest is evicted first.
pub const MAX_PENDING_STATES: usize = 1024;

#[derive(Debug, Default)]
struct Pending {
    issued: HashMap<String, DateTime<Utc>>,
    /// Issue order; may still name states that were already consumed.
    order: VecDeque<(String, DateTime<Utc>)>,
}

impl Pending {
    fn evict_front(&mut self) {
        if let Some((state, issued_at)) = self.order.pop_front() {
            if self.issued.get(&state) == Some(&issued_at) {
                self.issued.remove(&state);
            }
        }
    }
}

/// Tracks the OAuth `state` values handed out by `/login`.
///
/// Each value is valid once and only until its TTL passes. A redirect that
/// carries an unknown, reused, expired or evicted value is rejected.
#[derive(Debug, Clone)]
pub struct StateManager {
    ttl: Duration,
    max_pending: usize,
    pending: Arc<Mutex<Pending>>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::with_limits(Duration::minutes(STATE_TTL_MINUTES), MAX_PENDING_STATES)
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, MAX_PENDING_STATES)
    }

    pub fn with_limits(ttl: Duration, max_pending: usize) -> Self {
        Self {
            ttl,
            max_pending: max_pending.max(1),
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    /// Generates and remembers a fresh state value.
    ///
    /// Expired entries at the old end of the queue are dropped, then the
    /// oldest entries are evicted until there is room for the new one.
    pub async fn issue(&self) -> String {
        let now = Utc::now();
        let state = utils::generate_state();

        let mut pending = self.pending.lock().await;
        while let Some((_, issued_at)) = pending.order.front() {
            if now < *issued_at + self.ttl {
                break;
            }
            pending.evict_front();
        }
        while pending.order.len() >= self.max_pending {
            pending.evict_front();
        }

        pending.issued.insert(state.clone(), now);
        pending.order.push_back((state.clone(), now));

        state
    }

    /// Removes `state` and reports whether it was issued and is still fresh.
    pub async fn consume(&self, state: &str) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.issued.remove(state) {
            Some(issued_at) => Utc::now() < issued_at + self.ttl,
            None => false,
        }
    }

    /// Number of issued states that have not been consumed or evicted yet.
    pub async fn len(&self) -> usize {
        self.pending.lock().await.issued.len()
    }
}
