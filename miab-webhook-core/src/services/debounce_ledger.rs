//! 去重账本：UID -> 最近一次成功动作的时间

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Tracks when each challenge UID last completed an action.
///
/// An entry is "fresh" while its age is within `min_action_interval`; the garbage
/// collector removes entries once their age exceeds `retention`. Requests without
/// a UID are never tracked.
#[derive(Debug)]
pub struct DebounceLedger {
    entries: HashMap<String, Instant>,
    min_action_interval: Duration,
    retention: Duration,
}

impl DebounceLedger {
    pub fn new(min_action_interval: Duration, retention: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            min_action_interval,
            retention,
        }
    }

    /// Whether `uid` completed an action recently enough to skip this one.
    pub fn is_fresh(&self, uid: &str, now: Instant) -> bool {
        if uid.is_empty() {
            return false;
        }
        self.entries
            .get(uid)
            .is_some_and(|at| now.saturating_duration_since(*at) <= self.min_action_interval)
    }

    /// Record a completed action. No-op for an empty UID.
    pub fn record(&mut self, uid: &str, now: Instant) {
        if uid.is_empty() {
            return;
        }
        self.entries.insert(uid.to_string(), now);
    }

    /// Evict entries older than the retention horizon. Returns the number removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let retention = self.retention;
        self.entries
            .retain(|_, at| now.saturating_duration_since(*at) <= retention);
        before - self.entries.len()
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.entries.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked UIDs, sorted.
    pub fn uids(&self) -> Vec<String> {
        let mut uids: Vec<String> = self.entries.keys().cloned().collect();
        uids.sort_unstable();
        uids
    }
}
