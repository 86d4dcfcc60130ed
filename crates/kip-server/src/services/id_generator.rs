//! Discussion id generation

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Timestamp-like ids (Unix milliseconds) that never repeat within a process:
/// two creations in the same millisecond get consecutive values.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_at(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        candidate.max(previous + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_same_tick_is_unique() {
        let ids = IdGenerator::new();
        let now = Utc::now();

        let first = ids.next_at(now);
        let second = ids.next_at(now);
        assert_eq!(first, now.timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_clock_going_backwards() {
        let ids = IdGenerator::new();
        let now = Utc::now();

        let first = ids.next_at(now);
        let second = ids.next_at(now - Duration::seconds(10));
        assert!(second > first);
    }

    #[test]
    fn test_concurrent_unique() {
        let ids = Arc::new(IdGenerator::new());
        let now = Utc::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next_at(now)).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
