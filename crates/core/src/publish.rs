//! Snapshot publication between the tick owner and readers.
//!
//! The tick owner is the only writer of `GameState`. After a tick that needs
//! a redraw it copies a `GameSnapshot` into the slot; readers on other
//! threads copy out the newest version. Neither side holds the lock for
//! longer than one fixed-size copy, and the live state is never shared.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::snapshot::GameSnapshot;

#[derive(Debug, Default)]
pub struct SnapshotSlot {
    version: AtomicU64,
    latest: Mutex<GameSnapshot>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GameSnapshot> {
        // A panicking writer leaves a complete snapshot behind, so a poisoned
        // lock still holds usable data.
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a new snapshot and return its version (starting at 1).
    pub fn publish(&self, snapshot: &GameSnapshot) -> u64 {
        let mut guard = self.lock();
        *guard = *snapshot;
        self.version.fetch_add(1, Ordering::Release) + 1
    }

    /// Version of the most recent publish; 0 before the first one.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Copy out the latest snapshot if it is newer than `seen`.
    pub fn latest_since(&self, seen: u64) -> Option<(u64, GameSnapshot)> {
        if self.version() <= seen {
            return None;
        }
        let guard = self.lock();
        // Read the version under the lock so it matches the copied data.
        let version = self.version();
        Some((version, *guard))
    }

    /// Copy out the latest snapshot unconditionally.
    pub fn read(&self) -> (u64, GameSnapshot) {
        let guard = self.lock();
        (self.version(), *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_versions_increase_and_filter_stale_reads() {
        let slot = SnapshotSlot::new();
        assert_eq!(slot.version(), 0);
        assert!(slot.latest_since(0).is_none());

        let mut snap = GameSnapshot::default();
        snap.score = 10;
        assert_eq!(slot.publish(&snap), 1);

        let (v, got) = slot.latest_since(0).unwrap();
        assert_eq!(v, 1);
        assert_eq!(got.score, 10);
        assert!(slot.latest_since(1).is_none());
    }

    #[test]
    fn test_reader_thread_sees_consistent_copies() {
        let slot = Arc::new(SnapshotSlot::new());
        let writer = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                let mut snap = GameSnapshot::default();
                for i in 1..=500u32 {
                    snap.score = i;
                    snap.tick = i as u64;
                    slot.publish(&snap);
                }
            })
        };

        let mut seen = 0;
        let mut last_score = 0;
        while seen < 500 {
            if let Some((v, snap)) = slot.latest_since(seen) {
                // score and tick were written together
                assert_eq!(snap.tick, snap.score as u64);
                assert!(snap.score >= last_score);
                last_score = snap.score;
                seen = v;
            }
        }
        writer.join().unwrap();
        assert_eq!(slot.read().1.score, 500);
    }
}
