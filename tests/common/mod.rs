//! Shared helpers for the host integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use async_channel::Receiver;
use minitick::Snapshot;

/// Waits for the first rendered snapshot matching `predicate`.
pub async fn wait_for<P>(snapshots: &Receiver<Snapshot>, predicate: P) -> anyhow::Result<Snapshot>
where
    P: Fn(&Snapshot) -> bool,
{
    loop {
        let snapshot = snapshots.recv().await?;
        if predicate(&snapshot) {
            return Ok(snapshot);
        }
    }
}

/// Everything rendered so far.
pub fn drain(snapshots: &Receiver<Snapshot>) -> Vec<Snapshot> {
    let mut seen = Vec::new();
    while let Ok(snapshot) = snapshots.try_recv() {
        seen.push(snapshot);
    }
    seen
}
