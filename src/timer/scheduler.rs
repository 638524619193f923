use std::{sync::Arc, time::Duration};

use async_channel::{Receiver, Sender};
use dashmap::DashMap;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at, sleep},
};

/// Identifies one armed tick. Ticks are delivered back to the driver carrying
/// their handle, so a tick whose handle is no longer live can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Timer facility a driver arms its ticks on.
pub trait Scheduler {
    /// Fire every `period`, first after one full period.
    fn arm_interval(&mut self, period: Duration) -> TickHandle;

    /// Fire once after `delay`.
    fn arm_once(&mut self, delay: Duration) -> TickHandle;

    /// Stop delivering `handle`. Unknown or already finished handles are ignored.
    fn disarm(&mut self, handle: TickHandle);
}

/// Runs each armed tick as a tokio task that sends its handle to a channel.
///
/// Must be armed from inside a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    tasks: Arc<DashMap<TickHandle, JoinHandle<()>>>,
    ticks: Sender<TickHandle>,
}

impl TokioScheduler {
    pub fn new(ticks: Sender<TickHandle>) -> Self {
        Self {
            next_id: 0,
            tasks: Arc::new(DashMap::new()),
            ticks,
        }
    }

    /// A scheduler together with the receiving end of its tick channel.
    pub fn channel() -> (Self, Receiver<TickHandle>) {
        let (sender, receiver) = async_channel::unbounded();
        (Self::new(sender), receiver)
    }

    /// Number of tick tasks still running.
    pub fn live_count(&self) -> usize {
        self.tasks.retain(|_, task| !task.is_finished());
        self.tasks.len()
    }

    fn next_handle(&mut self) -> TickHandle {
        self.next_id += 1;
        TickHandle::new(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn arm_interval(&mut self, period: Duration) -> TickHandle {
        let handle = self.next_handle();
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(handle).await.is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn arm_once(&mut self, delay: Duration) -> TickHandle {
        let handle = self.next_handle();
        let ticks = self.ticks.clone();
        let tasks = Arc::clone(&self.tasks);
        let task = tokio::spawn(async move {
            sleep(delay).await;
            tasks.remove(&handle);
            let _ = ticks.send(handle).await;
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn disarm(&mut self, handle: TickHandle) {
        if let Some((_, task)) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.iter() {
            task.value().abort();
        }
        self.tasks.clear();
    }
}
