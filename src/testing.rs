//! Hand-cranked clock and scheduler for driving the state machines in unit tests,
//! plus a warning counter for checking diagnostics.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    Layer, Registry,
    layer::{Context, SubscriberExt},
};

use crate::timer::{Clock, Scheduler, TickHandle};

/// Counts WARN events seen by the subscriber it is layered on.
#[derive(Debug, Default, Clone)]
struct WarnCounter {
    count: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` under a thread-local subscriber and returns how many warnings it emitted.
pub(crate) fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let counter = WarnCounter::default();
    let subscriber = Registry::default().with(counter.clone());
    let output = tracing::subscriber::with_default(subscriber, f);
    (output, counter.count.load(Ordering::SeqCst))
}

#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub(crate) fn at(now_millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_millis)),
        }
    }

    pub(crate) fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Armed {
    Interval(Duration),
    Once(Duration),
}

impl Armed {
    fn wait(&self) -> Duration {
        match self {
            Self::Interval(period) => *period,
            Self::Once(delay) => *delay,
        }
    }
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    live: Vec<(TickHandle, Armed)>,
    armed_total: usize,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub(crate) fn live(&self) -> Vec<(TickHandle, Armed)> {
        self.state.borrow().live.clone()
    }

    pub(crate) fn armed_total(&self) -> usize {
        self.state.borrow().armed_total
    }

    /// Advances `clock` by the wait of the single live handle and fires it.
    /// One-shot handles are consumed on firing.
    pub(crate) fn fire(&self, clock: &ManualClock) -> Option<TickHandle> {
        let mut state = self.state.borrow_mut();
        assert!(state.live.len() <= 1, "more than one live tick: {:?}", state.live);
        let (handle, armed) = *state.live.first()?;
        if let Armed::Once(_) = armed {
            state.live.clear();
        }
        clock.advance(armed.wait().as_millis() as i64);
        Some(handle)
    }

    fn arm(&mut self, armed: Armed) -> TickHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.armed_total += 1;
        let handle = TickHandle::new(state.next_id);
        state.live.push((handle, armed));
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn arm_interval(&mut self, period: Duration) -> TickHandle {
        self.arm(Armed::Interval(period))
    }

    fn arm_once(&mut self, delay: Duration) -> TickHandle {
        self.arm(Armed::Once(delay))
    }

    fn disarm(&mut self, handle: TickHandle) {
        self.state.borrow_mut().live.retain(|(live, _)| *live != handle);
    }
}
