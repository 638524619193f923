use tracing::{debug, trace};

use crate::{
    error::TimerError,
    settings::StopwatchSettings,
    time::TimeParts,
    timer::{Control, Driver, RunState, Scheduler, Snapshot, TICK_PERIOD, TickHandle, driver},
};

/// Counts up one second per tick, without bound in days.
pub struct Stopwatch<S> {
    parts: TimeParts,
    state: RunState,
    tick: Option<TickHandle>,
    auto_start: bool,
    scheduler: S,
}

impl<S: Scheduler> Stopwatch<S> {
    pub fn new(settings: StopwatchSettings, scheduler: S) -> Self {
        Self {
            parts: TimeParts::ZERO,
            state: RunState::Stopped,
            tick: None,
            auto_start: settings.auto_start,
            scheduler,
        }
    }

    pub fn parts(&self) -> TimeParts {
        self.parts
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.parts, self.state)
    }

    pub fn start(&mut self) {
        if self.tick.is_some() {
            debug!("stopwatch already armed, start ignored");
            return;
        }
        self.tick = Some(self.scheduler.arm_interval(TICK_PERIOD));
        self.state = RunState::Running;
    }

    pub fn pause(&mut self) {
        self.disarm();
        self.state = RunState::Stopped;
    }

    pub fn reset(&mut self) {
        self.disarm();
        self.parts = TimeParts::ZERO;
        self.state = RunState::Stopped;
    }

    pub fn attach(&mut self) {
        if self.auto_start {
            self.start();
        }
    }

    pub fn detach(&mut self) {
        self.reset();
    }

    pub fn on_tick(&mut self, handle: TickHandle) {
        if self.tick != Some(handle) {
            trace!(?handle, "stale stopwatch tick ignored");
            return;
        }
        self.parts.increment();
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.disarm(handle);
        }
    }
}

impl<S: Scheduler> Driver for Stopwatch<S> {
    fn name(&self) -> &'static str {
        "stopwatch"
    }

    fn attach(&mut self) {
        Stopwatch::attach(self);
    }

    fn detach(&mut self) {
        Stopwatch::detach(self);
    }

    fn on_tick(&mut self, handle: TickHandle) {
        Stopwatch::on_tick(self, handle);
    }

    fn apply(&mut self, control: Control) -> Result<(), TimerError> {
        match control {
            Control::Start => self.start(),
            Control::Pause => self.pause(),
            Control::Reset => self.reset(),
            Control::Resume | Control::Restart(_) => {
                return Err(driver::unsupported(self.name(), control));
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Stopwatch::snapshot(self)
    }
}
