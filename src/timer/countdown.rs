use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    error::TimerError,
    settings::{OnExpire, TimerSettings},
    time::{ExpiryTimestamp, TimeParts, parts::MILLIS_PER_SECOND},
    timer::{Clock, Control, Driver, RunState, Scheduler, Snapshot, TICK_PERIOD, TickHandle},
    validate::{is_valid_callback, is_valid_target},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickPolicy {
    /// One-shot wait for the sub-second remainder, so steady ticks land on
    /// whole seconds before the target.
    Align,
    /// Re-derive the remaining time from the target and the clock.
    Recompute,
    /// Count the held parts down by one second without reading the clock.
    Decrement,
}

#[derive(Debug, Clone, Copy)]
struct LiveTick {
    handle: TickHandle,
    policy: TickPolicy,
}

/// Counts down towards an [`ExpiryTimestamp`] and fires its [`OnExpire`] once
/// per target.
pub struct Countdown<S, C> {
    expiry_timestamp: ExpiryTimestamp,
    on_expire: Option<OnExpire>,
    parts: TimeParts,
    state: RunState,
    tick: Option<LiveTick>,
    /// Latched on expiry, cleared when a new target is assigned.
    expired: bool,
    target_revision: u64,
    /// Target revision the last attach reaction ran for. `None` while detached.
    attached_revision: Option<u64>,
    scheduler: S,
    clock: C,
}

impl<S: Scheduler, C: Clock> Countdown<S, C> {
    pub fn new(settings: TimerSettings, scheduler: S, clock: C) -> Self {
        Self {
            expiry_timestamp: settings.expiry_timestamp,
            on_expire: settings.on_expire,
            parts: TimeParts::ZERO,
            state: RunState::Stopped,
            tick: None,
            expired: false,
            target_revision: 0,
            attached_revision: None,
            scheduler,
            clock,
        }
    }

    pub fn expiry_timestamp(&self) -> ExpiryTimestamp {
        self.expiry_timestamp
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

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.parts, self.state)
    }

    /// Recomputes from the clock now and every tick after.
    pub fn start(&mut self) {
        if self.tick.is_some() {
            debug!("countdown already armed, start ignored");
            return;
        }
        if !is_valid_target(self.expiry_timestamp) {
            return;
        }
        if self.recompute() {
            self.arm(TickPolicy::Recompute, TICK_PERIOD);
        }
    }

    pub fn pause(&mut self) {
        self.disarm();
        self.state = RunState::Stopped;
    }

    /// Continues from the held parts, one second per tick. Time spent paused is
    /// not charged against the countdown.
    pub fn resume(&mut self) {
        if self.tick.is_some() {
            debug!("countdown already armed, resume ignored");
            return;
        }
        if !is_valid_target(self.expiry_timestamp) {
            return;
        }
        if self.expired || self.parts.is_zero() {
            debug!(expired = self.expired, "nothing left to resume");
            return;
        }
        self.arm(TickPolicy::Decrement, TICK_PERIOD);
    }

    /// Replaces the target. The attach reaction for it runs on the next
    /// [`Countdown::sync`].
    pub fn restart(&mut self, expiry_timestamp: impl Into<ExpiryTimestamp>) {
        self.disarm();
        self.parts = TimeParts::ZERO;
        self.state = RunState::Stopped;
        self.expiry_timestamp = expiry_timestamp.into();
        self.expired = false;
        self.target_revision += 1;
    }

    pub fn reset(&mut self) {
        self.disarm();
        self.parts = TimeParts::ZERO;
        self.state = RunState::Stopped;
    }

    pub fn attach(&mut self) {
        self.attached_revision = Some(self.target_revision);
        self.on_target();
    }

    pub fn sync(&mut self) {
        match self.attached_revision {
            Some(revision) if revision != self.target_revision => {
                self.attached_revision = Some(self.target_revision);
                self.on_target();
            }
            _ => {}
        }
    }

    pub fn detach(&mut self) {
        self.disarm();
        self.state = RunState::Stopped;
        self.attached_revision = None;
    }

    pub fn on_tick(&mut self, handle: TickHandle) {
        let policy = match self.tick {
            Some(live) if live.handle == handle => live.policy,
            _ => {
                trace!(?handle, "stale countdown tick ignored");
                return;
            }
        };
        match policy {
            TickPolicy::Align => {
                self.disarm();
                if self.recompute() {
                    self.start();
                }
            }
            TickPolicy::Recompute => {
                self.recompute();
            }
            TickPolicy::Decrement => {
                if !self.parts.decrement() || self.parts.is_zero() {
                    self.expire();
                }
            }
        }
    }

    fn on_target(&mut self) {
        self.disarm();
        if !is_valid_target(self.expiry_timestamp) {
            return;
        }
        let distance = self.distance();
        if distance <= 0 {
            self.expire();
            return;
        }
        self.parts = TimeParts::from_millis(distance as u64);
        let extra_millis = distance as u64 % MILLIS_PER_SECOND;
        if extra_millis > 0 {
            self.arm(TickPolicy::Align, Duration::from_millis(extra_millis));
        } else {
            self.start();
        }
    }

    fn distance(&self) -> i64 {
        self.expiry_timestamp.distance_from(self.clock.now_millis())
    }

    /// Returns false when the target has been reached and the countdown expired.
    fn recompute(&mut self) -> bool {
        let distance = self.distance();
        if distance <= 0 {
            self.expire();
            return false;
        }
        self.parts = TimeParts::from_millis(distance as u64);
        true
    }

    fn expire(&mut self) {
        self.disarm();
        self.parts = TimeParts::ZERO;
        self.state = RunState::Stopped;
        if self.expired {
            debug!(expiry_timestamp = %self.expiry_timestamp, "countdown already expired");
            return;
        }
        self.expired = true;
        debug!(expiry_timestamp = %self.expiry_timestamp, "countdown expired");
        if is_valid_callback(self.on_expire.as_ref()) {
            if let Some(on_expire) = self.on_expire.as_mut() {
                on_expire.invoke(self.expiry_timestamp);
            }
        }
    }

    fn arm(&mut self, policy: TickPolicy, wait: Duration) {
        if self.tick.is_some() {
            return;
        }
        let handle = match policy {
            TickPolicy::Align => self.scheduler.arm_once(wait),
            TickPolicy::Recompute | TickPolicy::Decrement => self.scheduler.arm_interval(wait),
        };
        self.tick = Some(LiveTick { handle, policy });
        self.state = RunState::Running;
    }

    fn disarm(&mut self) {
        if let Some(live) = self.tick.take() {
            self.scheduler.disarm(live.handle);
        }
    }
}

impl<S: Scheduler, C: Clock> Driver for Countdown<S, C> {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn attach(&mut self) {
        Countdown::attach(self);
    }

    fn detach(&mut self) {
        Countdown::detach(self);
    }

    fn sync(&mut self) {
        Countdown::sync(self);
    }

    fn on_tick(&mut self, handle: TickHandle) {
        Countdown::on_tick(self, handle);
    }

    fn apply(&mut self, control: Control) -> Result<(), TimerError> {
        match control {
            Control::Start => self.start(),
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
            Control::Restart(expiry_timestamp) => self.restart(expiry_timestamp),
            Control::Reset => self.reset(),
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Countdown::snapshot(self)
    }
}
