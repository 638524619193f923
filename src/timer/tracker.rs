use crate::{
    error::TimerError,
    settings::{OnExpire, StopwatchSettings, TimerSettings},
    time::ExpiryTimestamp,
    timer::{Clock, Control, Countdown, Driver, Scheduler, Snapshot, Stopwatch, TickHandle},
};

/// Settings for the combined entry point.
#[derive(Debug, Default)]
pub struct TrackerSettings {
    pub expiry_timestamp: Option<ExpiryTimestamp>,
    pub on_expire: Option<OnExpire>,
    pub auto_start: bool,
}

/// Either kind of tracker behind one [`Driver`].
pub enum Tracker<S, C> {
    Countdown(Countdown<S, C>),
    Stopwatch(Stopwatch<S>),
}

impl<S: Scheduler, C: Clock> Tracker<S, C> {
    /// Builds a countdown when an expiry timestamp is given, otherwise a stopwatch.
    #[deprecated(note = "construct a `Countdown` or a `Stopwatch` directly")]
    pub fn from_settings(settings: TrackerSettings, scheduler: S, clock: C) -> Self {
        match settings.expiry_timestamp {
            Some(expiry_timestamp) => Self::Countdown(Countdown::new(
                TimerSettings {
                    expiry_timestamp,
                    on_expire: settings.on_expire,
                },
                scheduler,
                clock,
            )),
            None => Self::Stopwatch(Stopwatch::new(
                StopwatchSettings {
                    auto_start: settings.auto_start,
                },
                scheduler,
            )),
        }
    }

    fn driver(&self) -> &dyn Driver {
        match self {
            Self::Countdown(countdown) => countdown,
            Self::Stopwatch(stopwatch) => stopwatch,
        }
    }

    fn driver_mut(&mut self) -> &mut dyn Driver {
        match self {
            Self::Countdown(countdown) => countdown,
            Self::Stopwatch(stopwatch) => stopwatch,
        }
    }
}

impl<S: Scheduler, C: Clock> Driver for Tracker<S, C> {
    fn name(&self) -> &'static str {
        self.driver().name()
    }

    fn attach(&mut self) {
        self.driver_mut().attach();
    }

    fn detach(&mut self) {
        self.driver_mut().detach();
    }

    fn sync(&mut self) {
        self.driver_mut().sync();
    }

    fn on_tick(&mut self, handle: TickHandle) {
        self.driver_mut().on_tick(handle);
    }

    fn apply(&mut self, control: Control) -> Result<(), TimerError> {
        self.driver_mut().apply(control)
    }

    fn snapshot(&self) -> Snapshot {
        self.driver().snapshot()
    }
}
