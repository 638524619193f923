use crate::{
    error::TimerError,
    time::{ExpiryTimestamp, TimeParts},
    timer::TickHandle,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// What a host reads after every update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub parts: TimeParts,
    pub state: RunState,
}

impl Snapshot {
    pub fn new(parts: TimeParts, state: RunState) -> Self {
        Self { parts, state }
    }

    pub fn days(&self) -> u64 {
        self.parts.days()
    }

    pub fn hours(&self) -> u8 {
        self.parts.hours()
    }

    pub fn minutes(&self) -> u8 {
        self.parts.minutes()
    }

    pub fn seconds(&self) -> u8 {
        self.parts.seconds()
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}

/// A user-facing control a host forwards to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Resume,
    Restart(ExpiryTimestamp),
    Reset,
}

impl Control {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Restart(_) => "restart",
            Self::Reset => "reset",
        }
    }
}

/// The signals a host delivers to a time tracker, one at a time.
pub trait Driver {
    fn name(&self) -> &'static str;

    /// The host mounted the tracker.
    fn attach(&mut self);

    /// The host unmounted the tracker. No tick may act afterwards.
    fn detach(&mut self);

    /// Re-run the attach reaction if a dependency changed since the last one.
    fn sync(&mut self) {}

    fn on_tick(&mut self, handle: TickHandle);

    fn apply(&mut self, control: Control) -> Result<(), TimerError>;

    fn snapshot(&self) -> Snapshot;
}

pub(crate) fn unsupported(driver: &'static str, control: Control) -> TimerError {
    TimerError::UnsupportedControl {
        control: control.name(),
        driver,
    }
}
