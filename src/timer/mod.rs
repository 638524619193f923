mod clock;
pub mod countdown;
pub(crate) mod driver;
pub mod event;
pub mod host;
pub mod scheduler;
pub mod stopwatch;
pub mod tracker;

pub use clock::{Clock, MonotonicClock, SystemClock, TICK_PERIOD};
pub use countdown::Countdown;
pub use driver::{Control, Driver, RunState, Snapshot};
pub use event::TimerEvent;
pub use host::{HostHandle, Render, TimerHost};
pub use scheduler::{Scheduler, TickHandle, TokioScheduler};
pub use stopwatch::Stopwatch;
pub use tracker::{Tracker, TrackerSettings};
