//! Countdown and stopwatch trackers driven by a one second tick.
//!
//! A [`Countdown`] runs towards an [`ExpiryTimestamp`], re-reading the clock on
//! every tick and firing its [`OnExpire`] exactly once. A [`Stopwatch`] counts
//! up from zero. Both are plain state machines: a host delivers attach, detach
//! and tick signals one at a time and reads a [`Snapshot`] after each. The
//! [`TimerHost`] does that on tokio.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use minitick::{TimerHost, TimerSettings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (snapshots, rendered) = async_channel::unbounded();
//!     let settings = TimerSettings::expiring_in(Duration::from_secs(90)).with_on_expire(|| {
//!         println!("time is up");
//!         Ok(())
//!     });
//!     let (host, handle) = TimerHost::countdown(settings, snapshots);
//!     tokio::spawn(host.run());
//!
//!     while let Ok(snapshot) = rendered.recv().await {
//!         println!("{} running={}", snapshot.parts, snapshot.is_running());
//!         if !snapshot.is_running() {
//!             break;
//!         }
//!     }
//!     handle.detach().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod settings;
pub mod time;
pub mod timer;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;
pub(crate) mod utils;

pub use error::TimerError;
pub use settings::{OnExpire, StopwatchSettings, TimerSettings};
pub use time::{ExpiryTimestamp, TimeParts, decompose};
pub use timer::{
    Clock, Control, Countdown, Driver, HostHandle, MonotonicClock, Render, RunState, Scheduler,
    Snapshot, Stopwatch, SystemClock, TICK_PERIOD, TickHandle, TimerEvent, TimerHost,
    TokioScheduler, Tracker, TrackerSettings,
};
