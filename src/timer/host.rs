use async_channel::{Receiver, Sender};
use log::{debug, info, warn};

use crate::{
    error::TimerError,
    settings::{StopwatchSettings, TimerSettings},
    time::ExpiryTimestamp,
    timer::{
        Clock, Control, Countdown, Driver, Snapshot, Stopwatch, SystemClock, TickHandle,
        TokioScheduler,
    },
};

/// Receives every snapshot that differs from the previous one.
#[async_trait::async_trait]
pub trait Render: Send + 'static {
    async fn render(&mut self, snapshot: Snapshot);
}

#[async_trait::async_trait]
impl Render for Sender<Snapshot> {
    async fn render(&mut self, snapshot: Snapshot) {
        if self.send(snapshot).await.is_err() {
            debug!("snapshot dropped, no renderer listening");
        }
    }
}

enum HostSignal {
    Control(Control),
    Detach,
}

/// Sends controls to a running [`TimerHost`].
#[derive(Clone)]
pub struct HostHandle {
    signals: Sender<HostSignal>,
}

impl HostHandle {
    pub async fn start(&self) -> Result<(), TimerError> {
        self.control(Control::Start).await
    }

    pub async fn pause(&self) -> Result<(), TimerError> {
        self.control(Control::Pause).await
    }

    pub async fn resume(&self) -> Result<(), TimerError> {
        self.control(Control::Resume).await
    }

    pub async fn restart(
        &self,
        expiry_timestamp: impl Into<ExpiryTimestamp>,
    ) -> Result<(), TimerError> {
        self.control(Control::Restart(expiry_timestamp.into())).await
    }

    pub async fn reset(&self) -> Result<(), TimerError> {
        self.control(Control::Reset).await
    }

    pub async fn control(&self, control: Control) -> Result<(), TimerError> {
        self.send(HostSignal::Control(control)).await
    }

    /// Unmounts the tracker. The host's `run` returns afterwards.
    pub async fn detach(&self) -> Result<(), TimerError> {
        self.send(HostSignal::Detach).await
    }

    async fn send(&self, signal: HostSignal) -> Result<(), TimerError> {
        self.signals
            .send(signal)
            .await
            .map_err(|_| TimerError::HostDetached)
    }
}

/// Owns one driver and delivers its controls and ticks one at a time.
pub struct TimerHost<D, R> {
    driver: D,
    ticks: Receiver<TickHandle>,
    signals: Receiver<HostSignal>,
    render: R,
}

impl<D: Driver, R: Render> TimerHost<D, R> {
    /// Builds the driver on a fresh [`TokioScheduler`] whose ticks feed this host.
    pub fn with_driver<F>(make_driver: F, render: R) -> (Self, HostHandle)
    where
        F: FnOnce(TokioScheduler) -> D,
    {
        let (scheduler, ticks) = TokioScheduler::channel();
        let (signal_sender, signals) = async_channel::unbounded();
        let host = Self {
            driver: make_driver(scheduler),
            ticks,
            signals,
            render,
        };
        (
            host,
            HostHandle {
                signals: signal_sender,
            },
        )
    }

    /// Attaches the driver and serves it until detached or every handle is dropped.
    pub async fn run(mut self) -> Result<D, TimerError> {
        info!("{} attached", self.driver.name());
        self.driver.attach();
        let mut last = self.driver.snapshot();
        self.render.render(last).await;

        loop {
            tokio::select! {
                biased;
                signal = self.signals.recv() => match signal {
                    Ok(HostSignal::Control(control)) => {
                        debug!("{} <- {}", self.driver.name(), control.name());
                        if let Err(err) = self.driver.apply(control) {
                            warn!("{err}");
                        }
                    }
                    Ok(HostSignal::Detach) | Err(_) => break,
                },
                Ok(handle) = self.ticks.recv() => self.driver.on_tick(handle),
            }

            self.driver.sync();
            let snapshot = self.driver.snapshot();
            if snapshot != last {
                last = snapshot;
                self.render.render(snapshot).await;
            }
        }

        self.driver.detach();
        info!("{} detached", self.driver.name());
        let snapshot = self.driver.snapshot();
        if snapshot != last {
            self.render.render(snapshot).await;
        }
        Ok(self.driver)
    }
}

impl<C, R> TimerHost<Countdown<TokioScheduler, C>, R>
where
    C: Clock,
    R: Render,
{
    pub fn countdown_with_clock(
        settings: TimerSettings,
        clock: C,
        render: R,
    ) -> (Self, HostHandle) {
        Self::with_driver(|scheduler| Countdown::new(settings, scheduler, clock), render)
    }
}

impl<R: Render> TimerHost<Countdown<TokioScheduler, SystemClock>, R> {
    pub fn countdown(settings: TimerSettings, render: R) -> (Self, HostHandle) {
        Self::countdown_with_clock(settings, SystemClock, render)
    }
}

impl<R: Render> TimerHost<Stopwatch<TokioScheduler>, R> {
    pub fn stopwatch(settings: StopwatchSettings, render: R) -> (Self, HostHandle) {
        Self::with_driver(|scheduler| Stopwatch::new(settings, scheduler), render)
    }
}
