use std::{fmt, time::Duration};

use async_channel::Sender;
use tracing::warn;

use crate::{time::ExpiryTimestamp, timer::TimerEvent, utils};

/// What a countdown does when it expires.
pub enum OnExpire {
    /// Call a closure. An `Err` is logged and otherwise ignored.
    Call(Box<dyn FnMut() -> anyhow::Result<()> + Send>),
    /// Send [`TimerEvent::Expired`] to a channel. Not invocable once every
    /// receiver has been dropped.
    Notify(Sender<TimerEvent>),
}

impl OnExpire {
    pub fn call<F>(callback: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        Self::Call(Box::new(callback))
    }

    pub fn is_invocable(&self) -> bool {
        match self {
            Self::Call(_) => true,
            Self::Notify(sender) => !sender.is_closed(),
        }
    }

    pub(crate) fn invoke(&mut self, expiry_timestamp: ExpiryTimestamp) {
        match self {
            Self::Call(callback) => {
                if let Err(err) = callback() {
                    warn!(%expiry_timestamp, error = %err, "on_expire callback failed");
                }
            }
            Self::Notify(sender) => {
                if let Err(err) = sender.try_send(TimerEvent::Expired { expiry_timestamp }) {
                    warn!(%expiry_timestamp, error = %err, "on_expire event was not delivered");
                }
            }
        }
    }
}

impl fmt::Debug for OnExpire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(_) => f.write_str("OnExpire::Call(..)"),
            Self::Notify(sender) => f
                .debug_struct("OnExpire::Notify")
                .field("closed", &sender.is_closed())
                .finish(),
        }
    }
}

/// Countdown configuration.
#[derive(Debug, Default)]
pub struct TimerSettings {
    pub expiry_timestamp: ExpiryTimestamp,
    pub on_expire: Option<OnExpire>,
}

impl TimerSettings {
    pub fn new(expiry_timestamp: impl Into<ExpiryTimestamp>) -> Self {
        Self {
            expiry_timestamp: expiry_timestamp.into(),
            on_expire: None,
        }
    }

    /// Expire `duration` from now, measured on the system clock.
    pub fn expiring_in(duration: Duration) -> Self {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self::new(utils::timestamp_millis().saturating_add(millis))
    }

    pub fn with_on_expire<F>(mut self, callback: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        self.on_expire = Some(OnExpire::call(callback));
        self
    }

    pub fn with_expiry_notify(mut self, sender: Sender<TimerEvent>) -> Self {
        self.on_expire = Some(OnExpire::Notify(sender));
        self
    }
}

/// Stopwatch configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct StopwatchSettings {
    pub auto_start: bool,
}

impl StopwatchSettings {
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_is_invocable_while_receiver_alive() {
        let (sender, receiver) = async_channel::unbounded();
        let mut on_expire = OnExpire::Notify(sender);
        assert!(on_expire.is_invocable());

        on_expire.invoke(ExpiryTimestamp::from_millis(42));
        assert_eq!(
            receiver.try_recv().unwrap(),
            TimerEvent::Expired {
                expiry_timestamp: ExpiryTimestamp::from_millis(42)
            }
        );

        drop(receiver);
        assert!(!on_expire.is_invocable());
    }

    #[test]
    fn test_failing_callback_is_contained() {
        let mut on_expire = OnExpire::call(|| Err(anyhow::anyhow!("display gone")));
        assert!(on_expire.is_invocable());
        on_expire.invoke(ExpiryTimestamp::from_millis(1));
    }

    #[test]
    fn test_expiring_in_is_in_the_future() {
        let now = utils::timestamp_millis();
        let settings = TimerSettings::expiring_in(Duration::from_secs(30));
        assert!(settings.expiry_timestamp.as_millis() >= now + 30_000);
        assert!(settings.on_expire.is_none());
    }
}
