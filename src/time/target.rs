use std::{fmt, time::SystemTime};

use crate::utils;

/// The absolute point in time a countdown runs towards, in epoch milliseconds.
///
/// Any value can be held, including ones that are not a usable point in time
/// (zero or negative). The validator decides whether scheduling happens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryTimestamp(i64);

impl ExpiryTimestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Signed distance from `now_millis` to this timestamp.
    pub(crate) fn distance_from(&self, now_millis: i64) -> i64 {
        self.0.saturating_sub(now_millis)
    }
}

impl From<i64> for ExpiryTimestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<SystemTime> for ExpiryTimestamp {
    fn from(time: SystemTime) -> Self {
        Self(utils::system_time_millis(time))
    }
}

impl fmt::Display for ExpiryTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn test_from_system_time() {
        let ts = ExpiryTimestamp::from(UNIX_EPOCH + Duration::from_secs(2));
        assert_eq!(ts.as_millis(), 2_000);

        let before_epoch = ExpiryTimestamp::from(UNIX_EPOCH - Duration::from_secs(1));
        assert_eq!(before_epoch.as_millis(), -1_000);
    }

    #[test]
    fn test_distance_from_saturates() {
        let ts = ExpiryTimestamp::from_millis(i64::MIN);
        assert_eq!(ts.distance_from(1), i64::MIN);
        assert_eq!(ExpiryTimestamp::from_millis(5_000).distance_from(3_500), 1_500);
    }
}
