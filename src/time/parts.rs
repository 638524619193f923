use std::fmt;

pub const MILLIS_PER_SECOND: u64 = 1_000;
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// A whole-second duration split into days, hours, minutes and seconds.
///
/// Values are only produced by [`decompose`], [`TimeParts::from_seconds`] and the
/// carry/borrow steps the drivers apply, so hours stay below 24 and minutes and
/// seconds below 60.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeParts {
    days: u64,
    hours: u8,
    minutes: u8,
    seconds: u8,
}

/// Splits a non-negative distance in milliseconds into [`TimeParts`].
///
/// Sub-second remainders are dropped.
pub fn decompose(distance_millis: u64) -> TimeParts {
    TimeParts {
        days: distance_millis / MILLIS_PER_DAY,
        hours: ((distance_millis % MILLIS_PER_DAY) / MILLIS_PER_HOUR) as u8,
        minutes: ((distance_millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u8,
        seconds: ((distance_millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u8,
    }
}

impl TimeParts {
    pub const ZERO: TimeParts = TimeParts {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn from_millis(distance_millis: u64) -> Self {
        decompose(distance_millis)
    }

    pub fn from_seconds(total_seconds: u64) -> Self {
        decompose(total_seconds.saturating_mul(MILLIS_PER_SECOND))
    }

    pub fn days(&self) -> u64 {
        self.days
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + u64::from(self.hours) * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Adds one second, carrying into minutes, hours and days.
    pub(crate) fn increment(&mut self) {
        if self.seconds < 59 {
            self.seconds += 1;
            return;
        }
        self.seconds = 0;
        if self.minutes < 59 {
            self.minutes += 1;
            return;
        }
        self.minutes = 0;
        if self.hours < 23 {
            self.hours += 1;
            return;
        }
        self.hours = 0;
        self.days = self.days.saturating_add(1);
    }

    /// Removes one second, borrowing from minutes, hours and days.
    /// Returns false and leaves the value untouched when it is already zero.
    pub(crate) fn decrement(&mut self) -> bool {
        if self.is_zero() {
            return false;
        }
        if self.seconds > 0 {
            self.seconds -= 1;
            return true;
        }
        self.seconds = 59;
        if self.minutes > 0 {
            self.minutes -= 1;
            return true;
        }
        self.minutes = 59;
        if self.hours > 0 {
            self.hours -= 1;
            return true;
        }
        self.hours = 23;
        self.days -= 1;
        true
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_mixed_distance() {
        let distance = 3 * MILLIS_PER_DAY + 2 * MILLIS_PER_HOUR + 5 * MILLIS_PER_MINUTE + 10_000;
        let parts = decompose(distance);

        assert_eq!(parts.days(), 3);
        assert_eq!(parts.hours(), 2);
        assert_eq!(parts.minutes(), 5);
        assert_eq!(parts.seconds(), 10);
    }

    #[test]
    fn test_decompose_drops_sub_second_remainder() {
        assert_eq!(decompose(999), TimeParts::ZERO);
        assert_eq!(decompose(1_999).seconds(), 1);
        assert_eq!(decompose(MILLIS_PER_DAY - 1).to_string(), "0:23:59:59");
    }

    #[test]
    fn test_from_seconds_matches_total() {
        let parts = TimeParts::from_seconds(3_661);
        assert_eq!(parts.to_string(), "0:01:01:01");
        assert_eq!(parts.total_seconds(), 3_661);
    }

    #[test]
    fn test_increment_carries_through_every_field() {
        let mut parts = TimeParts::from_seconds(SECONDS_PER_DAY - 1);
        assert_eq!(parts.to_string(), "0:23:59:59");

        parts.increment();
        assert_eq!(parts.to_string(), "1:00:00:00");

        parts.increment();
        assert_eq!(parts.to_string(), "1:00:00:01");
    }

    #[test]
    fn test_increment_matches_from_seconds() {
        let mut parts = TimeParts::ZERO;
        for _ in 0..3_661 {
            parts.increment();
        }
        assert_eq!(parts, TimeParts::from_seconds(3_661));
    }

    #[test]
    fn test_decrement_borrows_through_every_field() {
        let mut parts = TimeParts::from_seconds(SECONDS_PER_DAY);
        assert!(parts.decrement());
        assert_eq!(parts.to_string(), "0:23:59:59");

        let mut parts = TimeParts::from_seconds(1);
        assert!(parts.decrement());
        assert!(parts.is_zero());
        assert!(!parts.decrement());
        assert!(parts.is_zero());
    }
}
