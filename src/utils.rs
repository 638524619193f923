use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the unix epoch, negative for times before it.
pub(crate) fn timestamp_millis() -> i64 {
    system_time_millis(SystemTime::now())
}

pub(crate) fn system_time_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_millis())
            .map(|millis| -millis)
            .unwrap_or(i64::MIN),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_system_time_millis_around_epoch() {
        assert_eq!(system_time_millis(UNIX_EPOCH), 0);
        assert_eq!(
            system_time_millis(UNIX_EPOCH + Duration::from_millis(1_500)),
            1_500
        );
        assert_eq!(
            system_time_millis(UNIX_EPOCH - Duration::from_millis(250)),
            -250
        );
    }

    #[test]
    fn test_timestamp_millis_is_after_epoch() {
        assert!(timestamp_millis() > 0);
    }
}
