use crate::time::ExpiryTimestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown reached its expiry timestamp.
    Expired { expiry_timestamp: ExpiryTimestamp },
}
