//! Argument checks that downgrade bad input to "do nothing" plus one warning.

use tracing::warn;

use crate::{settings::OnExpire, time::ExpiryTimestamp};

/// A target is usable iff it lies strictly after the unix epoch.
pub fn is_valid_target(expiry_timestamp: ExpiryTimestamp) -> bool {
    let valid = expiry_timestamp.as_millis() > 0;
    if !valid {
        warn!(%expiry_timestamp, "invalid expiry_timestamp settings");
    }
    valid
}

/// An absent callback is silently invalid. A present one that cannot be
/// invoked is invalid and warned about.
pub fn is_valid_callback(on_expire: Option<&OnExpire>) -> bool {
    match on_expire {
        None => false,
        Some(on_expire) if on_expire.is_invocable() => true,
        Some(on_expire) => {
            warn!(?on_expire, "invalid on_expire settings");
            false
        }
    }
}
