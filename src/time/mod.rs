pub mod parts;
pub mod target;

pub use parts::{TimeParts, decompose};
pub use target::ExpiryTimestamp;
