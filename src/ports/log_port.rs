//! Signal log sink port trait.

use crate::domain::error::DipbotError;

/// Append-only operator log; implementations prepend the timestamp.
pub trait SignalLogPort {
    fn log_line(&self, message: &str) -> Result<(), DipbotError>;
}
