//! Notification sink port trait.

use crate::domain::error::DipbotError;

pub trait NotifyPort {
    fn send_notification(&self, message: &str) -> Result<(), DipbotError>;
}
