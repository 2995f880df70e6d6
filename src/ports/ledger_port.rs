//! Trade ledger sink port trait.

use crate::domain::emitter::TradeRecord;
use crate::domain::error::DipbotError;

pub trait LedgerPort {
    fn append_record(&self, record: &TradeRecord) -> Result<(), DipbotError>;
}
