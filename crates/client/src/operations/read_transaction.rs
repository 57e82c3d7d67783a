//! Reads back a journal transaction by its record key.
//!
//! The canonical reconciliation path after an ambiguous outcome (a
//! cancelled or transport-failed batch): look the record up instead of
//! resubmitting it.

use meridian_ledger::{LedgerTransaction, WireObject};
use meridian_wire::{Element, Result as WireResult, WireError};

use crate::operation::Operation;

/// Fetches one ledger transaction by key.
pub struct ReadLedgerTransaction {
    key: String,
}

impl ReadLedgerTransaction {
    pub fn new(key: impl Into<String>) -> Self {
        ReadLedgerTransaction { key: key.into() }
    }
}

impl Operation for ReadLedgerTransaction {
    type Output = LedgerTransaction;

    fn function_name(&self) -> &'static str {
        "get_gltransaction"
    }

    fn build_payload(&self) -> WireResult<Vec<Element>> {
        Ok(vec![Element::text("key", &self.key)])
    }

    fn parse_value(&self, data: Option<&Element>) -> WireResult<Self::Output> {
        let element = data.ok_or_else(|| WireError::missing("result", "data"))?;
        LedgerTransaction::from_element(element)
    }
}
