//! A journal transaction: a group of ledger entries that accomplish a
//! specific purpose.
//!
//! The remote service refuses to create a transaction whose credit entries
//! do not sum to the same amount as its debit entries. That rule is not
//! checked here: transactions frequently mix currencies and exchange
//! rates, so imbalance is only surfaced as a remote validation error on
//! the operation result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meridian_wire::{Element, Result};

use crate::entry::{EntryKind, LedgerEntry};
use crate::mapper::{self, WireObject};

/// A credit/debit pair did not have the expected kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryPairError {
    #[error("credit entry must have kind Credit")]
    CreditKind,
    #[error("debit entry must have kind Debit")]
    DebitKind,
}

/// A general-ledger transaction. Exclusively owns its entries; entries do
/// not reference the transaction back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// The ID of the journal to post to. See [`crate::journal`] for the
    /// built-in journals.
    pub journal_id: String,
    pub date_created: Option<NaiveDate>,
    pub description: Option<String>,
    pub entries: Vec<LedgerEntry>,
}

impl LedgerTransaction {
    pub fn new(
        journal_id: impl Into<String>,
        description: Option<&str>,
        entries: Vec<LedgerEntry>,
        date_created: NaiveDate,
    ) -> Self {
        LedgerTransaction {
            journal_id: journal_id.into(),
            date_created: Some(date_created),
            description: description.map(str::to_owned),
            entries,
        }
    }

    /// Appends a credit/debit pair, returning the extended transaction.
    ///
    /// The pair should balance to zero, but that is not validated here
    /// (exchange rates and currencies may differ); only the entry kinds
    /// are checked.
    pub fn with_entry_pair(
        mut self,
        credit: LedgerEntry,
        debit: LedgerEntry,
    ) -> std::result::Result<Self, EntryPairError> {
        if credit.kind != EntryKind::Credit {
            return Err(EntryPairError::CreditKind);
        }
        if debit.kind != EntryKind::Debit {
            return Err(EntryPairError::DebitKind);
        }
        self.entries.push(credit);
        self.entries.push(debit);
        Ok(self)
    }
}

impl WireObject for LedgerTransaction {
    const WIRE_NAME: &'static str = "gltransaction";

    fn to_fields(&self) -> Vec<Element> {
        let mut fields = Vec::new();
        mapper::push_text(&mut fields, "journalid", Some(&self.journal_id));
        mapper::push_date(&mut fields, "datecreated", self.date_created);
        mapper::push_text(&mut fields, "description", self.description.as_deref());
        mapper::push_array(&mut fields, "gltransactionentries", &self.entries);
        fields
    }

    fn from_element(element: &Element) -> Result<Self> {
        Ok(LedgerTransaction {
            journal_id: mapper::required_text(element, "journalid")?,
            date_created: mapper::child_date(element, "datecreated")?,
            description: mapper::child_text(element, "description"),
            entries: mapper::child_array(element, "gltransactionentries")?.unwrap_or_default(),
        })
    }
}
