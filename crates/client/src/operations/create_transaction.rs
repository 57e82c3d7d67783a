//! Creates a journal transaction - a group of journal entries.
//!
//! The service refuses the function when the entries do not sum to zero
//! (balanced debit and credit records); that rejection arrives as a
//! remote error on this operation's result, not as a local failure.

use chrono::NaiveDate;

use meridian_ledger::{CustomField, LedgerTransaction, WireObject, mapper};
use meridian_wire::{Element, Result as WireResult, WireError};

use crate::operation::Operation;

/// Creates a ledger transaction in any journal except the statistical
/// one.
///
/// # Example
///
/// ```rust,ignore
/// let (credit, debit) = LedgerEntry::balanced_pair(
///     dec!(100.00), "4000", Some("August accrual"), today,
///     EntryDimensions::default(), EntryDimensions::default(),
/// );
/// let transaction = LedgerTransaction::new(journal::GENERAL, Some("Accrual"), vec![], today)
///     .with_entry_pair(credit, debit)?;
/// let result = client
///     .execute_one(&session, &CreateLedgerTransaction::new(transaction), &cancel)
///     .await?;
/// ```
pub struct CreateLedgerTransaction {
    transaction: LedgerTransaction,
    reverse_date: Option<NaiveDate>,
    reference_no: Option<String>,
    source_entity: Option<String>,
    custom_fields: Vec<CustomField>,
}

impl CreateLedgerTransaction {
    pub fn new(transaction: LedgerTransaction) -> Self {
        CreateLedgerTransaction {
            transaction,
            reverse_date: None,
            reference_no: None,
            source_entity: None,
            custom_fields: Vec::new(),
        }
    }

    /// Date on which the service should post the reversing transaction.
    pub fn reverse_date(mut self, date: NaiveDate) -> Self {
        self.reverse_date = Some(date);
        self
    }

    pub fn reference_no(mut self, reference_no: impl Into<String>) -> Self {
        self.reference_no = Some(reference_no.into());
        self
    }

    pub fn source_entity(mut self, source_entity: impl Into<String>) -> Self {
        self.source_entity = Some(source_entity.into());
        self
    }

    /// Custom fields attached to the transaction itself, as opposed to
    /// the ones carried by individual entries.
    pub fn custom_fields(mut self, custom_fields: Vec<CustomField>) -> Self {
        self.custom_fields = custom_fields;
        self
    }
}

impl Operation for CreateLedgerTransaction {
    type Output = LedgerTransaction;

    fn function_name(&self) -> &'static str {
        "create_gltransaction"
    }

    fn build_payload(&self) -> WireResult<Vec<Element>> {
        let mut fields = self.transaction.to_fields();
        mapper::push_date(&mut fields, "reversedate", self.reverse_date);
        mapper::push_text(&mut fields, "referenceno", self.reference_no.as_deref());
        mapper::push_text(&mut fields, "sourceentity", self.source_entity.as_deref());
        mapper::push_array(&mut fields, "customfields", &self.custom_fields);
        Ok(fields)
    }

    fn parse_value(&self, data: Option<&Element>) -> WireResult<Self::Output> {
        let element = data.ok_or_else(|| WireError::missing("result", "data"))?;
        LedgerTransaction::from_element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use meridian_ledger::journal;

    fn operation() -> CreateLedgerTransaction {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        CreateLedgerTransaction::new(LedgerTransaction::new(
            journal::GENERAL,
            Some("Accrual"),
            vec![],
            date,
        ))
        .reference_no("INV-2041")
        .reverse_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    }

    #[test]
    fn test_payload_appends_auxiliary_fields_after_transaction() {
        let payload = operation().build_payload().unwrap();
        let names: Vec<_> = payload.iter().map(Element::name).collect();
        assert_eq!(
            names,
            vec![
                "journalid",
                "datecreated",
                "description",
                "reversedate",
                "referenceno"
            ]
        );
    }

    #[test]
    fn test_parse_requires_data() {
        let err = operation().parse_value(None).unwrap_err();
        assert!(matches!(err, WireError::MissingField { .. }));
    }
}
