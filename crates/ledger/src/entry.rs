//! A line item inside a ledger transaction that increases or decreases an
//! individual account.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_wire::{Element, Result, WireError};

use crate::custom_field::CustomField;
use crate::mapper::{self, WireObject};

/// Whether an entry credits or debits its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl EntryKind {
    /// The service requires lower case on the wire.
    pub fn wire_text(self) -> &'static str {
        match self {
            EntryKind::Credit => "credit",
            EntryKind::Debit => "debit",
        }
    }

    fn from_wire(field: &str, raw: &str) -> Result<Self> {
        match raw {
            "credit" => Ok(EntryKind::Credit),
            "debit" => Ok(EntryKind::Debit),
            _ => Err(WireError::format(field, raw, "credit or debit")),
        }
    }
}

/// Accounting dimensions applied to one side of a balanced entry pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDimensions {
    pub department_id: Option<String>,
    pub class_id: Option<String>,
    pub location_id: Option<String>,
}

/// A single general-ledger line item.
///
/// Only the kind, amount, and account number are required; every other
/// field is optional and omitted from the wire when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: Decimal,
    pub account_no: String,
    pub document: Option<String>,
    pub date_created: Option<NaiveDate>,
    pub memo: Option<String>,
    pub location_id: Option<String>,
    pub department_id: Option<String>,
    pub customer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub employee_id: Option<String>,
    pub project_id: Option<String>,
    pub item_id: Option<String>,
    pub class_id: Option<String>,
    pub custom_fields: Vec<CustomField>,
    pub recon_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub exchange_rate_date: Option<NaiveDate>,
    pub exchange_rate_type: Option<String>,
    pub exchange_rate: Option<String>,
}

impl LedgerEntry {
    /// Creates an entry with the required fields; everything else starts
    /// unset and can be filled in before the entry joins a transaction.
    pub fn new(
        kind: EntryKind,
        amount: Decimal,
        account_no: impl Into<String>,
        date_created: Option<NaiveDate>,
    ) -> Self {
        LedgerEntry {
            kind,
            amount,
            account_no: account_no.into(),
            document: None,
            date_created,
            memo: None,
            location_id: None,
            department_id: None,
            customer_id: None,
            vendor_id: None,
            employee_id: None,
            project_id: None,
            item_id: None,
            class_id: None,
            custom_fields: Vec::new(),
            recon_date: None,
            currency: None,
            exchange_rate_date: None,
            exchange_rate_type: None,
            exchange_rate: None,
        }
    }

    /// Builds a balanced credit/debit pair: two entries with the same
    /// amount, memo, and creation date, one `Credit` and one `Debit`, each
    /// carrying its own accounting dimensions.
    ///
    /// The pair sums to zero by construction, which is what the remote
    /// service requires of a complete transaction.
    pub fn balanced_pair(
        amount: Decimal,
        account_no: &str,
        memo: Option<&str>,
        date_created: NaiveDate,
        credit_dimensions: EntryDimensions,
        debit_dimensions: EntryDimensions,
    ) -> (LedgerEntry, LedgerEntry) {
        let base = |kind: EntryKind, dimensions: EntryDimensions| {
            let mut entry = LedgerEntry::new(kind, amount, account_no, Some(date_created));
            entry.memo = memo.map(str::to_owned);
            entry.department_id = dimensions.department_id;
            entry.class_id = dimensions.class_id;
            entry.location_id = dimensions.location_id;
            entry
        };
        (
            base(EntryKind::Credit, credit_dimensions),
            base(EntryKind::Debit, debit_dimensions),
        )
    }
}

impl WireObject for LedgerEntry {
    const WIRE_NAME: &'static str = "glentry";

    fn to_fields(&self) -> Vec<Element> {
        let mut fields = Vec::new();
        mapper::push_text(&mut fields, "trtype", Some(self.kind.wire_text()));
        mapper::push_amount(&mut fields, "amount", self.amount);
        mapper::push_text(&mut fields, "glaccountno", Some(&self.account_no));
        mapper::push_text(&mut fields, "document", self.document.as_deref());
        mapper::push_date(&mut fields, "datecreated", self.date_created);
        mapper::push_text(&mut fields, "memo", self.memo.as_deref());
        mapper::push_text(&mut fields, "locationid", self.location_id.as_deref());
        mapper::push_text(&mut fields, "departmentid", self.department_id.as_deref());
        mapper::push_text(&mut fields, "customerid", self.customer_id.as_deref());
        mapper::push_text(&mut fields, "vendorid", self.vendor_id.as_deref());
        mapper::push_text(&mut fields, "employeeid", self.employee_id.as_deref());
        mapper::push_text(&mut fields, "projectid", self.project_id.as_deref());
        mapper::push_text(&mut fields, "itemid", self.item_id.as_deref());
        mapper::push_text(&mut fields, "classid", self.class_id.as_deref());
        mapper::push_array(&mut fields, "customfields", &self.custom_fields);
        mapper::push_date(&mut fields, "recon_date", self.recon_date);
        mapper::push_text(&mut fields, "currency", self.currency.as_deref());
        mapper::push_date(&mut fields, "exchratedate", self.exchange_rate_date);
        mapper::push_text(&mut fields, "exchratetype", self.exchange_rate_type.as_deref());
        mapper::push_text(&mut fields, "exchrate", self.exchange_rate.as_deref());
        fields
    }

    fn from_element(element: &Element) -> Result<Self> {
        let kind_raw = mapper::required_text(element, "trtype")?;
        Ok(LedgerEntry {
            kind: EntryKind::from_wire("trtype", &kind_raw)?,
            amount: mapper::required_amount(element, "amount")?,
            account_no: mapper::required_text(element, "glaccountno")?,
            document: mapper::child_text(element, "document"),
            date_created: mapper::child_date(element, "datecreated")?,
            memo: mapper::child_text(element, "memo"),
            location_id: mapper::child_text(element, "locationid"),
            department_id: mapper::child_text(element, "departmentid"),
            customer_id: mapper::child_text(element, "customerid"),
            vendor_id: mapper::child_text(element, "vendorid"),
            employee_id: mapper::child_text(element, "employeeid"),
            project_id: mapper::child_text(element, "projectid"),
            item_id: mapper::child_text(element, "itemid"),
            class_id: mapper::child_text(element, "classid"),
            custom_fields: mapper::child_array(element, "customfields")?.unwrap_or_default(),
            recon_date: mapper::child_date(element, "recon_date")?,
            currency: mapper::child_text(element, "currency"),
            exchange_rate_date: mapper::child_date(element, "exchratedate")?,
            exchange_rate_type: mapper::child_text(element, "exchratetype"),
            exchange_rate: mapper::child_text(element, "exchrate"),
        })
    }
}
