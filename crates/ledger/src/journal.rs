//! Built-in journal identifiers.
//!
//! The remote service only accepts recognized journal IDs when creating a
//! transaction; these constants cover the journals every company starts
//! with. Companies can define additional journals, so any string is
//! accepted wherever a journal ID is taken.

pub const ACCOUNTS_PAYABLE: &str = "APJ";
pub const ACCOUNTS_RECEIVABLE: &str = "ARJ";
pub const CASH_DISBURSEMENTS: &str = "CDJ";
pub const CASH_RECEIPTS: &str = "CRJ";
pub const EMPLOYEE_EXPENSES_DISBURSEMENTS: &str = "EEDJ";
pub const EMPLOYEE_EXPENSES: &str = "EEJ";
pub const GENERAL: &str = "GJ";
pub const INTER_ENTITY_PAYABLES: &str = "IEPJ";
pub const INTER_ENTITY_RECEIVABLES: &str = "IERJ";
pub const INVENTORY: &str = "IJ";
pub const OPENING_BALANCE: &str = "OBJ";
pub const PAYROLL: &str = "PYRJ";
pub const PURCHASE: &str = "PJ";
pub const SALES: &str = "SJ";
pub const STATISTICAL: &str = "STATJ";
