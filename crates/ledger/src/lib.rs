//! # meridian-ledger - General-ledger domain model
//!
//! Domain entities for the Meridian accounting API, plus the mapping
//! contract that converts them to and from ordered wire elements:
//!
//! - [`WireObject`]: the per-type wire-name binding, field serialization,
//!   and construct-from-element capability. Types that do not implement it
//!   cannot be handed to the mapper at all, so a missing binding is a
//!   compile error rather than a runtime fault.
//! - [`mapper`]: the field toolkit entities delegate to. Absent scalars are
//!   omitted from the output entirely; empty nested arrays omit their
//!   container element.
//! - [`LedgerTransaction`] / [`LedgerEntry`] / [`CustomField`]: the ledger
//!   entities themselves. A transaction exclusively owns its entries, and
//!   all aggregates are value-like: built up through exclusively-owned
//!   constructors, then treated as immutable once submitted.
//!
//! Whether a transaction balances (sum of credits equals sum of debits) is
//! enforced by the remote service, not locally; an unbalanced transaction
//! is surfaced as a remote validation error on its operation result.

pub mod custom_field;
pub mod entry;
pub mod journal;
pub mod mapper;
pub mod transaction;

pub use custom_field::CustomField;
pub use entry::{EntryDimensions, EntryKind, LedgerEntry};
pub use mapper::WireObject;
pub use transaction::{EntryPairError, LedgerTransaction};
