//! Concrete operations, one module per remote function.

mod create_transaction;
mod end_session;
mod read_transaction;

pub use create_transaction::CreateLedgerTransaction;
pub use end_session::EndSession;
pub use read_transaction::ReadLedgerTransaction;
