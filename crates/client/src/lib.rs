//! # meridian-client - Session and batch protocol layer
//!
//! This crate implements the client side of the accounting service's
//! XML-over-HTTP batch protocol: authenticate once, bundle any number of
//! operations into a single request, and demultiplex the ordered response
//! back into one typed result per operation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meridian_client::{Client, ClientConfig, Credential};
//! use meridian_client::operations::CreateLedgerTransaction;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_config(ClientConfig::from_env()?)?;
//!     let cancel = CancellationToken::new();
//!
//!     let credential = Credential::new("finance@example.com", "acme", "secret");
//!     let session = client.open_session(&credential, &cancel).await?;
//!
//!     let operation = CreateLedgerTransaction::new(transaction);
//!     let result = client.execute_one(&session, &operation, &cancel).await?;
//!     if !result.success() {
//!         eprintln!("rejected: {:?}", result.errors);
//!     }
//!
//!     client.close_session(&session, &cancel).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Partial failure
//!
//! A batch is one wire exchange. When the envelope succeeds, every
//! operation gets its own [`OperationResult`] in submission order - a
//! rejected operation never discards its neighbours' results, and
//! [`ServiceResponse::overall_success`] stays true. Check both levels.
//!
//! ## Concurrency
//!
//! A [`Session`] is cheap to clone and safe to share across concurrent
//! `execute` calls; its ticket is read-only after authentication and the
//! one post-authentication mutation (`Active → Expired` on ticket expiry)
//! is an atomic transition observed exactly once.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod operations;
pub mod session;
pub mod transport;

pub use client::{Client, ServiceResponse};
pub use config::{ClientConfig, ConfigError, Credential};
pub use envelope::ResultBlock;
pub use error::{ClientError, RemoteError, Result, TransportError};
pub use operation::{BatchOperation, ErasedResult, Operation, OperationResult};
pub use session::{Session, SessionStatus};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::Transport;
