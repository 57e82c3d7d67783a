//! # meridian-wire - Wire document layer for the Meridian client
//!
//! This crate provides the building blocks every other Meridian crate works
//! in terms of:
//!
//! - [`Element`]: an ordered, attribute-carrying wire element tree. The
//!   remote accounting service parses positionally-meaningful sequences, so
//!   child order is always preserved exactly as declared.
//! - [`codec`]: scalar encode/decode under the service's fixed formatting
//!   rules (two-decimal monetary amounts, year/month/day date elements).
//! - [`xml`]: rendering an element tree to an XML document and parsing a
//!   response document back into a tree, streamed through `quick-xml`
//!   events.
//!
//! The crate performs no I/O and knows nothing about sessions or
//! operations; it is the shared vocabulary between the domain model
//! (`meridian-ledger`) and the protocol layer (`meridian-client`).

pub mod codec;
pub mod element;
pub mod error;
pub mod xml;

pub use element::{Content, Element};
pub use error::{Result, WireError};
pub use xml::{parse_document, parse_str, render_document};
