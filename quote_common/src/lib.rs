//!
//! Common types and utilities shared by the message service and the billboard.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` used across the workspace.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `quote`: the `Quote` record exchanged over HTTP.
//! - `net`: default ports and the logical service name.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod quote;
pub mod result;

pub use error::QuoteError;
pub use quote::Quote;
pub use result::Result;
