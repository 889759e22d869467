//! Quote sources of the message service.
//!
//! - `quote_source`: the `QuoteSource` contract and the `QuoteBackend` selector.
//! - `static_quotes`: in-memory list taken from the settings file.
//! - `store`: SQLite-backed source.

pub mod quote_source;
pub mod static_quotes;
pub mod store;

pub use quote_source::{QuoteBackend, QuoteSource};
pub use static_quotes::StaticQuotes;
pub use store::QuoteStore;
