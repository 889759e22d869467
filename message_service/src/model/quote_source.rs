//! The `QuoteSource` contract shared by every quote backend.
//!
//! A source answers three questions: every quote, one quote by id, and one
//! quote picked uniformly at random. Implementations must be safe to query
//! from any number of concurrent requests.

use std::future::Future;

use quote_common::{Quote, Result};

use crate::model::static_quotes::StaticQuotes;
use crate::model::store::QuoteStore;

/// Read access to a collection of quotes.
pub trait QuoteSource {
    /// Returns every quote. Static sources keep insertion order.
    fn all(&self) -> impl Future<Output = Result<Vec<Quote>>> + Send;

    /// Returns the quote with `id`, or `QuoteError::NotFound`.
    fn by_id(&self, id: i64) -> impl Future<Output = Result<Quote>> + Send;

    /// Returns one quote chosen uniformly at random, or
    /// `QuoteError::EmptySource` when there is nothing to choose from.
    fn random(&self) -> impl Future<Output = Result<Quote>> + Send;
}

/// The source selected at startup.
#[derive(Debug, Clone)]
pub enum QuoteBackend {
    /// Quotes listed in the settings file.
    Static(StaticQuotes),
    /// Quotes kept in SQLite.
    Store(QuoteStore),
}

impl QuoteBackend {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteBackend::Static(_) => "static",
            QuoteBackend::Store(_) => "store",
        }
    }
}

impl QuoteSource for QuoteBackend {
    async fn all(&self) -> Result<Vec<Quote>> {
        match self {
            QuoteBackend::Static(quotes) => quotes.all().await,
            QuoteBackend::Store(store) => store.all().await,
        }
    }

    async fn by_id(&self, id: i64) -> Result<Quote> {
        match self {
            QuoteBackend::Static(quotes) => quotes.by_id(id).await,
            QuoteBackend::Store(store) => store.by_id(id).await,
        }
    }

    async fn random(&self) -> Result<Quote> {
        match self {
            QuoteBackend::Static(quotes) => quotes.random().await,
            QuoteBackend::Store(store) => store.random().await,
        }
    }
}
