//! In-memory quote source backed by the settings file.
//!
//! The list is immutable once built; a reload builds a new `StaticQuotes`
//! instead of editing this one. Random picks use the thread-local generator
//! from `rand`, so concurrent requests never share generator state.

use quote_common::{Quote, QuoteError, Result};
use rand::seq::IndexedRandom;

use crate::model::quote_source::QuoteSource;

/// Fixed list of quotes, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct StaticQuotes {
    quotes: Vec<Quote>,
}

impl StaticQuotes {
    /// Wraps `quotes`, keeping their order.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Looks a quote up by id.
    pub fn find(&self, id: i64) -> Result<Quote> {
        self.quotes
            .iter()
            .find(|quote| quote.id == id)
            .cloned()
            .ok_or(QuoteError::NotFound(id))
    }

    /// Picks one quote uniformly at random.
    pub fn pick_random(&self) -> Result<Quote> {
        let mut rng = rand::rng();
        self.quotes
            .choose(&mut rng)
            .cloned()
            .ok_or(QuoteError::EmptySource)
    }
}

impl QuoteSource for StaticQuotes {
    async fn all(&self) -> Result<Vec<Quote>> {
        Ok(self.quotes.clone())
    }

    async fn by_id(&self, id: i64) -> Result<Quote> {
        self.find(id)
    }

    async fn random(&self) -> Result<Quote> {
        self.pick_random()
    }
}
