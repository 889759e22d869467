//! Message service core: version stamping and reloadable snapshots.
//!
//! A `Snapshot` pairs the version string with the quote source it was loaded
//! with. `MessageService` holds the current snapshot behind a `RwLock<Arc<_>>`;
//! every operation clones the `Arc` once and works on that snapshot only, so a
//! reload can never make a request mix an old version with new quotes.
use std::sync::{Arc, RwLock};

use log::info;
use quote_common::{Quote, Result};

use crate::model::{QuoteBackend, QuoteSource, StaticQuotes};
use crate::settings::Settings;

/// Immutable view of the configuration used to answer requests.
#[derive(Debug)]
pub struct Snapshot {
    /// Version string of this running instance.
    pub service_version: String,
    /// Where quotes come from.
    pub source: QuoteBackend,
}

/// Returns a copy of `quote` whose text carries the service version.
pub fn stamp_version(service_version: &str, quote: &Quote) -> Quote {
    Quote {
        id: quote.id,
        text: format!("Service version: {} - Quote: {}", service_version, quote.text),
        author: quote.author.clone(),
    }
}

/// Serves quotes from the current snapshot.
#[derive(Debug)]
pub struct MessageService {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl MessageService {
    /// Creates the service from an explicit version and source.
    pub fn new(service_version: impl Into<String>, source: QuoteBackend) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot {
                service_version: service_version.into(),
                source,
            })),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        Ok(Arc::clone(&*self.snapshot.read()?))
    }

    /// A random quote with its text stamped with the service version.
    /// The stored quote is left untouched.
    pub async fn random_quote(&self) -> Result<Quote> {
        let snapshot = self.snapshot()?;
        let quote = snapshot.source.random().await?;
        Ok(stamp_version(&snapshot.service_version, &quote))
    }

    /// Every quote, unchanged.
    pub async fn all_quotes(&self) -> Result<Vec<Quote>> {
        let snapshot = self.snapshot()?;
        snapshot.source.all().await
    }

    /// The quote with `id`, unchanged.
    pub async fn quote_by_id(&self, id: i64) -> Result<Quote> {
        let snapshot = self.snapshot()?;
        snapshot.source.by_id(id).await
    }

    /// Swaps in a snapshot built from `settings`.
    ///
    /// A static source is replaced by the new quote list. A store-backed
    /// source keeps its pool and only the version changes; `settings.quotes`
    /// is ignored in that case. Snapshots already handed out stay valid.
    ///
    /// - settings: freshly read settings file.
    /// - Returns: the snapshot now in effect, or `QuoteError::MutexLock` if
    ///   the lock was poisoned.
    pub fn reload(&self, settings: Settings) -> Result<Arc<Snapshot>> {
        let mut current = self.snapshot.write()?;
        let source = match &current.source {
            QuoteBackend::Static(_) => QuoteBackend::Static(StaticQuotes::new(settings.quotes)),
            QuoteBackend::Store(store) => QuoteBackend::Store(store.clone()),
        };
        let next = Arc::new(Snapshot {
            service_version: settings.service_version,
            source,
        });
        *current = Arc::clone(&next);

        info!(
            "Reloaded settings: version={:?} source={}",
            next.service_version,
            next.source.kind()
        );
        Ok(next)
    }
}
