//! Settings file of the message service.
//!
//! The file is a JSON document:
//!
//! ```json
//! {
//!   "service_version": "v1",
//!   "quotes": [{"id": 1, "quote": "...", "author": "..."}]
//! }
//! ```
//!
//! Both keys are optional. Quote ids must be unique.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quote_common::{Quote, QuoteError, Result};
use serde::Deserialize;

/// One snapshot of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Version string stamped into random quotes.
    #[serde(default)]
    pub service_version: String,
    /// Static quote list, in file order.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl Settings {
    /// Parses settings from a reader and checks that quote ids are unique.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let settings: Settings = serde_json::from_reader(reader)?;

        let mut seen = HashSet::with_capacity(settings.quotes.len());
        for quote in &settings.quotes {
            if !seen.insert(quote.id) {
                return Err(QuoteError::Config(format!("duplicate quote id {}", quote.id)));
            }
        }
        Ok(settings)
    }

    /// Reads the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            QuoteError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }
}
