//! Quote data model shared by the message service and the billboard.
//!
//! On the wire a quote is a JSON object `{"id": .., "quote": .., "author": ..}`.
//! All three fields are required; `null` for any of them is rejected at decode
//! time, so a `Quote` value always carries an id, a text and an author.
use serde::{Deserialize, Serialize};

/// A single quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier assigned by the quote source.
    pub id: i64,
    /// Quote text. Serialized under the `quote` key.
    #[serde(rename = "quote")]
    pub text: String,
    /// Who said it.
    pub author: String,
}

impl Quote {
    /// Creates a new quote.
    pub fn new(id: i64, text: impl Into<String>, author: impl Into<String>) -> Self {
        Quote {
            id,
            text: text.into(),
            author: author.into(),
        }
    }
}
