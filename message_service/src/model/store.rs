//! SQLite-backed quote source.
//!
//! Quotes live in a single `quotes(id, quote, author)` table created by the
//! embedded migrations. Rows are created and edited outside this service; the
//! only write performed here is the one-time seed of an empty table from the
//! settings file.
use std::str::FromStr;

use log::info;
use quote_common::{Quote, QuoteError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::model::quote_source::QuoteSource;

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: i64,
    quote: String,
    author: String,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            text: row.quote,
            author: row.author,
        }
    }
}

fn storage_error(err: impl std::fmt::Display) -> QuoteError {
    QuoteError::Storage(err.to_string())
}

/// Quote repository over an `sqlx` SQLite pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    pool: SqlitePool,
}

impl QuoteStore {
    /// Opens (creating if needed) the database at `url` and runs migrations.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Opening quote store at {}", url);
        let opts = SqliteConnectOptions::from_str(url)
            .map_err(storage_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(opts)
            .await
            .map_err(storage_error)?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and runs migrations on it.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(storage_error)?;
        Ok(Self { pool })
    }

    /// Inserts `quotes` when the table is empty. Existing data is left
    /// untouched.
    ///
    /// - quotes: rows to write, ids kept as given.
    /// - Returns: how many rows were written (0 if the table already had
    ///   rows), or `QuoteError::Storage` if a query failed.
    pub async fn seed_if_empty(&self, quotes: &[Quote]) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        if count > 0 || quotes.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        for quote in quotes {
            sqlx::query("INSERT INTO quotes (id, quote, author) VALUES (?, ?, ?)")
                .bind(quote.id)
                .bind(&quote.text)
                .bind(&quote.author)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;
        }
        tx.commit().await.map_err(storage_error)?;

        info!("Seeded quote store with {} quotes", quotes.len());
        Ok(quotes.len())
    }
}

impl QuoteSource for QuoteStore {
    async fn all(&self) -> Result<Vec<Quote>> {
        let rows: Vec<QuoteRow> =
            sqlx::query_as("SELECT id, quote, author FROM quotes ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;
        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn by_id(&self, id: i64) -> Result<Quote> {
        let row: Option<QuoteRow> =
            sqlx::query_as("SELECT id, quote, author FROM quotes WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;
        row.map(Quote::from).ok_or(QuoteError::NotFound(id))
    }

    async fn random(&self) -> Result<Quote> {
        let row: Option<QuoteRow> =
            sqlx::query_as("SELECT id, quote, author FROM quotes ORDER BY RANDOM() LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;
        row.map(Quote::from).ok_or(QuoteError::EmptySource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // One connection, or every checkout would see its own empty in-memory database.
    async fn memory_store() -> QuoteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        QuoteStore::from_pool(pool).await.unwrap()
    }

    fn quotes() -> Vec<Quote> {
        vec![
            Quote::new(2, "B", "Y"),
            Quote::new(1, "A", "X"),
            Quote::new(3, "C", "Z"),
        ]
    }

    #[actix_web::test]
    async fn seeds_only_an_empty_table() {
        let store = memory_store().await;
        assert_eq!(store.seed_if_empty(&quotes()).await.unwrap(), 3);
        assert_eq!(
            store.seed_if_empty(&[Quote::new(9, "N", "M")]).await.unwrap(),
            0
        );
        assert_eq!(store.all().await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn all_is_ordered_by_id() {
        let store = memory_store().await;
        store.seed_if_empty(&quotes()).await.unwrap();
        let ids: Vec<i64> = store.all().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn by_id_hits_and_misses() {
        let store = memory_store().await;
        store.seed_if_empty(&quotes()).await.unwrap();
        assert_eq!(store.by_id(2).await.unwrap(), Quote::new(2, "B", "Y"));
        assert!(matches!(
            store.by_id(999).await.unwrap_err(),
            QuoteError::NotFound(999)
        ));
    }

    #[actix_web::test]
    async fn random_covers_every_row() {
        let store = memory_store().await;
        store.seed_if_empty(&quotes()).await.unwrap();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(store.random().await.unwrap().id);
            if seen.len() == 3 {
                break;
            }
        }
        assert_eq!(seen, HashSet::from([1, 2, 3]));
    }

    #[actix_web::test]
    async fn random_on_empty_table_fails() {
        let store = memory_store().await;
        assert!(matches!(
            store.random().await.unwrap_err(),
            QuoteError::EmptySource
        ));
        assert!(store.all().await.unwrap().is_empty());
    }
}
