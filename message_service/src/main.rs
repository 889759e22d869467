//! Message service.
//!
//! This binary serves quotes over HTTP. Internally, it wires together three
//! building blocks:
//!
//! - `Settings`: the JSON file holding the service version and the static
//!   quote list. It is read at startup and again on every `POST /refresh`.
//! - `QuoteBackend`: the quote source selected with `--source`, either the
//!   static list from the settings file or a SQLite store (seeded from the
//!   settings file when its table is empty).
//! - `MessageService`: stamps random quotes with the service version and
//!   keeps version and source together in one atomically swapped snapshot.
//!
//! Concurrency:
//! - Requests are handled by the actix-web worker pool with no per-request
//!   shared mutable state. Handlers clone the current snapshot `Arc` and never
//!   hold a lock across an await point.
//! - Random picks use the thread-local generator of `rand`.
//!
//! Any startup failure (unreadable settings, unreachable database, busy
//! address) is surfaced as `QuoteError` and ends the process.
#![warn(missing_docs)]
use crate::args::{Args, SourceKind};
use crate::model::{QuoteBackend, QuoteStore, StaticQuotes};
use crate::routes::AppState;
use crate::service::MessageService;
use crate::settings::Settings;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use log::info;
use quote_common::QuoteError;
use quote_common::Result;

mod args;
pub mod model;
mod routes;
mod service;
mod settings;

/// Builds the quote source requested on the command line.
async fn build_source(args: &Args, settings: &Settings) -> Result<QuoteBackend, QuoteError> {
    match args.source {
        SourceKind::Static => Ok(QuoteBackend::Static(StaticQuotes::new(
            settings.quotes.clone(),
        ))),
        SourceKind::Store => {
            let store = QuoteStore::connect(&args.database_url).await?;
            store.seed_if_empty(&settings.quotes).await?;
            Ok(QuoteBackend::Store(store))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let settings = Settings::load(&args.config)?;
    info!(
        "Loaded {} quotes from {} (service version {:?})",
        settings.quotes.len(),
        args.config.display(),
        settings.service_version
    );

    let source = build_source(&args, &settings).await?;
    info!("Quote source: {}", source.kind());

    let state = web::Data::new(AppState {
        service: MessageService::new(settings.service_version, source),
        config_path: args.config.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&args.bind)?;
    info!("Message service listening on {}", args.bind);

    server.run().await?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
