//! HTTP routes of the message service.
//!
//! | Method | Path           | Answer                                  |
//! |--------|----------------|-----------------------------------------|
//! | GET    | `/`            | random quote, text stamped with version |
//! | GET    | `/quotes`      | every quote                             |
//! | GET    | `/quotes/{id}` | one quote, or 404 with an empty body    |
//! | POST   | `/refresh`     | re-reads the settings file              |
//! | GET    | `/health`      | `OK`                                    |
use std::path::PathBuf;

use actix_web::error::InternalError;
use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;
use quote_common::{Quote, QuoteError, Result};
use serde::Serialize;

use crate::model::QuoteSource;
use crate::service::MessageService;
use crate::settings::Settings;

/// Shared state handed to every handler.
pub struct AppState {
    /// Quote logic and the current snapshot.
    pub service: MessageService,
    /// Settings file re-read on refresh.
    pub config_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    service_version: String,
    quotes: usize,
}

#[get("/")]
async fn random_quote(state: web::Data<AppState>) -> Result<web::Json<Quote>> {
    let quote = state.service.random_quote().await?;
    debug!("Serving random quote {}", quote.id);
    Ok(web::Json(quote))
}

#[get("/quotes")]
async fn all_quotes(state: web::Data<AppState>) -> Result<web::Json<Vec<Quote>>> {
    Ok(web::Json(state.service.all_quotes().await?))
}

#[get("/quotes/{id}")]
async fn quote_by_id(state: web::Data<AppState>, id: web::Path<i64>) -> Result<web::Json<Quote>> {
    Ok(web::Json(state.service.quote_by_id(id.into_inner()).await?))
}

#[post("/refresh")]
async fn refresh(state: web::Data<AppState>) -> Result<web::Json<RefreshResponse>> {
    let path = state.config_path.clone();
    let settings = web::block(move || Settings::load(&path))
        .await
        .map_err(|e| QuoteError::Config(e.to_string()))??;

    let snapshot = state.service.reload(settings)?;
    // Counted from what the new snapshot serves; a store ignores the file's list.
    let quotes = snapshot.source.all().await?.len();
    Ok(web::Json(RefreshResponse {
        service_version: snapshot.service_version.clone(),
        quotes,
    }))
}

#[get("/health")]
async fn health() -> impl Responder {
    "OK"
}

/// Registers every route. A path id that is not an integer is answered like
/// an unknown id: 404 with an empty body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, HttpResponse::NotFound().finish()).into()
    }))
    .service(random_quote)
    .service(all_quotes)
    .service(quote_by_id)
    .service(refresh)
    .service(health);
}
