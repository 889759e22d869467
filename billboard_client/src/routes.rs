//! HTTP routes of the billboard.
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, web};
use quote_common::Result;

use crate::billboard::BillboardService;

#[get("/message")]
async fn message(billboard: web::Data<BillboardService>) -> Result<HttpResponse> {
    let line = billboard.message().await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(line))
}

#[get("/health")]
async fn health() -> impl Responder {
    "OK"
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(message).service(health);
}
