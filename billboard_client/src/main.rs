//! Billboard: an HTTP service that shows one quote from the message service.
//!
//! On `GET /message` it asks the message service (logical address
//! `http://message-service/`) for a random quote and answers with the plain
//! text line `"<quote> -- <author>"`. Message service instances are listed on
//! the command line and picked round-robin for every call.
//!
//! Usage example (CLI):
//! ```bash
//! billboard_client --bind 0.0.0.0:8080 \
//!     --instance message-service=http://10.0.0.11:8081 \
//!     --instance message-service=http://10.0.0.12:8081
//! ```
//!
//! Upstream failures are answered with `502 Bad Gateway`; there is no retry and
//! no fallback text.
#![warn(missing_docs)]
mod args;
mod billboard;
mod discovery;
mod message_client;
mod routes;

use crate::args::Args;
use crate::billboard::BillboardService;
use crate::discovery::{LoadBalancer, ServiceDiscovery, StaticServiceDiscovery};
use crate::message_client::MessageClient;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use log::{info, warn};
use quote_common::QuoteError;
use quote_common::Result;
use quote_common::net::MESSAGE_SERVICE;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let discovery = StaticServiceDiscovery::from_entries(&args.instances)?;
    if discovery.instances(MESSAGE_SERVICE).is_empty() {
        warn!(
            "No instances configured for {}. Every /message request will fail.",
            MESSAGE_SERVICE
        );
    }
    for instance in discovery.instances(MESSAGE_SERVICE) {
        info!("{} instance: {}", MESSAGE_SERVICE, instance);
    }

    let balancer = Arc::new(LoadBalancer::new(Box::new(discovery)));
    let client = MessageClient::new(balancer, Duration::from_secs(args.timeout_secs))?;
    let billboard = web::Data::new(BillboardService::new(client));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(billboard.clone())
            .configure(routes::configure)
    })
    .bind(&args.bind)?;
    info!("Billboard listening on {}", args.bind);

    server.run().await?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
