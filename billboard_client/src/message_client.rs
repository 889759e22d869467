//! Fetching quotes from the message service.
//!
//! The client talks to the logical address `http://message-service/`, lets the
//! `LoadBalancer` pick a concrete instance, and decodes the JSON body into a
//! `Quote`. Every failure on the way (no instance, connection error, timeout,
//! non-success status, undecodable body) becomes `QuoteError::Upstream`.
//! Nothing is retried.
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use quote_common::net::MESSAGE_SERVICE;
use quote_common::{Quote, QuoteError, Result};

use crate::discovery::LoadBalancer;

/// Upper bound for establishing the TCP connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for the message service.
pub struct MessageClient {
    http: reqwest::Client,
    balancer: Arc<LoadBalancer>,
    logical_url: String,
}

impl MessageClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(balancer: Arc<LoadBalancer>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| QuoteError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            balancer,
            logical_url: format!("http://{}/", MESSAGE_SERVICE),
        })
    }

    /// Fetches one random quote.
    pub async fn fetch_quote(&self) -> Result<Quote> {
        let url = self.balancer.resolve(&self.logical_url)?;
        debug!("Requesting quote from {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| upstream(&url, e))?;

        response.json::<Quote>().await.map_err(|e| upstream(&url, e))
    }
}

fn upstream(url: &reqwest::Url, err: reqwest::Error) -> QuoteError {
    error!("Call to {} failed: {}", url, err);
    QuoteError::Upstream(err.to_string())
}
