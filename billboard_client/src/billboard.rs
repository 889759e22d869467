//! Billboard rendering.
use log::info;
use quote_common::{Quote, Result};

use crate::message_client::MessageClient;

/// Renders a quote as a billboard line: `"<quote> -- <author>"`.
pub fn render(quote: &Quote) -> String {
    format!("{} -- {}", quote.text, quote.author)
}

/// Shows one quote from the message service.
pub struct BillboardService {
    client: MessageClient,
}

impl BillboardService {
    /// Creates the service over an upstream client.
    pub fn new(client: MessageClient) -> Self {
        Self { client }
    }

    /// Fetches a quote upstream and renders it. Upstream failures are
    /// returned as they are; no fallback text is made up.
    pub async fn message(&self) -> Result<String> {
        let quote = self.client.fetch_quote().await?;
        info!("Showing quote {} by {}", quote.id, quote.author);
        Ok(render(&quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_quote_and_author() {
        assert_eq!(render(&Quote::new(5, "Q", "Auth")), "Q -- Auth");
    }

    #[test]
    fn renders_stamped_text_verbatim() {
        let quote = Quote::new(1, "Service version: v1 - Quote: A", "X");
        assert_eq!(render(&quote), "Service version: v1 - Quote: A -- X");
    }
}
