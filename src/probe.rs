use reqwest::{header, Client};
use tracing::debug;

use crate::config::Config;
use crate::error::ProbeResult;
use crate::models::InventoryRecord;

pub const INVENTORY_PATH: &str = "/api/inventory";

/// Status and raw body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: u16,
    pub body: String,
}

/// Sends the inventory record to `POST /api/inventory`.
///
/// No timeout or retry is configured: a call waits until the server answers or
/// the transport gives up on its own.
#[derive(Debug, Clone)]
pub struct Probe {
    client: Client,
    endpoint: String,
}

impl Probe {
    pub fn new(config: &Config) -> ProbeResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.endpoint(INVENTORY_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, record: &InventoryRecord) -> ProbeResult<ProbeOutcome> {
        self.submit_with_cookie(record, None).await
    }

    /// Same as [`Probe::submit`], attaching a session cookie when one is given.
    pub async fn submit_with_cookie(
        &self,
        record: &InventoryRecord,
        cookie: Option<&str>,
    ) -> ProbeResult<ProbeOutcome> {
        debug!(endpoint = %self.endpoint, product = %record.product_name, "Submitting inventory record");

        let mut request = self.client.post(&self.endpoint).json(record);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "Inventory API responded");

        Ok(ProbeOutcome { status, body })
    }
}
