use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::model::TelemetrySnapshot;

/// Anything the poller can pull a snapshot from.
pub trait TelemetrySource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = std::result::Result<TelemetrySnapshot, FetchError>> + Send;
}

/// `GET <endpoint>` returning the healthcheck JSON.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.endpoint.clone(), cfg.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self) -> std::result::Result<TelemetrySnapshot, FetchError> {
        let resp = self.client.get(&self.endpoint).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "telemetry body received");
        Ok(TelemetrySnapshot::from_json(&body)?)
    }
}

impl TelemetrySource for HttpSource {
    fn fetch(&self) -> impl Future<Output = std::result::Result<TelemetrySnapshot, FetchError>> + Send {
        self.get()
    }
}
