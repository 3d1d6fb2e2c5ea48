//! Best-effort one-way push to the remote collector.
//!
//! Each push carries the full state, so overlapping pushes are harmless:
//! the server keeps the last write. Failures are logged and dropped; there
//! is no retry, backoff or queue.
//!
//! The payload is captured when the push is issued. A toggle that happens
//! while a push is in flight is not part of it and goes out with the next
//! one.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::task::JoinHandle;
use url::Url;

use super::types::{SyncError, SyncOutcome, SyncPayload};

pub const DEFAULT_SYNC_ENDPOINT: &str = "http://127.0.0.1:5000/api/migrate";
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

#[derive(Debug, Clone)]
pub struct SyncGateway {
    client: Client,
    endpoint: Url,
}

impl SyncGateway {
    /// # Errors
    /// [`SyncError::InvalidEndpoint`] unless `endpoint` is an http(s) URL.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SyncError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the payload and wait for the response.
    ///
    /// Any 2xx status is success.
    pub async fn push(&self, payload: &SyncPayload) -> Result<(), SyncError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match resp.json::<ServerMessage>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(SyncError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Push in a background task and log the result.
    ///
    /// Must be called from within a tokio runtime. Callers may drop the
    /// handle; awaiting it only reports what was logged.
    pub fn spawn_push(&self, payload: SyncPayload) -> JoinHandle<SyncOutcome> {
        let gateway = self.clone();
        tokio::spawn(async move {
            match gateway.push(&payload).await {
                Ok(()) => {
                    tracing::info!(email = %payload.email, "cloud sync complete");
                    SyncOutcome::Synced
                }
                Err(e) => {
                    tracing::warn!(endpoint = %gateway.endpoint, error = %e, "cloud sync failed");
                    SyncOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        })
    }
}

/// Accept only absolute http(s) URLs.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, SyncError> {
    let invalid = |message: String| SyncError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message,
    };
    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_must_be_http() {
        assert!(parse_endpoint(DEFAULT_SYNC_ENDPOINT).is_ok());
        assert!(parse_endpoint("https://sync.example.com/api/migrate").is_ok());
        assert!(matches!(
            parse_endpoint("ftp://example.com"),
            Err(SyncError::InvalidEndpoint { .. })
        ));
        assert!(parse_endpoint("not a url").is_err());
    }
}
