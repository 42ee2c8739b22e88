//! Metadata service client.
//!
//! Speaks the versioned inventory protocol: a long-poll version endpoint
//! (`wait`, current `value`, `maxWait`) and a host-listing endpoint. One
//! connection per call, bounded by a request timeout that must sit above
//! the long-poll max wait.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{InventoryError, InventoryResult};
use crate::snapshot::HostRecord;

/// Client for the external inventory metadata service.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    /// host:port of the metadata service.
    address: String,
    /// API version prefix on every path.
    base_path: String,
    /// Per-request ceiling; must exceed the long-poll max wait.
    timeout: Duration,
}

impl MetadataClient {
    /// Version prefix of the metadata API.
    pub const API_VERSION: &'static str = "2015-12-19";

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            base_path: format!("/{}", Self::API_VERSION),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Long-poll the inventory version.
    ///
    /// Blocks server-side for up to `max_wait` seconds; returns the
    /// current token, which equals `current` when nothing changed.
    pub async fn wait_version(&self, current: &str, max_wait: u64) -> InventoryResult<String> {
        let path = format!(
            "{}/version?wait=true&value={current}&maxWait={max_wait}",
            self.base_path
        );
        let body = self.get(&path).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the full host list.
    pub async fn list_hosts(&self) -> InventoryResult<Vec<HostRecord>> {
        let body = self.get(&format!("{}/hosts", self.base_path)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get(&self, path: &str) -> InventoryResult<Bytes> {
        debug!(address = %self.address, path, "metadata request");

        let request = async {
            let stream = TcpStream::connect(&self.address).await.map_err(|e| {
                InventoryError::Request(format!("connect {}: {e}", self.address))
            })?;

            let io = TokioIo::new(stream);
            let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
                .await
                .map_err(|e| InventoryError::Request(format!("handshake: {e}")))?;

            // Drive the connection in the background.
            tokio::spawn(async move {
                let _ = conn.await;
            });

            let req = http::Request::builder()
                .method("GET")
                .uri(path)
                .header("host", &self.address)
                .header("accept", "application/json")
                .body(http_body_util::Empty::<Bytes>::new())
                .map_err(|e| InventoryError::Request(format!("build request: {e}")))?;

            let resp = sender
                .send_request(req)
                .await
                .map_err(|e| InventoryError::Request(format!("send: {e}")))?;

            if !resp.status().is_success() {
                return Err(InventoryError::Status(resp.status().as_u16()));
            }

            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| InventoryError::Request(format!("read body: {e}")))?;
            Ok(body.to_bytes())
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(InventoryError::Timeout(self.timeout)),
        }
    }
}
