use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use url::Url;

/// Answers whether the news API can be reached at all, so a fetch can fail
/// fast with `Offline` instead of waiting on a request that cannot succeed.
#[async_trait]
pub trait Reachability {
    async fn is_reachable(&self) -> bool;
}

/// Reachability check that opens a TCP connection to the API host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Probe the host and port `url` points at.
    pub fn for_url(url: &Url, timeout: Duration) -> Option<Self> {
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Self::new(host, port, timeout))
    }
}

#[async_trait]
impl Reachability for TcpProbe {
    async fn is_reachable(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(host = %self.host, error = %e, "reachability probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(host = %self.host, "reachability probe timed out");
                false
            }
        }
    }
}
