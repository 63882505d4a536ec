//! GatewayTest - end-to-end harness
//!
//! Starts a real photogate `Server` on a random port, pointed at a
//! `FakeUnsplash` upstream. The HTTP client does not follow redirects so
//! tests can inspect them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use photogate::{Config, Server};
use reqwest::{redirect, Client};
use tokio::task::JoinHandle;

use super::upstream::{FakeUnsplash, TEST_API_KEY};

/// Test harness that spawns a real photogate server on a random port
pub struct GatewayTest {
    pub addr: SocketAddr,
    pub client: Client,
    pub upstream: FakeUnsplash,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl GatewayTest {
    /// Start a gateway with a valid access key
    pub async fn start() -> Result<Self> {
        Self::start_with_key(Some(TEST_API_KEY)).await
    }

    /// Start a gateway with the given access key (or none)
    pub async fn start_with_key(api_key: Option<&str>) -> Result<Self> {
        let upstream = FakeUnsplash::start().await?;

        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let config = Config {
            api_key: api_key.map(str::to_string),
            api_url: upstream.base_url(),
            timeout_secs: 5,
            ..Config::default()
        }
        .with_bind_addr(addr);

        let server = Arc::new(Server::new(config).await?);
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .redirect(redirect::Policy::none())
            .build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client.get(format!("http://{}/", addr)).send().await.is_ok() {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            upstream,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Location header of a redirect response
    pub fn location(resp: &reqwest::Response) -> String {
        resp.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("response has no Location header")
            .to_string()
    }
}

impl Drop for GatewayTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
