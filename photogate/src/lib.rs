//! photogate - photo search gateway daemon
//!
//! Proxies an upstream photo API: seeded or random picks from a search,
//! resized images by id, and photo metadata.

pub mod api;
pub mod config;
pub mod error;
pub mod selection;
pub mod transform;
pub mod unsplash;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use api::AppState;
use unsplash::{HttpImageFetcher, UnsplashClient};

pub use config::Config;
pub use error::GatewayError;

/// The photogate server instance
pub struct Server {
    config: Config,
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance talking to the configured upstream
    pub async fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        let photos =
            UnsplashClient::new(client.clone(), &config.api_url, config.api_key.clone())?;
        if !photos.is_configured() {
            warn!("No Unsplash access key configured; upstream calls will be rejected");
        }

        let state = AppState::new(Arc::new(photos), Arc::new(HttpImageFetcher::new(client)));
        Ok(Self::with_state(config, state))
    }

    /// Create a server around prebuilt state
    pub fn with_state(config: Config, state: AppState) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            state,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Build the router
    fn router(&self) -> Router {
        api::router(self.state.clone())
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let local_addr = listener.local_addr()?;
        info!("photogate listening on {}", local_addr);

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("photogate shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr()
    }
}
