//! reqwest-backed implementations of `PhotoApi` and `ImageFetcher`

use anyhow::{ensure, Context};
use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ApiResponse, ImageFetcher, Photo, PhotoApi, SearchPage, SearchQuery, UpstreamError};

/// Error payload returned by the API on non-2xx answers
#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

/// Unsplash API client
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: Url,
    /// Access key
    api_key: Option<String>,
}

impl UnsplashClient {
    /// Create a new client around a shared HTTP client
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API URL: {}", base_url))?;
        ensure!(
            !base_url.cannot_be_a_base(),
            "API URL cannot carry a path: {}",
            base_url
        );

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Check if an access key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Endpoint URL with each segment escaped, so ids cannot leave their segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, segments: &[&str]) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(self.endpoint(segments))
            .header("Accept-Version", "v1");
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Client-ID {}", key)),
            None => request,
        }
    }

    async fn read<T: DeserializeOwned>(
        response: Response,
    ) -> Result<ApiResponse<T>, UpstreamError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(ApiResponse::Success(serde_json::from_str(&body)?));
        }

        warn!("Unsplash API error: {} - {}", status, body);
        Ok(ApiResponse::Errors(error_messages(status, &body)))
    }
}

/// Pull the error list out of a failed response body
fn error_messages(status: StatusCode, body: &str) -> Vec<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors,
        _ if !body.trim().is_empty() => vec![body.trim().to_string()],
        _ => vec![status.to_string()],
    }
}

#[async_trait]
impl PhotoApi for UnsplashClient {
    async fn search_photos(
        &self,
        query: &SearchQuery,
    ) -> Result<ApiResponse<SearchPage>, UpstreamError> {
        debug!(
            "Searching photos: query={:?} orientation={} page={}",
            query.query,
            query.orientation.as_str(),
            query.page
        );

        let response = self.get(&["search", "photos"]).query(query).send().await?;
        Self::read(response).await
    }

    async fn get_photo(&self, id: &str) -> Result<ApiResponse<Photo>, UpstreamError> {
        debug!("Fetching photo metadata for {:?}", id);

        // Dot segments are dropped when building the path
        if matches!(id, "" | "." | "..") {
            return Ok(ApiResponse::Errors(vec!["Couldn't find Photo".to_string()]));
        }

        let response = self.get(&["photos", id]).send().await?;
        Self::read(response).await
    }
}

/// Downloads image bytes over plain HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, UpstreamError> {
        debug!("Downloading image from: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Image CDN error: {} for {}", response.status(), url);
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?)
    }
}
