//! Unsplash integration
//!
//! Provides:
//! - Typed photo and search records
//! - `PhotoApi` for search and metadata lookups
//! - `ImageFetcher` for downloading transformed image bytes from the CDN

mod client;

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::selection::{Orientation, PER_PAGE};

pub use client::{HttpImageFetcher, UnsplashClient};

/// Outcome of a call the API answered.
///
/// The API either returns the requested record or an error payload; both
/// are normal answers and distinct from a failed request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Errors(Vec<String>),
}

/// A request that never produced an API answer
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upstream returned status {0}")]
    Status(u16),
}

/// One page of a photo search
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub orientation: Orientation,
    pub page: u64,
    pub per_page: u64,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, orientation: Orientation, page: u64) -> Self {
        Self {
            query: query.into(),
            orientation,
            page: page.max(1),
            per_page: PER_PAGE,
        }
    }
}

/// Search hit; only the id is needed to pick one
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoSummary {
    pub id: String,
}

/// Search response page
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    pub results: Vec<PhotoSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoLinks {
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUser {
    pub name: String,
}

/// Full photo record from `/photos/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub description: Option<String>,
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    pub user: PhotoUser,
}

/// Photo search and metadata lookups
#[async_trait]
pub trait PhotoApi: Send + Sync {
    async fn search_photos(
        &self,
        query: &SearchQuery,
    ) -> Result<ApiResponse<SearchPage>, UpstreamError>;

    async fn get_photo(&self, id: &str) -> Result<ApiResponse<Photo>, UpstreamError>;
}

/// Downloads image bytes from a fully-formed URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, UpstreamError>;
}
