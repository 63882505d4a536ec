//! Common test utilities - mock upstream and router helpers
//!
//! Drives `photogate::api::router` directly with `tower::ServiceExt`, with
//! the upstream replaced by scripted `PhotoApi` / `ImageFetcher` mocks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use photogate::api::{router, AppState};
use photogate::unsplash::{
    ApiResponse, ImageFetcher, Photo, PhotoApi, PhotoLinks, PhotoSummary, PhotoUrls, PhotoUser,
    SearchPage, SearchQuery, UpstreamError,
};
use tower::ServiceExt;

/// Scripted reply for one kind of upstream call
#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Rejected(Vec<String>),
    Fail,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<ApiResponse<T>, UpstreamError> {
        match self {
            Reply::Ok(value) => Ok(ApiResponse::Success(value)),
            Reply::Rejected(errors) => Ok(ApiResponse::Errors(errors)),
            Reply::Fail => Err(UpstreamError::Status(503)),
        }
    }
}

/// Mock photo API recording every call
pub struct MockPhotos {
    pub search_reply: Reply<SearchPage>,
    pub photo_reply: Reply<Photo>,
    pub searches: Mutex<Vec<SearchQuery>>,
    pub lookups: AtomicUsize,
}

impl MockPhotos {
    pub fn new(search_reply: Reply<SearchPage>, photo_reply: Reply<Photo>) -> Self {
        Self {
            search_reply,
            photo_reply,
            searches: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn last_search(&self) -> SearchQuery {
        self.searches
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no search recorded")
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoApi for MockPhotos {
    async fn search_photos(
        &self,
        query: &SearchQuery,
    ) -> Result<ApiResponse<SearchPage>, UpstreamError> {
        self.searches.lock().unwrap().push(query.clone());
        self.search_reply.clone().into_result()
    }

    async fn get_photo(&self, _id: &str) -> Result<ApiResponse<Photo>, UpstreamError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.photo_reply.clone().into_result()
    }
}

/// Mock CDN echoing the requested URL back as the image body
#[derive(Default)]
pub struct MockImages {
    pub urls: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageFetcher for MockImages {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, UpstreamError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(Bytes::from(url.to_string()))
    }
}

/// A search page with `count` results named `p0`, `p1`, ...
pub fn page_of(count: usize) -> SearchPage {
    SearchPage {
        total: count as u64,
        total_pages: 1,
        results: (0..count)
            .map(|i| PhotoSummary { id: format!("p{}", i) })
            .collect(),
    }
}

/// A photo record as the API would return it
pub fn sample_photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        width: 1200,
        height: 800,
        description: None,
        urls: PhotoUrls {
            raw: format!("https://images.example/{}?ixid=1", id),
        },
        links: PhotoLinks {
            html: format!("https://unsplash.com/photos/{}", id),
        },
        user: PhotoUser {
            name: "Ansel".to_string(),
        },
    }
}

/// Router wired to the given mocks
pub fn build_test_app(photos: Arc<MockPhotos>, images: Arc<MockImages>) -> Router {
    router(AppState::new(photos, images))
}

/// Send a GET through the router
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("host", "photos.example.com")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
