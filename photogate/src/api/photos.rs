//! Photo endpoints
//!
//! GET /id/{id}   - Serve a resized/transcoded image
//! GET /info/{id} - Photo metadata as JSON

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::error::GatewayError;
use crate::transform::Transform;
use crate::unsplash::{ApiResponse, Photo};

/// Build the photos router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/id/{id}", get(get_image))
        .route("/info/{id}", get(get_info))
}

#[derive(Debug, Default, Deserialize)]
struct ImageParams {
    w: Option<String>,
    h: Option<String>,
    format: Option<String>,
}

/// Photo details returned by /info
#[derive(Debug, Serialize)]
struct PhotoInfo {
    id: String,
    width: u32,
    height: u32,
    description: Option<String>,
    links: String,
    author: String,
}

impl From<Photo> for PhotoInfo {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            width: photo.width,
            height: photo.height,
            description: photo.description,
            links: photo.links.html,
            author: photo.user.name,
        }
    }
}

async fn lookup(state: &AppState, id: &str) -> Result<Photo, GatewayError> {
    match state.photos.get_photo(id).await? {
        ApiResponse::Success(photo) => Ok(photo),
        ApiResponse::Errors(errors) => Err(GatewayError::UpstreamRejected(errors)),
    }
}

/// GET /id/{id}
async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ImageParams>,
) -> Result<Response, GatewayError> {
    let transform = Transform::from_params(
        params.w.as_deref(),
        params.h.as_deref(),
        params.format.as_deref(),
    )?;

    let photo = lookup(&state, &id).await?;
    let url = format!("{}{}", photo.urls.raw, transform.query_string());
    let data = state.images.fetch_image(&url).await?;

    debug!("Serving {} ({} bytes, {})", id, data.len(), transform.format);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, transform.format.content_type())],
        data,
    )
        .into_response())
}

/// GET /info/{id}
async fn get_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PhotoInfo>, GatewayError> {
    let photo = lookup(&state, &id).await?;
    Ok(Json(photo.into()))
}
