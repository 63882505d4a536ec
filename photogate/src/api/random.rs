//! Random photo endpoint
//!
//! GET /random/{query} - Redirect to one photo from a search

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::AppState;
use crate::error::GatewayError;
use crate::selection::{page_for_seed, select_index, Orientation};
use crate::transform::{parse_dimension, parse_seed, Dimension};
use crate::unsplash::{ApiResponse, SearchQuery};

/// Build the random photo router
pub fn router() -> Router<AppState> {
    Router::new().route("/random/{query}", get(random_photo))
}

/// Query parameters; anything else is passed through untouched
#[derive(Debug, Default, Deserialize)]
struct RandomParams {
    w: Option<String>,
    h: Option<String>,
    seed: Option<String>,
}

/// Redirect target for the chosen photo, keeping the caller's query string
fn redirect_location(photo_id: &str, raw_query: Option<&str>) -> String {
    match raw_query.filter(|q| !q.is_empty()) {
        Some(q) => format!("/id/{}?{}", photo_id, q),
        None => format!("/id/{}", photo_id),
    }
}

/// GET /random/{query}
async fn random_photo(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<RandomParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, GatewayError> {
    let width = parse_dimension(Dimension::Width, params.w.as_deref())?;
    let height = parse_dimension(Dimension::Height, params.h.as_deref())?;
    let seed = parse_seed(params.seed.as_deref())?;

    let orientation = Orientation::for_dimensions(width, height);
    let page = seed.map(page_for_seed).unwrap_or(1);
    let search = SearchQuery::new(query, orientation, page);

    let found = match state.photos.search_photos(&search).await? {
        ApiResponse::Success(found) => found,
        ApiResponse::Errors(errors) => return Err(GatewayError::UpstreamRejected(errors)),
    };
    debug!(
        "Search {:?} page {}/{}: {} of {} matches",
        search.query,
        page,
        found.total_pages,
        found.results.len(),
        found.total
    );
    let results = found.results;

    if results.is_empty() {
        let message = if seed.is_some() {
            "No results found. Try changing the query or decreasing the seed."
        } else {
            "No results found."
        };
        return Err(GatewayError::NotFound(message.to_string()));
    }

    let index = select_index(seed, results.len(), &mut rand::rng());
    let photo = &results[index];
    debug!(
        "Picked result {} of {} (seed {:?})",
        index,
        results.len(),
        seed
    );

    let location = redirect_location(&photo.id, raw_query.as_deref());
    info!("Redirecting {:?} to {}", search.query, location);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
