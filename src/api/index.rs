//! Catalog index page

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Index page context: headline counts for the whole catalog
#[derive(Serialize, ToSchema)]
pub struct IndexPage {
    /// Template the front end renders this context with
    pub template: &'static str,
    /// Number of titles
    pub num_books: i64,
    /// Number of physical copies
    pub num_instances: i64,
    /// Copies currently available for loan
    pub num_instances_available: i64,
    /// Number of authors
    pub num_authors: i64,
    /// Number of genres
    pub num_genres: i64,
}

/// Catalog home page with collection counts
#[utoipa::path(
    get,
    path = "/catalog/",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog counts", body = IndexPage)
    )
)]
pub async fn index(State(state): State<crate::AppState>) -> AppResult<Json<IndexPage>> {
    let counts = state.services.catalog.counts().await?;
    Ok(Json(IndexPage {
        template: "catalog/index.html",
        num_books: counts.num_books,
        num_instances: counts.num_instances,
        num_instances_available: counts.num_instances_available,
        num_authors: counts.num_authors,
        num_genres: counts.num_genres,
    }))
}
