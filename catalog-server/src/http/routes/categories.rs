//! Category endpoints
//!
//! Wire format follows the published API: PascalCase JSON fields and
//! `pageNumber`/`pageSize` query parameters.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{Category, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{EntityName, Pagination, PaginationParams};

/// Create/update category request
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRequest {
    pub name: String,
}

/// Category response
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// GET /api/category/{id}
async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = CategoryRepo::new(&state.pool).get(id).await?;
    Ok(Json(category.into()))
}

/// GET /api/category - paginated list
async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let page = Pagination::from(params);
    let categories = CategoryRepo::new(&state.pool).list(page).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /api/category
async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let name = EntityName::new("category name", &req.name)?;
    let category = CategoryRepo::new(&state.pool).create(name).await?;
    Ok(Json(category.into()))
}

/// PUT /api/category/{id}
async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let name = EntityName::new("category name", &req.name)?;
    let category = CategoryRepo::new(&state.pool).update(id, name).await?;
    Ok(Json(category.into()))
}

/// DELETE /api/category/{id}
async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = CategoryRepo::new(&state.pool).delete(id).await?;
    Ok(Json(category.into()))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/category", get(list_categories).post(create_category))
        .route(
            "/category/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
