//! Product endpoints
//!
//! Association changes go through `CategoryIds`, so the 2-or-3 rule is
//! checked before any database work. The name-only and categories-only
//! updates are separate PATCH routes, mirroring the published API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::categories::CategoryResponse;
use crate::db::{ProductRepo, ProductWithCategories};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CategoryIds, EntityName, Pagination, PaginationParams};

/// Create product request
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category_ids: Vec<i64>,
}

/// Product response
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub categories: Vec<CategoryResponse>,
}

impl From<ProductWithCategories> for ProductResponse {
    fn from(p: ProductWithCategories) -> Self {
        Self {
            id: p.id,
            name: p.name,
            categories: p.categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET /api/product/{id}
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = ProductRepo::new(&state.pool).get(id).await?;
    Ok(Json(product.into()))
}

/// GET /api/product - paginated list
async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let page = Pagination::from(params);
    let products = ProductRepo::new(&state.pool).list(page).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/product
async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let name = EntityName::new("product name", &req.name)?;
    let category_ids = CategoryIds::new(req.category_ids)?;

    let product = ProductRepo::new(&state.pool)
        .create(name, category_ids)
        .await?;
    Ok(Json(product.into()))
}

/// PATCH /api/product/{id}/Categories - replace the association set
async fn update_product_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<Vec<i64>>,
) -> Result<Json<ProductResponse>, ApiError> {
    let category_ids = CategoryIds::new(req)?;

    let product = ProductRepo::new(&state.pool)
        .update_categories(id, category_ids)
        .await?;
    Ok(Json(product.into()))
}

/// PATCH /api/product/{id}/Name - body is the bare new name string
async fn update_product_name(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let name = EntityName::new("product name", &req)?;

    let product = ProductRepo::new(&state.pool)
        .update_name(id, name)
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/product/{id}
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = ProductRepo::new(&state.pool).delete(id).await?;
    Ok(Json(product.into()))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/{id}",
            get(get_product).delete(delete_product),
        )
        .route("/product/{id}/Categories", patch(update_product_categories))
        .route("/product/{id}/Name", patch(update_product_name))
}
