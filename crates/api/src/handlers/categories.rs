//! Handlers for the `/categories` resource.
//!
//! Reads are public; writes require authentication.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use swapshop_core::error::CoreError;
use swapshop_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use swapshop_core::types::DbId;
use swapshop_db::models::category::{CreateCategory, UpdateCategory};
use swapshop_db::models::listing::{ListingDetail, ListingFilter};
use swapshop_db::repositories::{CategoryRepo, ListingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    Ok(())
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/v1/categories
///
/// A duplicate name maps to 409 through `uq_categories_name`.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_name(name)?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while any listing uses the category, either as its own
/// category or as the wanted category.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let references = CategoryRepo::count_references(&state.pool, id).await?;
    if references > 0 {
        return Err(CoreError::Conflict(format!(
            "Category {id} is used by {references} listing(s)"
        ))
        .into());
    }

    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Category", id))
    }
}

/// GET /api/v1/categories/{id}/listings
///
/// Available listings in one category, newest first.
pub async fn listings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Category", id))?;

    let filter = ListingFilter {
        category_id: Some(id),
        pattern: None,
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let listings = ListingRepo::browse(&state.pool, &filter).await?;
    let media_base = state.media_base();
    let data: Vec<ListingDetail> = listings
        .into_iter()
        .map(|l| ListingDetail::summary(l, media_base))
        .collect();
    Ok(Json(ApiResponse::ok(data)))
}
