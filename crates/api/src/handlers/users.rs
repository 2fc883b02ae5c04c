//! Handlers for the `/users` resource: profiles and onboarding.

use axum::extract::{Path, State};
use axum::Json;
use swapshop_core::error::CoreError;
use swapshop_core::types::DbId;
use swapshop_core::user::{validate_coordinates, validate_email, validate_onboarding};
use swapshop_db::models::user::{CompleteOnboarding, UpdateProfile, UserResponse};
use swapshop_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    get_by_id(State(state), Path(auth.user_id)).await
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(ApiResponse::ok(UserResponse::from_user(
        &user,
        state.media_base(),
    ))))
}

/// PUT /api/v1/users/me/onboarding
///
/// Fill in the profile after signup. `fullname` and `email` are required;
/// completing this step sets `onboard = true`.
pub async fn complete_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CompleteOnboarding>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    validate_onboarding(&input.fullname, &input.email)?;
    validate_coordinates(input.latitude, input.longitude)?;

    let user = UserRepo::complete_onboarding(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;

    tracing::info!(user_id = user.id, "User onboarded");
    Ok(Json(ApiResponse::ok(UserResponse::from_user(
        &user,
        state.media_base(),
    ))))
}

/// PUT /api/v1/users/me
///
/// Partial profile update; absent fields keep their current value.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if let Some(email) = input.email.as_deref() {
        validate_email(email)?;
    }
    if input
        .fullname
        .as_deref()
        .is_some_and(|n| n.trim().is_empty())
    {
        return Err(CoreError::Validation("fullname must not be empty".to_string()).into());
    }
    // A single coordinate may be updated only if the other is already stored.
    let current = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    validate_coordinates(
        input.latitude.or(current.latitude),
        input.longitude.or(current.longitude),
    )?;

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    Ok(Json(ApiResponse::ok(UserResponse::from_user(
        &user,
        state.media_base(),
    ))))
}
