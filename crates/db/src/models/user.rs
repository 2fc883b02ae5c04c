//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use swapshop_core::media::public_url;
use swapshop_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Stored file name only; see [`UserResponse::from_user`].
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub onboard: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Name shown to other users: full name once onboarded, else the username.
    pub fn display_name(&self) -> &str {
        self.fullname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub onboard: bool,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build the public view, resolving the profile image against `media_base`.
    pub fn from_user(user: &User, media_base: &str) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            profile_image_url: user
                .profile_image
                .as_deref()
                .and_then(|f| public_url(media_base, f)),
            bio: user.bio.clone(),
            location: user.location.clone(),
            latitude: user.latitude,
            longitude: user.longitude,
            onboard: user.onboard,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user at signup.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}

/// DTO for the onboarding step. Completing it sets `onboard = true`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteOnboarding {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// DTO for updating an existing profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}
