//! Profile and password endpoints for the signed-in user.

use serde::Serialize;

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::{MessageResponse, UpdateProfileRequest, User};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

/// Fetches the signed-in user's profile.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn fetch_profile(client: &ApiClient) -> Result<User, ApiError> {
    client.get("/api/users/profile").await
}

/// Updates name and phone number. Returns the saved profile.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn update_profile(
    client: &ApiClient,
    request: &UpdateProfileRequest,
) -> Result<User, ApiError> {
    client.put("/api/users/profile", request).await
}

/// Changes the password, verifying the current one server-side.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn change_password(
    client: &ApiClient,
    old_password: &str,
    new_password: &str,
) -> Result<MessageResponse, ApiError> {
    client
        .post(
            "/api/users/change-password",
            &ChangePasswordBody {
                old_password,
                new_password,
            },
        )
        .await
}
