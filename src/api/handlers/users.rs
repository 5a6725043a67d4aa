//! Handler for the user listing endpoint.

use axum::{Json, extract::State};

use crate::api::dto::users::UserResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns all users as JSON.
///
/// # Endpoint
///
/// `GET /api/users`
///
/// # Request Flow
///
/// 1. [`crate::application::services::UserService`] checks the cache under
///    the `all_users` key
/// 2. On miss, the user repository is queried and the result cached
/// 3. The listing is returned with 200
///
/// # Errors
///
/// Any failure on the path maps to 500 with an error message body.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
