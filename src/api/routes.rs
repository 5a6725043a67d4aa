//! API route configuration.

use crate::api::handlers::list_users_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET /users` - List all users (cached)
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users_handler))
}
