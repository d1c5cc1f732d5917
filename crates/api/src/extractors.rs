//! Request extractors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;

use budgetry_shared::UserId;

/// Header carrying the acting user's ID.
///
/// Authentication happens upstream; this service trusts the header.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf a request acts.
///
/// ```ignore
/// async fn handler(user: ActingUser) -> impl IntoResponse {
///     let user_id = user.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub UserId);

impl ActingUser {
    /// Returns the user ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.trim().parse::<UserId>().ok())
            .map(ActingUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "UNAUTHORIZED",
                        "message": "A valid x-user-id header is required"
                    })),
                )
            })
    }
}
