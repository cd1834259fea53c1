//! CurrentUser extractor
//!
//! Lets admin handlers take `CurrentUser` as an argument. Reuses the user
//! the middleware already resolved, otherwise validates the header itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = authenticate(state.jwt_service(), auth_header, &parts.uri.to_string())?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
