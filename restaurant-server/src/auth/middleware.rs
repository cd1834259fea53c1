//! Authentication middleware
//!
//! Guards the admin routers. Public routes are mounted outside the layer.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Require a valid admin bearer token
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
///
/// | Failure | Status |
/// |---------|--------|
/// | no `Authorization` header | 401 NotAuthenticated |
/// | header without a bearer token | 403 TokenInvalid |
/// | bad signature / malformed token | 403 TokenInvalid |
/// | expired token | 403 TokenExpired |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = authenticate(state.jwt_service(), auth_header, &req.uri().to_string())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Resolve an `Authorization` header value into the current admin
pub(crate) fn authenticate(
    jwt_service: &JwtService,
    auth_header: Option<&str>,
    uri: &str,
) -> Result<CurrentUser, AppError> {
    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            security_log!("WARN", "auth_malformed_header", uri = uri);
            AppError::invalid_token("Invalid authorization header")
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri);
            return Err(AppError::not_authenticated());
        }
    };

    let claims = jwt_service.validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri);
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims).map_err(|e| {
        security_log!("WARN", "auth_bad_claims", error = e.to_string(), uri = uri);
        AppError::invalid_token("Invalid token")
    })
}
