//! Admin session handlers

use std::time::Duration;

use axum::{Json, extract::State};
use tokio::time::Instant;

use shared::models::{AdminInfo, ChangePasswordRequest, LoginRequest, LoginResponse, SessionInfo};

use crate::api::extract::ValidJson;
use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_new_password};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Argon2 is CPU bound, keep it off the async workers
async fn verify_off_thread(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

async fn hash_off_thread(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// POST /api/admin/login
///
/// Unknown user and wrong password produce the same answer, and every
/// attempt takes at least `LOGIN_DELAY_MS`.
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let answer_at = Instant::now() + Duration::from_millis(state.config.login_delay_ms);
    let result = try_login(&state, req).await;
    tokio::time::sleep_until(answer_at).await;
    result.map(Json)
}

async fn try_login(state: &ServerState, req: LoginRequest) -> AppResult<LoginResponse> {
    let username = req.username.trim().to_string();
    if username.is_empty()
        || username.len() > MAX_NAME_LEN
        || req.password.is_empty()
        || req.password.len() > MAX_PASSWORD_LEN
    {
        security_log!("WARN", "login_failed", reason = "malformed");
        return Err(AppError::invalid_credentials());
    }

    let user = admin_user::find_by_username(state.pool(), &username).await?;
    let Some(user) = user else {
        security_log!("WARN", "login_failed", username = username.as_str());
        return Err(AppError::invalid_credentials());
    };

    if !verify_off_thread(req.password, user.password_hash.clone()).await? {
        security_log!("WARN", "login_failed", username = username.as_str());
        return Err(AppError::invalid_credentials());
    }

    let (token, expires_at) = state
        .jwt_service()
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!("INFO", "login_success", username = user.username.as_str());

    Ok(LoginResponse {
        success: true,
        token,
        expires_at,
        user: AdminInfo {
            id: user.id,
            username: user.username,
        },
    })
}

/// GET /api/admin/me
pub async fn me(user: CurrentUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        id: user.id,
        username: user.username,
        expires_at: user.expires_at,
    })
}

/// POST /api/admin/change-password
///
/// Tokens issued before the change stay valid until they expire.
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidJson(req): ValidJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    let admin = admin_user::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| AppError::invalid_token("Account no longer exists"))?;

    if req.current_password.is_empty()
        || !verify_off_thread(req.current_password, admin.password_hash.clone()).await?
    {
        security_log!("WARN", "password_change_failed", username = admin.username.as_str());
        return Err(AppError::with_message(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect",
        )
        .for_field("currentPassword"));
    }

    validate_new_password(&req.new_password)?;

    let hash = hash_off_thread(req.new_password).await?;
    admin_user::update_password_hash(state.pool(), admin.id, &hash).await?;

    security_log!("INFO", "password_changed", username = admin.username.as_str());
    Ok(ApiResponse::ok_with_message("Password changed successfully"))
}
