//! Account API handlers.
//!
//! ```text
//! POST /api/auth/login {"email":"admin@healthspire.example","password":"..."}
//! GET /api/auth/me
//! PATCH /api/auth/me {"avatar":"/uploads/face.png"}
//! POST /api/auth/change-password {"currentPassword":"...","newPassword":"..."}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, LoginCredentials, LoginOutcome, LoginValidationError, PasswordChange, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
///
/// Missing fields deserialise as empty strings so they are reported through
/// the same validation error as blank ones.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Profile update body for `PATCH /api/auth/me`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub avatar: String,
}

/// Password change body for `POST /api/auth/change-password`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
        LoginValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_password_change_error(err: &LoginValidationError, current_missing: bool) -> Error {
    let (field, code) = match err {
        LoginValidationError::PasswordTooShort { .. } => ("newPassword", "password_too_short"),
        _ if current_missing => ("currentPassword", "empty_password"),
        _ => ("newPassword", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Exchange credentials for a bearer token.
///
/// The first login with the configured default admin identity provisions the
/// admin account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginOutcome),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginOutcome>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(outcome))
}

/// Return the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("BearerToken" = []))
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    let me = state.accounts.me(&user.identity().user_id).await?;
    Ok(web::Json(me))
}

/// Update the signed-in user's avatar URL.
#[utoipa::path(
    patch,
    path = "/api/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateProfile",
    security(("BearerToken" = []))
)]
#[patch("/auth/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let updated = state
        .accounts
        .update_avatar(&user.identity().user_id, &payload.avatar)
        .await?;
    Ok(web::Json(updated))
}

/// Replace the signed-in user's password.
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised or wrong current password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "changePassword",
    security(("BearerToken" = []))
)]
#[post("/auth/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let ChangePasswordRequest {
        current_password,
        new_password,
    } = payload.into_inner();
    let change = PasswordChange::try_from_parts(&current_password, &new_password)
        .map_err(|err| map_password_change_error(&err, current_password.is_empty()))?;
    state
        .accounts
        .change_password(&user.identity().user_id, &change)
        .await?;
    info!(user_id = %user.identity().user_id, "password changed");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
