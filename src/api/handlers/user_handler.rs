//! User handlers: directory lookup and password reset.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{CheckedQuery, ValidatedJson};
use crate::api::AppState;
use crate::config::AFFIRMATIVE_TOKENS;
use crate::domain::{mask, Application, UserResponse};
use crate::errors::{AppError, AppResult};

const PASSWORD_CHANGED_MESSAGE: &str = "Password successfully changed in the directory.";

/// Lookup query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Population whose pool is searched
    pub application: Application,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// National ID; must equal the username in the path
    #[validate(length(equal = 11, message = "cpf must be exactly 11 characters"))]
    #[schema(example = "00062716506", min_length = 11, max_length = 11)]
    pub cpf: String,
    /// Confirmation flag: yes, y, true or 1 (any case)
    #[schema(example = "yes")]
    pub change_pass: String,
    pub application: Application,
}

impl ChangePasswordRequest {
    /// Check the request against the username in the path.
    pub fn confirm_for(&self, username: &str) -> AppResult<()> {
        if self.cpf != username {
            return Err(AppError::bad_request(
                "cpf in the request body does not match the username in the URL",
            ));
        }

        if !is_affirmative(&self.change_pass) {
            return Err(AppError::bad_request(
                "Password change was not requested (change_pass is not 'yes')",
            ));
        }

        Ok(())
    }
}

/// Whether a confirmation flag accepts the change.
pub fn is_affirmative(flag: &str) -> bool {
    let flag = flag.to_lowercase();
    AFFIRMATIVE_TOKENS.contains(&flag.as_str())
}

/// Password change response. Carries the only unmasked copy of the password.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangePasswordResponse {
    #[schema(example = "00062716506")]
    pub username: String,
    #[schema(example = "483920")]
    pub new_password: String,
    pub message: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/:username", get(get_user).post(change_password))
}

/// Look up a user in the pool of the given application
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Directory username (national ID)"),
        UserQuery
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "Missing or unknown application"),
        (status = 500, description = "Directory error")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    CheckedQuery(query): CheckedQuery<UserQuery>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .account_service
        .get_user(&username, query.application.as_str())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Reset a user's password to a newly generated one
#[utoipa::path(
    post,
    path = "/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Directory username (national ID)")
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ChangePasswordResponse),
        (status = 400, description = "Username mismatch or change not confirmed"),
        (status = 422, description = "Malformed request"),
        (status = 500, description = "Directory error")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<ChangePasswordResponse>> {
    payload.confirm_for(&username)?;

    // the request holds no secret, so it is logged whole
    state
        .audit
        .request_received(&payload.cpf, payload.application, &payload);

    let new_password = state
        .account_service
        .reset_password(&payload.cpf, payload.application.as_str(), None)
        .await?;

    state
        .audit
        .password_returned(&payload.cpf, payload.application, &mask(&new_password));

    Ok(Json(ChangePasswordResponse {
        username: payload.cpf,
        new_password,
        message: PASSWORD_CHANGED_MESSAGE.to_string(),
    }))
}
