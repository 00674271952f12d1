//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::{Application, UserResponse};

/// OpenAPI documentation for the password administration API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Password Administration API",
        description = "Look up directory users and reset their passwords"
    ),
    paths(
        health_handler::health_check,
        user_handler::get_user,
        user_handler::change_password,
    ),
    components(
        schemas(
            Application,
            UserResponse,
            health_handler::HealthResponse,
            user_handler::ChangePasswordRequest,
            user_handler::ChangePasswordResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Directory user lookup and password reset")
    )
)]
pub struct ApiDoc;
