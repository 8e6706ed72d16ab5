use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "1.0.0",
        description = "CRUD API for user records (name, email, phone).\n\n**Errors:** every failure returns `{\"status\": \"error\", \"error\": \"...\"}` with a status code per error kind (400 validation, 404 not found, 409 conflict, 503 store unavailable)."
    ),
    paths(
        // Root & Health
        crate::api::index::index,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::index::WelcomeResponse,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
            crate::api::users::UsersResponse,
            crate::api::users::UserEnvelope,
            crate::api::users::StatusResponse,
            crate::models::UserPayload,
            crate::models::UserResponse,
            crate::utils::error::ErrorResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete user records."),
        (name = "Health", description = "Reachability, health check and request metrics."),
    )
)]
pub struct ApiDoc;
