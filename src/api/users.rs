use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    database::Database,
    models::{UserPayload, UserResponse},
    services::user_service,
    utils::error::{AppError, ErrorResponse},
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Confirmação das operações de escrita: `{"status": "ok", "msg": "..."}`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub msg: String,
}

impl StatusResponse {
    fn ok(msg: &str) -> Self {
        StatusResponse {
            status: "ok".to_string(),
            msg: msg.to_string(),
        }
    }
}

/// GET /users - Lista todos os usuários (ordem de criação)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users ordered by creation time", body = UsersResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_users(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");

    let users: Vec<UserResponse> = user_service::list_users(&db)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    log::info!("✅ Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

/// POST /users - Cria usuário
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = StatusResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn create_user(
    db: web::Data<Database>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users");

    let user = user_service::create_user(&db, body.into_inner())
        .await
        .inspect_err(|e| log::warn!("⚠️  Create failed: {}", e))?;

    log::info!("✅ Created user {}", user.id);

    Ok(HttpResponse::Created().json(StatusResponse::ok("user added sucessfully")))
}

/// GET /users/{id} - Busca um usuário
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔍 GET /users/{}", id);

    let user = user_service::get_user(&db, id)
        .await
        .inspect_err(|e| log::warn!("⚠️  Lookup of user {} failed: {}", id, e))?;

    Ok(HttpResponse::Ok().json(UserEnvelope {
        user: UserResponse::from(user),
    }))
}

/// PUT /users/{id} - Substitui name, email e phone
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    request_body = UserPayload,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated", body = StatusResponse),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_user(
    db: web::Data<Database>,
    path: web::Path<i64>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔧 PUT /users/{}", id);

    user_service::update_user(&db, id, body.into_inner())
        .await
        .inspect_err(|e| log::warn!("⚠️  Update of user {} failed: {}", id, e))?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok("Updated sucessfully")))
}

/// DELETE /users/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = StatusResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", id);

    user_service::delete_user(&db, id)
        .await
        .inspect_err(|e| log::warn!("⚠️  Delete of user {} failed: {}", id, e))?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok("deletion success")))
}
